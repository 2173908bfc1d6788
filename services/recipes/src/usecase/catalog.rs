use crate::domain::repository::{IngredientRepository, TagRepository};
use crate::domain::types::{Ingredient, Tag, validate_color, validate_slug};
use crate::error::RecipesServiceError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagInput {
    pub name: String,
    pub color: String,
    pub slug: String,
}

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    pub async fn execute(&self, input: CreateTagInput) -> Result<Tag, RecipesServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(RecipesServiceError::MissingData);
        }
        if !validate_color(&input.color) || !validate_slug(&input.slug) {
            return Err(RecipesServiceError::InvalidTag);
        }
        self.repo.create(name, &input.color, &input.slug).await
    }
}

// ── SearchIngredients ────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> SearchIngredientsUseCase<R> {
    /// Blank search terms list every ingredient.
    pub async fn execute(&self, search: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = search.map(str::trim).filter(|s| !s.is_empty());
        self.repo.search(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── CreateIngredient ─────────────────────────────────────────────────────────

pub struct CreateIngredientInput {
    pub name: String,
    pub measurement_unit: String,
}

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateIngredientInput,
    ) -> Result<Ingredient, RecipesServiceError> {
        let name = input.name.trim();
        let unit = input.measurement_unit.trim();
        if name.is_empty() || unit.is_empty() {
            return Err(RecipesServiceError::MissingData);
        }
        self.repo.create(name, unit).await
    }
}
