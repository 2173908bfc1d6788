use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{IngredientRepository, RecipeRepository, TagRepository};
use crate::domain::types::{
    Actor, IngredientAmount, NewRecipe, RawIngredient, RawNumber, Recipe, RecipeChanges,
    RecipeFilter, dedup_tag_ids, validate_cooking_time, validate_ingredients,
};
use crate::error::RecipesServiceError;

/// Fail with `TagNotFound` / `IngredientNotFound` if any referenced row is missing.
async fn ensure_catalog_refs<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    tag_ids: &[i32],
    amounts: &[IngredientAmount],
) -> Result<(), RecipesServiceError> {
    if !tag_ids.is_empty() && tags.find_by_ids(tag_ids).await?.len() != tag_ids.len() {
        return Err(RecipesServiceError::TagNotFound);
    }
    let ingredient_ids: Vec<i32> = amounts.iter().map(|a| a.ingredient_id).collect();
    if !ingredient_ids.is_empty()
        && ingredients.find_by_ids(&ingredient_ids).await?.len() != ingredient_ids.len()
    {
        return Err(RecipesServiceError::IngredientNotFound);
    }
    Ok(())
}

fn non_blank(value: String) -> Result<String, RecipesServiceError> {
    if value.trim().is_empty() {
        return Err(RecipesServiceError::MissingData);
    }
    Ok(value)
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeInput {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: RawNumber,
    pub tags: Vec<i32>,
    pub ingredients: Vec<RawIngredient>,
}

pub struct CreateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R, T, I> CreateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(
        &self,
        author_id: Uuid,
        input: CreateRecipeInput,
    ) -> Result<Recipe, RecipesServiceError> {
        let ingredients = validate_ingredients(&input.ingredients)?;
        let cooking_time = validate_cooking_time(&input.cooking_time)?;
        let tag_ids = dedup_tag_ids(&input.tags);
        let recipe = NewRecipe {
            author_id,
            name: non_blank(input.name)?,
            image: non_blank(input.image)?,
            text: non_blank(input.text)?,
            cooking_time,
            tag_ids,
            ingredients,
        };
        ensure_catalog_refs(&self.tags, &self.ingredients, &recipe.tag_ids, &recipe.ingredients)
            .await?;
        self.recipes.create(&recipe).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> GetRecipeUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Recipe, RecipesServiceError> {
        self.recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ListRecipesQuery {
    pub author: Option<Uuid>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

pub struct ListRecipesUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> ListRecipesUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        query: ListRecipesQuery,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        // Anonymous callers own no favorites or cart, so these filters match nothing.
        if viewer.is_none() && (query.is_favorited || query.is_in_shopping_cart) {
            return Ok(Page::empty());
        }
        let filter = RecipeFilter {
            author_id: query.author,
            tag_slugs: query.tags,
            favorited_by: viewer.filter(|_| query.is_favorited),
            in_cart_of: viewer.filter(|_| query.is_in_shopping_cart),
        };
        self.recipes.list(&filter, page.clamped()).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<RawNumber>,
    pub tags: Vec<i32>,
    pub ingredients: Vec<RawIngredient>,
}

pub struct UpdateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R, T, I> UpdateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(
        &self,
        actor: Actor,
        id: i32,
        input: UpdateRecipeInput,
    ) -> Result<Recipe, RecipesServiceError> {
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !actor.can_modify(existing.author_id) {
            return Err(RecipesServiceError::Forbidden);
        }

        let ingredients = validate_ingredients(&input.ingredients)?;
        let cooking_time = input
            .cooking_time
            .as_ref()
            .map(validate_cooking_time)
            .transpose()?;
        let changes = RecipeChanges {
            name: input.name.map(non_blank).transpose()?,
            image: input.image.map(non_blank).transpose()?,
            text: input.text.map(non_blank).transpose()?,
            cooking_time,
            tag_ids: dedup_tag_ids(&input.tags),
            ingredients,
        };

        ensure_catalog_refs(&self.tags, &self.ingredients, &changes.tag_ids, &changes.ingredients)
            .await?;
        self.recipes.update(id, &changes).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, actor: Actor, id: i32) -> Result<(), RecipesServiceError> {
        let existing = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !actor.can_modify(existing.author_id) {
            return Err(RecipesServiceError::Forbidden);
        }
        if !self.recipes.delete(id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        Ok(())
    }
}
