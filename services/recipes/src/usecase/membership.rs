use uuid::Uuid;

use crate::domain::repository::{MembershipRepository, RecipeRepository};
use crate::domain::types::{RecipeShort, SetKind};
use crate::error::RecipesServiceError;

// ── AddToSet ─────────────────────────────────────────────────────────────────

pub struct AddToSetUseCase<R: RecipeRepository, M: MembershipRepository> {
    pub recipes: R,
    pub memberships: M,
}

impl<R: RecipeRepository, M: MembershipRepository> AddToSetUseCase<R, M> {
    pub async fn execute(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<RecipeShort, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if !self.memberships.add(kind, user_id, recipe_id).await? {
            return Err(kind.already_present());
        }
        Ok(recipe.short())
    }
}

// ── RemoveFromSet ────────────────────────────────────────────────────────────

pub struct RemoveFromSetUseCase<R: RecipeRepository, M: MembershipRepository> {
    pub recipes: R,
    pub memberships: M,
}

impl<R: RecipeRepository, M: MembershipRepository> RemoveFromSetUseCase<R, M> {
    pub async fn execute(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<(), RecipesServiceError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        if !self.memberships.remove(kind, user_id, recipe_id).await? {
            return Err(kind.not_present());
        }
        Ok(())
    }
}
