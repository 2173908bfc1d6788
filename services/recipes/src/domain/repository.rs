#![allow(async_fn_in_trait)]

use std::collections::HashSet;

use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::shopping_list::CartIngredientRow;
use crate::domain::types::{
    Ingredient, NewRecipe, Recipe, RecipeChanges, RecipeFilter, RecipeShort, SetKind, Tag, User,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError>;
    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError>;
    /// Fails with `UserAlreadyExists` when the id, email or username is taken.
    async fn create(&self, user: &User) -> Result<(), RecipesServiceError>;
}

pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;
    /// Fails with `TagAlreadyExists` on a name, color or slug collision.
    async fn create(&self, name: &str, color: &str, slug: &str)
    -> Result<Tag, RecipesServiceError>;
}

pub trait IngredientRepository: Send + Sync {
    /// Case-insensitive prefix search on name. `None` lists everything.
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;
    async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, RecipesServiceError>;
}

/// Repository for recipes and their tag/ingredient associations.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    /// Newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError>;

    /// Insert the recipe with its associations in one transaction.
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipesServiceError>;

    /// Apply scalar changes and replace associations in one transaction.
    async fn update(
        &self,
        id: i32,
        changes: &RecipeChanges,
    ) -> Result<Recipe, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    /// Short projections of an author's recipes, newest first.
    async fn list_short_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeShort>, RecipesServiceError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError>;
}

/// Favorite and shopping-cart membership rows.
pub trait MembershipRepository: Send + Sync {
    /// Returns `false` if the pair already existed.
    async fn add(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError>;

    /// Subset of `recipe_ids` present in the user's set.
    async fn recipe_ids_among(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError>;
}

/// Directed follow edges between users.
pub trait FollowRepository: Send + Sync {
    /// Returns `false` if the edge already existed.
    async fn create(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Returns `true` if an edge was deleted.
    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError>;

    /// Subset of `author_ids` followed by the user.
    async fn followed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError>;

    /// Authors followed by the user, most recently followed first.
    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError>;
}

pub trait ShoppingListRepository: Send + Sync {
    /// One row per (recipe in cart, ingredient of that recipe).
    async fn cart_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartIngredientRow>, RecipesServiceError>;
}
