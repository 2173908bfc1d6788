use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::DEFAULT_SHOPPING_LIST_FILENAME;
use crate::infra::db::{
    DbFollowRepository, DbIngredientRepository, DbMembershipRepository, DbRecipeRepository,
    DbShoppingListRepository, DbTagRepository, DbUserRepository,
};
use crate::usecase::view::RecipePresenter;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub shopping_list_filename: Arc<str>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, shopping_list_filename: &str) -> Self {
        Self {
            db,
            shopping_list_filename: Arc::from(shopping_list_filename),
        }
    }

    /// State without a live database, for router tests that never reach storage.
    pub fn disconnected() -> Self {
        Self::new(DatabaseConnection::Disconnected, DEFAULT_SHOPPING_LIST_FILENAME)
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn shopping_list_repo(&self) -> DbShoppingListRepository {
        DbShoppingListRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_presenter(
        &self,
    ) -> RecipePresenter<DbUserRepository, DbMembershipRepository, DbFollowRepository> {
        RecipePresenter {
            users: self.user_repo(),
            memberships: self.membership_repo(),
            follows: self.follow_repo(),
        }
    }
}
