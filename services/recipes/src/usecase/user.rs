use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::types::{User, validate_email, validate_username};
use crate::error::RecipesServiceError;
use crate::usecase::view::{UserView, present_users};

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    /// Create the caller's profile. The profile id is the caller's identity id.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateUserInput,
    ) -> Result<User, RecipesServiceError> {
        if !validate_username(&input.username) {
            return Err(RecipesServiceError::InvalidUsername);
        }
        if !validate_email(&input.email) {
            return Err(RecipesServiceError::InvalidEmail);
        }
        let user = User {
            id: user_id,
            email: input.email,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository, F: FollowRepository> {
    pub repo: R,
    pub follows: F,
}

impl<R: UserRepository, F: FollowRepository> GetUserUseCase<R, F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        user_id: Uuid,
    ) -> Result<UserView, RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        let mut views = present_users(&self.follows, viewer, vec![user]).await?;
        views.pop().ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, F: FollowRepository> {
    pub repo: R,
    pub follows: F,
}

impl<R: UserRepository, F: FollowRepository> ListUsersUseCase<R, F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<UserView>, RecipesServiceError> {
        let Page { count, results } = self.repo.list(page.clamped()).await?;
        let results = present_users(&self.follows, viewer, results).await?;
        Ok(Page { count, results })
    }
}
