use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::User;
use crate::error::RecipesServiceError;
use crate::usecase::view::{AuthorProfile, UserView};

async fn author_profile<R: RecipeRepository>(
    recipes: &R,
    author: User,
    is_subscribed: bool,
    recipes_limit: Option<u64>,
) -> Result<AuthorProfile, RecipesServiceError> {
    let short = recipes.list_short_by_author(author.id, recipes_limit).await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(AuthorProfile {
        author: UserView {
            user: author,
            is_subscribed,
        },
        recipes: short,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    pub users: U,
    pub follows: F,
    pub recipes: R,
}

impl<U, F, R> SubscribeUseCase<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<AuthorProfile, RecipesServiceError> {
        if user_id == author_id {
            return Err(RecipesServiceError::SelfSubscription);
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        if !self.follows.create(user_id, author_id).await? {
            return Err(RecipesServiceError::AlreadySubscribed);
        }
        author_profile(&self.recipes, author, true, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnsubscribeUseCase<U, F> {
    pub async fn execute(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RecipesServiceError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }
        if !self.follows.delete(user_id, author_id).await? {
            return Err(RecipesServiceError::NotSubscribed);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository, R: RecipeRepository> {
    pub follows: F,
    pub recipes: R,
}

impl<F: FollowRepository, R: RecipeRepository> ListSubscriptionsUseCase<F, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<AuthorProfile>, RecipesServiceError> {
        let Page { count, results } = self.follows.list_authors(user_id, page.clamped()).await?;
        let mut profiles = Vec::with_capacity(results.len());
        for author in results {
            profiles.push(author_profile(&self.recipes, author, true, recipes_limit).await?);
        }
        Ok(Page {
            count,
            results: profiles,
        })
    }
}
