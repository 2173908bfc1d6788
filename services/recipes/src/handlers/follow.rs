use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::Page;

use crate::error::RecipesServiceError;
use crate::handlers::page_request;
use crate::handlers::recipe::RecipeShortResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::follow::{ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase};
use crate::usecase::view::AuthorProfile;

/// A followed author: user fields plus their newest recipes.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: u64,
}

impl From<AuthorProfile> for ProfileResponse {
    fn from(profile: AuthorProfile) -> Self {
        Self {
            user: profile.author.into(),
            recipes: profile
                .recipes
                .into_iter()
                .map(RecipeShortResponse::from)
                .collect(),
            recipes_count: profile.recipes_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u64>,
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<RecipesLimitQuery>,
) -> Result<(StatusCode, Json<ProfileResponse>), RecipesServiceError> {
    let usecase = SubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let profile = usecase
        .execute(identity.user_id, author_id, query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = UnsubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    usecase.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<SubscriptionsQuery>,
) -> Result<Json<Page<ProfileResponse>>, RecipesServiceError> {
    let usecase = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let page = usecase
        .execute(
            identity.user_id,
            page_request(query.page, query.limit),
            query.recipes_limit,
        )
        .await?;
    Ok(Json(page.map(ProfileResponse::from)))
}
