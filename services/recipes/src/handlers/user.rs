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
use crate::handlers::PageQuery;
use crate::state::AppState;
use crate::usecase::user::{CreateUserInput, CreateUserUseCase, GetUserUseCase, ListUsersUseCase};
use crate::usecase::view::UserView;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            email: view.user.email,
            id: view.user.id,
            username: view.user.username,
            first_name: view.user.first_name,
            last_name: view.user.last_name,
            is_subscribed: view.is_subscribed,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RecipesServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            CreateUserInput {
                email: body.email,
                username: body.username,
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await?;
    let view = UserView {
        user,
        is_subscribed: false,
    };
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<UserResponse>>, RecipesServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let page = usecase
        .execute(identity.map(|i| i.user_id), query.page_request())
        .await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let view = usecase
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(view.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
        follows: state.follow_repo(),
    };
    let view = usecase
        .execute(identity.map(|i| i.user_id), user_id)
        .await?;
    Ok(Json(view.into()))
}
