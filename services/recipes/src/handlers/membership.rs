use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::SetKind;
use crate::error::RecipesServiceError;
use crate::handlers::recipe::RecipeShortResponse;
use crate::state::AppState;
use crate::usecase::membership::{AddToSetUseCase, RemoveFromSetUseCase};

async fn add(
    kind: SetKind,
    identity: IdentityHeaders,
    state: AppState,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeShortResponse>), RecipesServiceError> {
    let usecase = AddToSetUseCase {
        recipes: state.recipe_repo(),
        memberships: state.membership_repo(),
    };
    let short = usecase.execute(kind, identity.user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(short.into())))
}

async fn remove(
    kind: SetKind,
    identity: IdentityHeaders,
    state: AppState,
    recipe_id: i32,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = RemoveFromSetUseCase {
        recipes: state.recipe_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(kind, identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST/DELETE /recipes/{id}/favorite ───────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), RecipesServiceError> {
    add(SetKind::Favorite, identity, state, recipe_id).await
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(SetKind::Favorite, identity, state, recipe_id).await
}

// ── POST/DELETE /recipes/{id}/shopping_cart ──────────────────────────────────

pub async fn add_to_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), RecipesServiceError> {
    add(SetKind::Cart, identity, state, recipe_id).await
}

pub async fn remove_from_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    remove(SetKind::Cart, identity, state, recipe_id).await
}
