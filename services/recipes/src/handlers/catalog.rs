use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::{Ingredient, Tag};
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateIngredientInput, CreateIngredientUseCase, CreateTagInput, CreateTagUseCase,
    GetIngredientUseCase, GetTagUseCase, ListTagsUseCase, SearchIngredientsUseCase,
};

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

// ── GET /tags ────────────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, RecipesServiceError> {
    let usecase = ListTagsUseCase {
        repo: state.tag_repo(),
    };
    let tags = usecase.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /tags/{id} ───────────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, RecipesServiceError> {
    let usecase = GetTagUseCase {
        repo: state.tag_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /tags ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub color: String,
    pub slug: String,
}

pub async fn create_tag(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), RecipesServiceError> {
    if !identity.is_admin() {
        return Err(RecipesServiceError::Forbidden);
    }
    let usecase = CreateTagUseCase {
        repo: state.tag_repo(),
    };
    let tag = usecase
        .execute(CreateTagInput {
            name: body.name,
            color: body.color,
            slug: body.slug,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(tag.into())))
}

// ── GET /ingredients ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct IngredientSearchQuery {
    /// Case-insensitive name prefix.
    pub search: Option<String>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<IngredientSearchQuery>,
) -> Result<Json<Vec<IngredientResponse>>, RecipesServiceError> {
    let usecase = SearchIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let found = usecase.execute(query.search.as_deref()).await?;
    Ok(Json(found.into_iter().map(IngredientResponse::from).collect()))
}

// ── GET /ingredients/{id} ────────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, RecipesServiceError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /ingredients ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub measurement_unit: String,
}

pub async fn create_ingredient(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>), RecipesServiceError> {
    if !identity.is_admin() {
        return Err(RecipesServiceError::Forbidden);
    }
    let usecase = CreateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = usecase
        .execute(CreateIngredientInput {
            name: body.name,
            measurement_unit: body.measurement_unit,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
