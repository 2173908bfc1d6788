use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::Page;

use crate::domain::types::{Actor, RawIngredient, RecipeShort};
use crate::error::RecipesServiceError;
use crate::handlers::catalog::TagResponse;
use crate::handlers::user::UserResponse;
use crate::handlers::{NumberField, page_request, query_flag};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeInput, CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase,
    ListRecipesQuery, ListRecipesUseCase, UpdateRecipeInput, UpdateRecipeUseCase,
};
use crate::usecase::view::RecipeView;

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        let recipe = view.recipe;
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: view.author.into(),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(|item| RecipeIngredientResponse {
                    id: item.ingredient.id,
                    name: item.ingredient.name,
                    measurement_unit: item.ingredient.measurement_unit,
                    amount: item.amount,
                })
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: recipe.name,
            image: recipe.image,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Compact projection returned by favorite/cart toggles and author profiles.
#[derive(Debug, Serialize)]
pub struct RecipeShortResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeShort> for RecipeShortResponse {
    fn from(short: RecipeShort) -> Self {
        Self {
            id: short.id,
            name: short.name,
            image: short.image,
            cooking_time: short.cooking_time,
        }
    }
}

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: NumberField,
}

fn raw_ingredients(items: Vec<IngredientAmountRequest>) -> Vec<RawIngredient> {
    items
        .into_iter()
        .map(|item| RawIngredient {
            id: item.id,
            amount: item.amount.into(),
        })
        .collect()
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<Uuid>,
    /// Repeated: `?tags=breakfast&tags=lunch`.
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Page<RecipeResponse>>, RecipesServiceError> {
    let viewer = identity.map(|i| i.user_id);
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
    };
    let Page { count, results } = usecase
        .execute(
            viewer,
            ListRecipesQuery {
                author: query.author,
                tags: query.tags,
                is_favorited: query_flag(query.is_favorited.as_deref()),
                is_in_shopping_cart: query_flag(query.is_in_shopping_cart.as_deref()),
            },
            page_request(query.page, query.limit),
        )
        .await?;
    let views = state.recipe_presenter().present(viewer, results).await?;
    Ok(Json(Page {
        count,
        results: views.into_iter().map(RecipeResponse::from).collect(),
    }))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: NumberField,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmountRequest>,
}

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let recipe = usecase
        .execute(
            identity.user_id,
            CreateRecipeInput {
                name: body.name,
                image: body.image,
                text: body.text,
                cooking_time: body.cooking_time.into(),
                tags: body.tags,
                ingredients: raw_ingredients(body.ingredients),
            },
        )
        .await?;
    let view = state
        .recipe_presenter()
        .present_one(Some(identity.user_id), recipe)
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(id).await?;
    let view = state
        .recipe_presenter()
        .present_one(identity.map(|i| i.user_id), recipe)
        .await?;
    Ok(Json(view.into()))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<NumberField>,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmountRequest>,
}

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.user_role,
    };
    let recipe = usecase
        .execute(
            actor,
            id,
            UpdateRecipeInput {
                name: body.name,
                image: body.image,
                text: body.text,
                cooking_time: body.cooking_time.map(Into::into),
                tags: body.tags,
                ingredients: raw_ingredients(body.ingredients),
            },
        )
        .await?;
    let view = state
        .recipe_presenter()
        .present_one(Some(identity.user_id), recipe)
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let actor = Actor {
        user_id: identity.user_id,
        role: identity.user_role,
    };
    usecase.execute(actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
