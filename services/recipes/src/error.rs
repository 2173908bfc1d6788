use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("ingredient already exists")]
    IngredientAlreadyExists,
    #[error("recipe is already in favorites")]
    AlreadyInFavorites,
    #[error("recipe is already in shopping cart")]
    AlreadyInShoppingCart,
    #[error("recipe is not in favorites")]
    NotInFavorites,
    #[error("recipe is not in shopping cart")]
    NotInShoppingCart,
    #[error("cannot follow yourself")]
    SelfSubscription,
    #[error("already following")]
    AlreadySubscribed,
    #[error("not following this author")]
    NotSubscribed,
    #[error("ingredients must not repeat.")]
    DuplicateIngredients,
    #[error("ingredient amount must be a positive number.")]
    InvalidAmount,
    #[error("cooking time must be > 0.")]
    InvalidCookingTime,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid tag color or slug")]
    InvalidTag,
    #[error("shopping cart is empty")]
    ShoppingCartEmpty,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::AlreadyInFavorites => "ALREADY_IN_FAVORITES",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::NotInFavorites => "NOT_IN_FAVORITES",
            Self::NotInShoppingCart => "NOT_IN_SHOPPING_CART",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::DuplicateIngredients => "DUPLICATE_INGREDIENTS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidTag => "INVALID_TAG",
            Self::ShoppingCartEmpty => "SHOPPING_CART_EMPTY",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::NotInFavorites
            | Self::NotInShoppingCart => StatusCode::NOT_FOUND,
            // Conflicts are reported as 400 together with validation failures.
            Self::UserAlreadyExists
            | Self::TagAlreadyExists
            | Self::IngredientAlreadyExists
            | Self::AlreadyInFavorites
            | Self::AlreadyInShoppingCart
            | Self::AlreadySubscribed
            | Self::SelfSubscription
            | Self::NotSubscribed
            | Self::DuplicateIngredients
            | Self::InvalidAmount
            | Self::InvalidCookingTime
            | Self::InvalidUsername
            | Self::InvalidEmail
            | Self::InvalidTag
            | Self::ShoppingCartEmpty
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client errors; TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
