use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use foodgram_domain::user::UserRole;

use crate::error::RecipesServiceError;

/// User profile owned by the recipes service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Authenticated principal performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    /// Recipes may be changed by their author or by an admin.
    pub fn can_modify(&self, author_id: Uuid) -> bool {
        self.user_id == author_id || self.role.is_admin()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient together with the amount a recipe uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// A recipe with its tag and ingredient associations loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn short(&self) -> RecipeShort {
        RecipeShort {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            cooking_time: self.cooking_time,
        }
    }
}

/// Compact recipe projection used by membership toggles and author profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeShort {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

/// A validated (ingredient, amount) pair from a write payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

/// Fields of a recipe about to be inserted.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: Uuid,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Changes applied by a recipe update. Scalars left `None` keep their value;
/// associations are always replaced.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub tag_ids: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Recipe list filters. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<Uuid>,
    /// Recipe matches when it carries any of these tag slugs.
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// Per-user recipe sets sharing the same add/remove semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    Favorite,
    Cart,
}

impl SetKind {
    pub fn already_present(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::AlreadyInFavorites,
            Self::Cart => RecipesServiceError::AlreadyInShoppingCart,
        }
    }

    pub fn not_present(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::NotInFavorites,
            Self::Cart => RecipesServiceError::NotInShoppingCart,
        }
    }
}

/// A number as submitted by a client: JSON integer, string, or anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNumber {
    Integer(i64),
    Text(String),
    Other,
}

/// Ingredient entry of a write payload before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIngredient {
    pub id: i32,
    pub amount: RawNumber,
}

/// Parse a strictly positive `i32`. Strings must consist of ASCII digits only.
pub fn parse_positive(raw: &RawNumber) -> Option<i32> {
    let value = match raw {
        RawNumber::Integer(n) => i32::try_from(*n).ok()?,
        RawNumber::Text(s) => {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse::<i32>().ok()?
        }
        RawNumber::Other => return None,
    };
    (value > 0).then_some(value)
}

/// Validate the ingredient list of a write payload.
///
/// The duplicate check covers the whole list before any amount is looked at,
/// so a repeated id always reports `DuplicateIngredients`.
pub fn validate_ingredients(
    raw: &[RawIngredient],
) -> Result<Vec<IngredientAmount>, RecipesServiceError> {
    let mut seen = HashSet::with_capacity(raw.len());
    if !raw.iter().all(|item| seen.insert(item.id)) {
        return Err(RecipesServiceError::DuplicateIngredients);
    }
    raw.iter()
        .map(|item| {
            parse_positive(&item.amount)
                .map(|amount| IngredientAmount {
                    ingredient_id: item.id,
                    amount,
                })
                .ok_or(RecipesServiceError::InvalidAmount)
        })
        .collect()
}

pub fn validate_cooking_time(raw: &RawNumber) -> Result<i32, RecipesServiceError> {
    parse_positive(raw).ok_or(RecipesServiceError::InvalidCookingTime)
}

/// Collapse repeated tag ids, keeping first-seen order.
pub fn dedup_tag_ids(tag_ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(tag_ids.len());
    tag_ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Validate a username: 1-150 chars of letters, digits and `.@+-_`.
/// Reserved: "me" (collides with `/users/me`).
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.chars().count() > 150 {
        return false;
    }
    if username == "me" {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}

/// Minimal shape check: one `@` with non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Tag colors are `#RRGGBB` hex strings.
pub fn validate_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 200
        && slug
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Build a case-insensitive `LIKE` prefix pattern, escaping wildcards with `\`.
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
