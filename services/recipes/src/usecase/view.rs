//! Read-side projections that depend on who is asking.
//!
//! The viewer is always an explicit `Option<Uuid>`; anonymous callers see
//! every `is_*` flag as `false`.

use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use uuid::Uuid;

use crate::domain::repository::{FollowRepository, MembershipRepository, UserRepository};
use crate::domain::types::{Recipe, RecipeShort, SetKind, User};
use crate::error::RecipesServiceError;

/// A user as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub user: User,
    pub is_subscribed: bool,
}

/// A recipe with its author and the viewer's membership flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: UserView,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Followed author with their newest recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    pub author: UserView,
    pub recipes: Vec<RecipeShort>,
    pub recipes_count: u64,
}

pub struct RecipePresenter<U, M, F>
where
    U: UserRepository,
    M: MembershipRepository,
    F: FollowRepository,
{
    pub users: U,
    pub memberships: M,
    pub follows: F,
}

impl<U, M, F> RecipePresenter<U, M, F>
where
    U: UserRepository,
    M: MembershipRepository,
    F: FollowRepository,
{
    pub async fn present_one(
        &self,
        viewer: Option<Uuid>,
        recipe: Recipe,
    ) -> Result<RecipeView, RecipesServiceError> {
        let mut views = self.present(viewer, vec![recipe]).await?;
        views
            .pop()
            .ok_or_else(|| anyhow!("presenter dropped a recipe").into())
    }

    /// Build read views, keeping input order. Lookups are batched per call.
    pub async fn present(
        &self,
        viewer: Option<Uuid>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids = unique(recipes.iter().map(|r| r.author_id));
        let authors: HashMap<Uuid, User> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let (followed, favorited, in_cart) = match viewer {
            Some(viewer) => (
                self.follows.followed_among(viewer, &author_ids).await?,
                self.memberships
                    .recipe_ids_among(SetKind::Favorite, viewer, &recipe_ids)
                    .await?,
                self.memberships
                    .recipe_ids_among(SetKind::Cart, viewer, &recipe_ids)
                    .await?,
            ),
            None => (HashSet::new(), HashSet::new(), HashSet::new()),
        };

        recipes
            .into_iter()
            .map(|recipe| -> Result<RecipeView, RecipesServiceError> {
                let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                    anyhow!("author {} of recipe {} missing", recipe.author_id, recipe.id)
                })?;
                Ok(RecipeView {
                    author: UserView {
                        is_subscribed: followed.contains(&author.id),
                        user: author,
                    },
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                    recipe,
                })
            })
            .collect()
    }
}

/// Attach `is_subscribed` for the viewer to each user.
pub async fn present_users<F: FollowRepository>(
    follows: &F,
    viewer: Option<Uuid>,
    users: Vec<User>,
) -> Result<Vec<UserView>, RecipesServiceError> {
    let followed = match viewer {
        Some(viewer) if !users.is_empty() => {
            let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
            follows.followed_among(viewer, &ids).await?
        }
        _ => HashSet::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserView {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

fn unique<T: Copy + Eq + std::hash::Hash>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(*item)).collect()
}
