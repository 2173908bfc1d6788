use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_recipes::domain::repository::{
    FollowRepository, IngredientRepository, MembershipRepository, RecipeRepository,
    ShoppingListRepository, TagRepository, UserRepository,
};
use foodgram_recipes::domain::shopping_list::CartIngredientRow;
use foodgram_recipes::domain::types::{
    Ingredient, IngredientAmount, NewRecipe, RawIngredient, RawNumber, Recipe, RecipeChanges,
    RecipeFilter, RecipeIngredient, RecipeShort, SetKind, Tag, User,
};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::CreateRecipeInput;

// ── InMemoryDb ───────────────────────────────────────────────────────────────

#[derive(Clone)]
struct StoredRecipe {
    id: i32,
    author_id: Uuid,
    name: String,
    image: String,
    text: String,
    cooking_time: i32,
    tag_ids: Vec<i32>,
    ingredients: Vec<IngredientAmount>,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<StoredRecipe>,
    favorites: HashSet<(Uuid, i32)>,
    carts: HashSet<(Uuid, i32)>,
    /// (follower, author, followed_at)
    follows: Vec<(Uuid, Uuid, chrono::DateTime<Utc>)>,
    next_recipe_id: i32,
}

impl Tables {
    fn hydrate(&self, stored: &StoredRecipe) -> Recipe {
        Recipe {
            id: stored.id,
            author_id: stored.author_id,
            name: stored.name.clone(),
            image: stored.image.clone(),
            text: stored.text.clone(),
            cooking_time: stored.cooking_time,
            tags: stored
                .tag_ids
                .iter()
                .filter_map(|id| self.tags.iter().find(|t| t.id == *id).cloned())
                .collect(),
            ingredients: stored
                .ingredients
                .iter()
                .filter_map(|a| {
                    self.ingredients
                        .iter()
                        .find(|i| i.id == a.ingredient_id)
                        .map(|i| RecipeIngredient {
                            ingredient: i.clone(),
                            amount: a.amount,
                        })
                })
                .collect(),
            created_at: stored.created_at,
        }
    }

    /// Newest first, like the database ordering.
    fn recipes_newest_first(&self) -> Vec<&StoredRecipe> {
        let mut recipes: Vec<&StoredRecipe> = self.recipes.iter().collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recipes
    }
}

/// Shared in-memory storage implementing every repository trait.
/// Clones share the same tables, so one instance can back several use cases.
#[derive(Clone, Default)]
pub struct InMemoryDb {
    tables: Arc<Mutex<Tables>>,
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    Page {
        count: items.len() as u64,
        results: items
            .iter()
            .skip(page.offset() as usize)
            .take(page.clamped().limit as usize)
            .cloned()
            .collect(),
    }
}

impl UserRepository for InMemoryDb {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        Ok(self.tables.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut users = tables.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(&users, page))
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email || u.username == user.username)
        {
            return Err(RecipesServiceError::UserAlreadyExists);
        }
        tables.users.push(user.clone());
        Ok(())
    }
}

impl TagRepository for InMemoryDb {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        Ok(self.tables.lock().unwrap().tags.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        Ok(self.tables.lock().unwrap().tags.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<Tag, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .tags
            .iter()
            .any(|t| t.name == name || t.color == color || t.slug == slug)
        {
            return Err(RecipesServiceError::TagAlreadyExists);
        }
        let tag = Tag {
            id: tables.tags.len() as i32 + 1,
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        };
        tables.tags.push(tag.clone());
        Ok(tag)
    }
}

impl IngredientRepository for InMemoryDb {
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let prefix = prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = tables
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .ingredients
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .ingredients
            .iter()
            .any(|i| i.name == name && i.measurement_unit == measurement_unit)
        {
            return Err(RecipesServiceError::IngredientAlreadyExists);
        }
        let ingredient = Ingredient {
            id: tables.ingredients.len() as i32 + 1,
            name: name.to_owned(),
            measurement_unit: measurement_unit.to_owned(),
        };
        tables.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }
}

impl RecipeRepository for InMemoryDb {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| tables.hydrate(r)))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let matching: Vec<Recipe> = tables
            .recipes_newest_first()
            .into_iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || r.tag_ids.iter().any(|id| {
                        tables
                            .tags
                            .iter()
                            .any(|t| t.id == *id && filter.tag_slugs.contains(&t.slug))
                    })
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| tables.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .is_none_or(|u| tables.carts.contains(&(u, r.id)))
            })
            .map(|r| tables.hydrate(r))
            .collect();
        Ok(paginate(&matching, page))
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == recipe.author_id) {
            return Err(RecipesServiceError::UserNotFound);
        }
        tables.next_recipe_id += 1;
        let id = tables.next_recipe_id;
        // Strictly increasing timestamps keep "newest first" deterministic.
        let stored = StoredRecipe {
            id,
            author_id: recipe.author_id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
            tag_ids: recipe.tag_ids.clone(),
            ingredients: recipe.ingredients.clone(),
            created_at: Utc::now() + Duration::milliseconds(i64::from(id)),
        };
        let hydrated = tables.hydrate(&stored);
        tables.recipes.push(stored);
        Ok(hydrated)
    }

    async fn update(
        &self,
        id: i32,
        changes: &RecipeChanges,
    ) -> Result<Recipe, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        if let Some(name) = &changes.name {
            stored.name = name.clone();
        }
        if let Some(image) = &changes.image {
            stored.image = image.clone();
        }
        if let Some(text) = &changes.text {
            stored.text = text.clone();
        }
        if let Some(cooking_time) = changes.cooking_time {
            stored.cooking_time = cooking_time;
        }
        stored.tag_ids = changes.tag_ids.clone();
        stored.ingredients = changes.ingredients.clone();
        let stored = stored.clone();
        Ok(tables.hydrate(&stored))
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.recipes.len();
        tables.recipes.retain(|r| r.id != id);
        // Cascade, as the foreign keys do.
        tables.favorites.retain(|(_, recipe_id)| *recipe_id != id);
        tables.carts.retain(|(_, recipe_id)| *recipe_id != id);
        Ok(tables.recipes.len() != before)
    }

    async fn list_short_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeShort>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipes_newest_first()
            .into_iter()
            .filter(|r| r.author_id == author_id)
            .take(limit.map_or(usize::MAX, |l| l as usize))
            .map(|r| tables.hydrate(r).short())
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .count() as u64)
    }
}

impl MembershipRepository for InMemoryDb {
    async fn add(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(RecipesServiceError::UserNotFound);
        }
        let set = match kind {
            SetKind::Favorite => &mut tables.favorites,
            SetKind::Cart => &mut tables.carts,
        };
        Ok(set.insert((user_id, recipe_id)))
    }

    async fn remove(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let set = match kind {
            SetKind::Favorite => &mut tables.favorites,
            SetKind::Cart => &mut tables.carts,
        };
        Ok(set.remove(&(user_id, recipe_id)))
    }

    async fn recipe_ids_among(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let set = match kind {
            SetKind::Favorite => &tables.favorites,
            SetKind::Cart => &tables.carts,
        };
        Ok(recipe_ids
            .iter()
            .copied()
            .filter(|id| set.contains(&(user_id, *id)))
            .collect())
    }
}

impl FollowRepository for InMemoryDb {
    async fn create(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(RecipesServiceError::UserNotFound);
        }
        if tables
            .follows
            .iter()
            .any(|(u, a, _)| *u == user_id && *a == author_id)
        {
            return Ok(false);
        }
        let followed_at = Utc::now() + Duration::milliseconds(tables.follows.len() as i64);
        tables.follows.push((user_id, author_id, followed_at));
        Ok(true)
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.follows.len();
        tables
            .follows
            .retain(|(u, a, _)| !(*u == user_id && *a == author_id));
        Ok(tables.follows.len() != before)
    }

    async fn followed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .follows
            .iter()
            .filter(|(u, a, _)| *u == user_id && author_ids.contains(a))
            .map(|(_, a, _)| *a)
            .collect())
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        let mut edges: Vec<_> = tables
            .follows
            .iter()
            .filter(|(u, _, _)| *u == user_id)
            .collect();
        edges.sort_by(|a, b| b.2.cmp(&a.2));
        let by_id: HashMap<Uuid, &User> = tables.users.iter().map(|u| (u.id, u)).collect();
        let authors: Vec<User> = edges
            .iter()
            .filter_map(|(_, a, _)| by_id.get(a).map(|u| (*u).clone()))
            .collect();
        Ok(paginate(&authors, page))
    }
}

impl ShoppingListRepository for InMemoryDb {
    async fn cart_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartIngredientRow>, RecipesServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .recipes
            .iter()
            .filter(|r| tables.carts.contains(&(user_id, r.id)))
            .flat_map(|r| tables.hydrate(r).ingredients)
            .map(|item| CartIngredientRow {
                name: item.ingredient.name,
                measurement_unit: item.ingredient.measurement_unit,
                amount: item.amount,
            })
            .collect())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

impl InMemoryDb {
    pub fn add_user(&self, username: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: username.to_owned(),
            last_name: "Tester".to_owned(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn add_tag(&self, slug: &str) -> Tag {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.tags.len() as i32 + 1;
        let tag = Tag {
            id,
            name: slug.to_owned(),
            color: format!("#{id:06X}"),
            slug: slug.to_owned(),
        };
        tables.tags.push(tag.clone());
        tag
    }

    pub fn add_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut tables = self.tables.lock().unwrap();
        let ingredient = Ingredient {
            id: tables.ingredients.len() as i32 + 1,
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        };
        tables.ingredients.push(ingredient.clone());
        ingredient
    }

    pub fn favorites_count(&self) -> usize {
        self.tables.lock().unwrap().favorites.len()
    }

    pub fn carts_count(&self) -> usize {
        self.tables.lock().unwrap().carts.len()
    }
}

pub fn amount(ingredient: &Ingredient, amount: i64) -> RawIngredient {
    RawIngredient {
        id: ingredient.id,
        amount: RawNumber::Integer(amount),
    }
}

pub fn recipe_input(
    name: &str,
    tags: &[&Tag],
    ingredients: Vec<RawIngredient>,
) -> CreateRecipeInput {
    CreateRecipeInput {
        name: name.to_owned(),
        image: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
        text: format!("How to cook {name}."),
        cooking_time: RawNumber::Integer(25),
        tags: tags.iter().map(|t| t.id).collect(),
        ingredients,
    }
}
