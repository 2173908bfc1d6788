use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionError,
    TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, OnConflict, Query},
};
use uuid::Uuid;

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_recipes_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    tags, users,
};

use crate::domain::repository::{
    FollowRepository, IngredientRepository, MembershipRepository, RecipeRepository,
    ShoppingListRepository, TagRepository, UserRepository,
};
use crate::domain::shopping_list::CartIngredientRow;
use crate::domain::types::{
    Ingredient, IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeFilter,
    RecipeIngredient, RecipeShort, SetKind, Tag, User, like_prefix_pattern,
};
use crate::error::RecipesServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Name the missing row from the violated constraint (see the migrations).
fn missing_reference(message: &str) -> Option<RecipesServiceError> {
    const USER_KEYS: [&str; 5] = [
        "fk_recipes_author_id",
        "fk_favorites_user_id",
        "fk_shopping_carts_user_id",
        "fk_follows_user_id",
        "fk_follows_author_id",
    ];
    const RECIPE_KEYS: [&str; 4] = [
        "fk_favorites_recipe_id",
        "fk_shopping_carts_recipe_id",
        "fk_recipe_tags_recipe_id",
        "fk_recipe_ingredients_recipe_id",
    ];
    if message.contains("fk_recipe_tags_tag_id") {
        Some(RecipesServiceError::TagNotFound)
    } else if message.contains("fk_recipe_ingredients_ingredient_id") {
        Some(RecipesServiceError::IngredientNotFound)
    } else if RECIPE_KEYS.iter().any(|key| message.contains(key)) {
        Some(RecipesServiceError::RecipeNotFound)
    } else if USER_KEYS.iter().any(|key| message.contains(key)) {
        Some(RecipesServiceError::UserNotFound)
    } else {
        None
    }
}

/// Map a unique violation to `conflict`, anything else to `Internal`.
fn unique_or_internal(
    err: DbErr,
    conflict: RecipesServiceError,
    context: &'static str,
) -> RecipesServiceError {
    if is_unique_violation(&err) {
        conflict
    } else {
        anyhow::Error::new(err).context(context).into()
    }
}

/// Inserts referencing a row that is gone (or a user without a profile yet)
/// fail on a foreign key; anything unrecognised is internal.
fn missing_reference_or_internal(err: DbErr, context: &'static str) -> RecipesServiceError {
    if let Some(SqlErr::ForeignKeyConstraintViolation(message)) = err.sql_err() {
        if let Some(missing) = missing_reference(&message) {
            return missing;
        }
    }
    anyhow::Error::new(err).context(context).into()
}

fn transaction_error(
    err: TransactionError<DbErr>,
    context: &'static str,
) -> RecipesServiceError {
    match err {
        TransactionError::Transaction(db) => missing_reference_or_internal(db, context),
        other => anyhow::Error::new(other).context(context).into(),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RecipesServiceError> {
        let query = users::Entity::find();
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = query
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page {
            count,
            results: models.into_iter().map(user_from_model).collect(),
        })
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, RecipesServiceError::UserAlreadyExists, "create user"))?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn create(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<Tag, RecipesServiceError> {
        let model = tags::ActiveModel {
            name: Set(name.to_owned()),
            color: Set(color.to_owned()),
            slug: Set(slug.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, RecipesServiceError::TagAlreadyExists, "create tag"))?;
        Ok(tag_from_model(model))
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(&self, prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = prefix {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)))
                    .like(LikeExpr::new(like_prefix_pattern(prefix)).escape('\\')),
            );
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&self.db)
            .await
            .context("search ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<Ingredient, RecipesServiceError> {
        let model = ingredients::ActiveModel {
            name: Set(name.to_owned()),
            measurement_unit: Set(measurement_unit.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            unique_or_internal(
                e,
                RecipesServiceError::IngredientAlreadyExists,
                "create ingredient",
            )
        })?;
        Ok(ingredient_from_model(model))
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

/// Clear a recipe's tag and ingredient rows, then insert the given ones.
/// Runs on the caller's connection so it joins the caller's transaction.
pub async fn replace_associations<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
    amounts: &[IngredientAmount],
) -> Result<(), DbErr> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    // insert_many rejects an empty batch.
    if !tag_ids.is_empty() {
        recipe_tags::Entity::insert_many(tag_ids.iter().map(|tag_id| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(*tag_id),
        }))
        .exec_without_returning(conn)
        .await?;
    }
    if !amounts.is_empty() {
        recipe_ingredients::Entity::insert_many(amounts.iter().map(|a| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(a.ingredient_id),
                amount: Set(a.amount),
                ..Default::default()
            }
        }))
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

/// Load tags and ingredients for the given rows, keeping row order.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<recipes::Model>,
) -> Result<Vec<Recipe>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let tag_rows = recipe_tags::Entity::find()
        .filter(recipe_tags::Column::RecipeId.is_in(ids.iter().copied()))
        .order_by_asc(recipe_tags::Column::TagId)
        .find_also_related(tags::Entity)
        .all(conn)
        .await?;
    let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (link, tag) in tag_rows {
        if let Some(tag) = tag {
            tags_by_recipe
                .entry(link.recipe_id)
                .or_default()
                .push(tag_from_model(tag));
        }
    }

    let ingredient_rows = recipe_ingredients::Entity::find()
        .filter(recipe_ingredients::Column::RecipeId.is_in(ids.iter().copied()))
        .order_by_asc(recipe_ingredients::Column::Id)
        .find_also_related(ingredients::Entity)
        .all(conn)
        .await?;
    let mut ingredients_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
    for (row, ingredient) in ingredient_rows {
        if let Some(ingredient) = ingredient {
            ingredients_by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient: ingredient_from_model(ingredient),
                    amount: row.amount,
                });
        }
    }

    Ok(models
        .into_iter()
        .map(|model| Recipe {
            tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
            ingredients: ingredients_by_recipe.remove(&model.id).unwrap_or_default(),
            id: model.id,
            author_id: model.author_id,
            name: model.name,
            image: model.image,
            text: model.text,
            cooking_time: model.cooking_time,
            created_at: model.created_at,
        })
        .collect())
}

async fn hydrate_one<C: ConnectionTrait>(conn: &C, model: recipes::Model) -> Result<Recipe, DbErr> {
    let id = model.id;
    hydrate(conn, vec![model])
        .await?
        .pop()
        .ok_or_else(|| DbErr::RecordNotFound(format!("recipe {id}")))
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        let recipe = hydrate_one(&self.db, model)
            .await
            .context("load recipe associations")?;
        Ok(Some(recipe))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipesServiceError> {
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author_id {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tag_slugs.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tag_slugs.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(Expr::col(favorites::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        let results = hydrate(&self.db, models)
            .await
            .context("load recipe list associations")?;
        Ok(Page { count, results })
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipesServiceError> {
        let recipe = recipe.clone();
        self.db
            .transaction::<_, Recipe, DbErr>(|txn| {
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(recipe.author_id),
                        name: Set(recipe.name),
                        image: Set(recipe.image),
                        text: Set(recipe.text),
                        cooking_time: Set(recipe.cooking_time),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_associations(txn, model.id, &recipe.tag_ids, &recipe.ingredients)
                        .await?;
                    hydrate_one(txn, model).await
                })
            })
            .await
            .map_err(|e| transaction_error(e, "create recipe"))
    }

    async fn update(
        &self,
        id: i32,
        changes: &RecipeChanges,
    ) -> Result<Recipe, RecipesServiceError> {
        let changes = changes.clone();
        self.db
            .transaction::<_, Recipe, DbErr>(|txn| {
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Set(id),
                        ..Default::default()
                    };
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(image) = changes.image {
                        am.image = Set(image);
                    }
                    if let Some(text) = changes.text {
                        am.text = Set(text);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }
                    replace_associations(txn, id, &changes.tag_ids, &changes.ingredients).await?;

                    let model = recipes::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| DbErr::RecordNotFound(format!("recipe {id}")))?;
                    hydrate_one(txn, model).await
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(DbErr::RecordNotFound(_)) => {
                    RecipesServiceError::RecipeNotFound
                }
                other => transaction_error(other, "update recipe"),
            })
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        // Tag links, ingredient rows, favorites and cart rows go with it (ON DELETE CASCADE).
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_short_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipeShort>, RecipesServiceError> {
        let models = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models
            .into_iter()
            .map(|m| RecipeShort {
                id: m.id,
                name: m.name,
                image: m.image,
                cooking_time: m.cooking_time,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(count)
    }
}

// ── Membership repository (favorites + shopping cart) ───────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl MembershipRepository for DbMembershipRepository {
    async fn add(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let now = Utc::now();
        // ON CONFLICT DO NOTHING: an existing pair (or a concurrent duplicate) inserts zero rows.
        let inserted = match kind {
            SetKind::Favorite => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            SetKind::Cart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .map_err(|e| missing_reference_or_internal(e, "add recipe to set"))?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, RecipesServiceError> {
        let result = match kind {
            SetKind::Favorite => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
            SetKind::Cart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .context("remove recipe from set")?;
        Ok(result.rows_affected > 0)
    }

    async fn recipe_ids_among(
        &self,
        kind: SetKind,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids: Vec<i32> = match kind {
            SetKind::Favorite => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
            SetKind::Cart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
        }
        .context("find recipe set membership")?;
        Ok(ids.into_iter().collect())
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn create(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let inserted = follows::Entity::insert(follows::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::UserId, follows::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| missing_reference_or_internal(e, "create follow"))?;
        Ok(inserted > 0)
    }

    async fn delete(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RecipesServiceError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::UserId.eq(user_id))
            .filter(follows::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn followed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, RecipesServiceError> {
        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids: Vec<Uuid> = follows::Entity::find()
            .select_only()
            .column(follows::Column::AuthorId)
            .filter(follows::Column::UserId.eq(user_id))
            .filter(follows::Column::AuthorId.is_in(author_ids.iter().copied()))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("find followed authors")?;
        Ok(ids.into_iter().collect())
    }

    async fn list_authors(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RecipesServiceError> {
        let query = follows::Entity::find().filter(follows::Column::UserId.eq(user_id));
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count follows")?;
        let author_ids: Vec<Uuid> = query
            .select_only()
            .column(follows::Column::AuthorId)
            .order_by_desc(follows::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("list followed author ids")?;
        if author_ids.is_empty() {
            return Ok(Page {
                count,
                results: Vec::new(),
            });
        }

        let mut by_id: HashMap<Uuid, User> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("load followed authors")?
            .into_iter()
            .map(|m| (m.id, user_from_model(m)))
            .collect();
        let results = author_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();
        Ok(Page { count, results })
    }
}

// ── Shopping list repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShoppingListRepository {
    pub db: DatabaseConnection,
}

impl ShoppingListRepository for DbShoppingListRepository {
    async fn cart_ingredients(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CartIngredientRow>, RecipesServiceError> {
        let rows: Vec<(String, String, i32)> = recipe_ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Name)
            .column(ingredients::Column::MeasurementUnit)
            .column(recipe_ingredients::Column::Amount)
            .inner_join(ingredients::Entity)
            .filter(
                recipe_ingredients::Column::RecipeId.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
                        .to_owned(),
                ),
            )
            .into_tuple::<(String, String, i32)>()
            .all(&self.db)
            .await
            .context("load shopping cart ingredients")?;
        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| CartIngredientRow {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }
}
