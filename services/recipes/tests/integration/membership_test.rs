use foodgram_recipes::domain::types::SetKind;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::membership::{AddToSetUseCase, RemoveFromSetUseCase};
use foodgram_recipes::usecase::recipe::CreateRecipeUseCase;

use crate::helpers::{InMemoryDb, amount, recipe_input};

async fn seed_recipe(db: &InMemoryDb) -> i32 {
    let author = db.add_user("chef");
    let flour = db.add_ingredient("flour", "g");
    CreateRecipeUseCase {
        recipes: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
    }
    .execute(author.id, recipe_input("Bread", &[], vec![amount(&flour, 500)]))
    .await
    .unwrap()
    .id
}

fn add(db: &InMemoryDb) -> AddToSetUseCase<InMemoryDb, InMemoryDb> {
    AddToSetUseCase {
        recipes: db.clone(),
        memberships: db.clone(),
    }
}

fn remove(db: &InMemoryDb) -> RemoveFromSetUseCase<InMemoryDb, InMemoryDb> {
    RemoveFromSetUseCase {
        recipes: db.clone(),
        memberships: db.clone(),
    }
}

#[tokio::test]
async fn should_return_short_projection_on_add() {
    let db = InMemoryDb::default();
    let recipe_id = seed_recipe(&db).await;
    let user = db.add_user("fan");

    let short = add(&db)
        .execute(SetKind::Cart, user.id, recipe_id)
        .await
        .unwrap();
    assert_eq!(short.id, recipe_id);
    assert_eq!(short.name, "Bread");
    assert_eq!(short.cooking_time, 25);
}

#[tokio::test]
async fn should_conflict_when_favoriting_twice() {
    let db = InMemoryDb::default();
    let recipe_id = seed_recipe(&db).await;
    let user = db.add_user("fan");

    add(&db)
        .execute(SetKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    let second = add(&db).execute(SetKind::Favorite, user.id, recipe_id).await;
    assert!(matches!(second, Err(RecipesServiceError::AlreadyInFavorites)));
}

#[tokio::test]
async fn should_allow_refavorite_after_removal() {
    let db = InMemoryDb::default();
    let recipe_id = seed_recipe(&db).await;
    let user = db.add_user("fan");

    add(&db)
        .execute(SetKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    remove(&db)
        .execute(SetKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    add(&db)
        .execute(SetKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    assert_eq!(db.favorites_count(), 1);
}

#[tokio::test]
async fn should_keep_favorites_and_cart_independent() {
    let db = InMemoryDb::default();
    let recipe_id = seed_recipe(&db).await;
    let user = db.add_user("fan");

    add(&db)
        .execute(SetKind::Favorite, user.id, recipe_id)
        .await
        .unwrap();
    add(&db)
        .execute(SetKind::Cart, user.id, recipe_id)
        .await
        .unwrap();
    assert_eq!(db.favorites_count(), 1);
    assert_eq!(db.carts_count(), 1);
}

#[tokio::test]
async fn should_report_absent_membership_on_remove() {
    let db = InMemoryDb::default();
    let recipe_id = seed_recipe(&db).await;
    let user = db.add_user("fan");

    let result = remove(&db).execute(SetKind::Cart, user.id, recipe_id).await;
    assert!(matches!(result, Err(RecipesServiceError::NotInShoppingCart)));
}

#[tokio::test]
async fn should_return_recipe_not_found_before_membership_checks() {
    let db = InMemoryDb::default();
    let user = db.add_user("fan");

    let added = add(&db).execute(SetKind::Favorite, user.id, 999).await;
    assert!(matches!(added, Err(RecipesServiceError::RecipeNotFound)));
    let removed = remove(&db).execute(SetKind::Favorite, user.id, 999).await;
    assert!(matches!(removed, Err(RecipesServiceError::RecipeNotFound)));
}
