use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::follow::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};
use foodgram_recipes::usecase::recipe::CreateRecipeUseCase;
use uuid::Uuid;

use crate::helpers::{InMemoryDb, amount, recipe_input};

fn subscribe(db: &InMemoryDb) -> SubscribeUseCase<InMemoryDb, InMemoryDb, InMemoryDb> {
    SubscribeUseCase {
        users: db.clone(),
        follows: db.clone(),
        recipes: db.clone(),
    }
}

fn unsubscribe(db: &InMemoryDb) -> UnsubscribeUseCase<InMemoryDb, InMemoryDb> {
    UnsubscribeUseCase {
        users: db.clone(),
        follows: db.clone(),
    }
}

async fn publish(db: &InMemoryDb, author_id: Uuid, count: usize) {
    let flour = db.add_ingredient("flour", "g");
    let create = CreateRecipeUseCase {
        recipes: db.clone(),
        tags: db.clone(),
        ingredients: db.clone(),
    };
    for i in 0..count {
        create
            .execute(
                author_id,
                recipe_input(&format!("R{i}"), &[], vec![amount(&flour, 10)]),
            )
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn should_never_follow_self() {
    let db = InMemoryDb::default();
    let user = db.add_user("solo");

    let result = subscribe(&db).execute(user.id, user.id, None).await;
    assert!(matches!(result, Err(RecipesServiceError::SelfSubscription)));
}

#[tokio::test]
async fn should_return_profile_with_capped_recipes() {
    let db = InMemoryDb::default();
    let author = db.add_user("chef");
    let fan = db.add_user("fan");
    publish(&db, author.id, 4).await;

    let profile = subscribe(&db)
        .execute(fan.id, author.id, Some(2))
        .await
        .unwrap();
    assert!(profile.author.is_subscribed);
    assert_eq!(profile.author.user.username, "chef");
    assert_eq!(profile.recipes_count, 4);
    let names: Vec<&str> = profile.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["R3", "R2"]);
}

#[tokio::test]
async fn should_reject_second_subscription() {
    let db = InMemoryDb::default();
    let author = db.add_user("chef");
    let fan = db.add_user("fan");

    subscribe(&db).execute(fan.id, author.id, None).await.unwrap();
    let again = subscribe(&db).execute(fan.id, author.id, None).await;
    assert!(matches!(again, Err(RecipesServiceError::AlreadySubscribed)));
}

#[tokio::test]
async fn should_return_user_not_found_for_missing_author() {
    let db = InMemoryDb::default();
    let fan = db.add_user("fan");

    let result = subscribe(&db).execute(fan.id, Uuid::new_v4(), None).await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
    let result = unsubscribe(&db).execute(fan.id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RecipesServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_reject_unsubscribe_without_edge() {
    let db = InMemoryDb::default();
    let author = db.add_user("chef");
    let fan = db.add_user("fan");

    let result = unsubscribe(&db).execute(fan.id, author.id).await;
    assert!(matches!(result, Err(RecipesServiceError::NotSubscribed)));

    subscribe(&db).execute(fan.id, author.id, None).await.unwrap();
    unsubscribe(&db).execute(fan.id, author.id).await.unwrap();
    let result = unsubscribe(&db).execute(fan.id, author.id).await;
    assert!(matches!(result, Err(RecipesServiceError::NotSubscribed)));
}

#[tokio::test]
async fn should_list_subscriptions_most_recent_first() {
    let db = InMemoryDb::default();
    let fan = db.add_user("fan");
    let first = db.add_user("first");
    let second = db.add_user("second");
    publish(&db, first.id, 3).await;

    subscribe(&db).execute(fan.id, first.id, None).await.unwrap();
    subscribe(&db).execute(fan.id, second.id, None).await.unwrap();

    let page = ListSubscriptionsUseCase {
        follows: db.clone(),
        recipes: db.clone(),
    }
    .execute(fan.id, PageRequest::default(), Some(1))
    .await
    .unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.results[0].author.user.id, second.id);
    assert_eq!(page.results[1].author.user.id, first.id);
    assert_eq!(page.results[1].recipes.len(), 1);
    assert_eq!(page.results[1].recipes_count, 3);
    assert!(page.results.iter().all(|p| p.author.is_subscribed));
}
