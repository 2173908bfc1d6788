use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::{Value, json};

use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;
use foodgram_testing::auth::MockAuth;

/// Router over a database that refuses every query, so each case must
/// resolve before storage is touched.
fn server() -> TestServer {
    TestServer::new(build_router(AppState::disconnected())).unwrap()
}

fn with_identity(mut request: TestRequest, auth: &MockAuth) -> TestRequest {
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    request
}

fn recipe_body(ingredients: Value) -> Value {
    json!({
        "name": "Pancakes",
        "image": "data:image/png;base64,iVBORw0KGgo=",
        "text": "Mix and fry.",
        "cooking_time": 10,
        "tags": [1],
        "ingredients": ingredients,
    })
}

#[tokio::test]
async fn should_answer_liveness_without_database() {
    let response = server().get("/healthz").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_when_database_is_down() {
    let response = server().get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let response = server().get("/healthz").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn should_require_identity_for_recipe_creation() {
    let response = server()
        .post("/recipes")
        .json(&recipe_body(json!([{ "id": 1, "amount": 10 }])))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_identity() {
    let response = server()
        .get("/users/me")
        .add_header(
            HeaderName::from_static("x-foodgram-user-id"),
            HeaderValue::from_static("not-a-uuid"),
        )
        .add_header(
            HeaderName::from_static("x-foodgram-user-role"),
            HeaderValue::from_static("0"),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_duplicate_ingredients() {
    let auth = MockAuth::user();
    let request = server().post("/recipes").json(&recipe_body(json!([
        { "id": 1, "amount": 10 },
        { "id": 2, "amount": 5 },
        { "id": 1, "amount": 3 },
    ])));
    let response = with_identity(request, &auth).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "DUPLICATE_INGREDIENTS");
}

#[tokio::test]
async fn should_reject_zero_and_textual_amounts() {
    let auth = MockAuth::user();
    for amount in [json!(0), json!("ten"), json!(null)] {
        let request = server()
            .post("/recipes")
            .json(&recipe_body(json!([{ "id": 1, "amount": amount }])));
        let response = with_identity(request, &auth).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["kind"], "INVALID_AMOUNT");
    }
}

#[tokio::test]
async fn should_reject_unparseable_recipe_payload() {
    let auth = MockAuth::user();
    let request = server().post("/recipes").json(&json!({ "name": "Only a name" }));
    let response = with_identity(request, &auth).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn should_require_image_field() {
    let auth = MockAuth::user();
    let mut body = recipe_body(json!([{ "id": 1, "amount": 10 }]));
    body.as_object_mut().unwrap().remove("image");
    let request = server().post("/recipes").json(&body);
    let response = with_identity(request, &auth).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn should_forbid_tag_creation_for_regular_users() {
    let auth = MockAuth::user();
    let request = server()
        .post("/tags")
        .json(&json!({ "name": "Lunch", "color": "#E26C2D", "slug": "lunch" }));
    let response = with_identity(request, &auth).await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_self_subscription() {
    let auth = MockAuth::user();
    let request = server().post(&format!("/users/{}/subscribe", auth.user_id));
    let response = with_identity(request, &auth).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SELF_SUBSCRIPTION");
}

#[tokio::test]
async fn should_reject_reserved_username() {
    let auth = MockAuth::user();
    let request = server().post("/users").json(&json!({
        "email": "me@example.com",
        "username": "me",
        "first_name": "Mo",
        "last_name": "E",
    }));
    let response = with_identity(request, &auth).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_USERNAME");
}

#[tokio::test]
async fn should_return_empty_page_for_anonymous_favorites_filter() {
    let response = server()
        .get("/recipes")
        .add_query_param("is_favorited", "1")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn should_require_identity_for_shopping_list_download() {
    let response = server().get("/recipes/download_shopping_cart").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
