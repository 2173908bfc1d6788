use sea_orm::Database;
use tracing::info;

use foodgram_core::tracing::init_tracing;
use foodgram_recipes::config::RecipesConfig;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecipesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState::new(db, &config.shopping_list_filename);
    let router = build_router(state);

    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
