/// Recipes service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `RECIPES_PORT`.
    pub recipes_port: u16,
    /// Attachment filename for `GET /recipes/download_shopping_cart`.
    /// Env var: `SHOPPING_LIST_FILENAME`.
    pub shopping_list_filename: String,
}

pub const DEFAULT_SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

impl RecipesConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            recipes_port: std::env::var("RECIPES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            shopping_list_filename: std::env::var("SHOPPING_LIST_FILENAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SHOPPING_LIST_FILENAME.to_owned()),
        }
    }
}
