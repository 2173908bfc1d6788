use uuid::Uuid;

use crate::domain::repository::ShoppingListRepository;
use crate::domain::shopping_list::render;
use crate::error::RecipesServiceError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<R: ShoppingListRepository> {
    pub repo: R,
}

impl<R: ShoppingListRepository> DownloadShoppingListUseCase<R> {
    /// Aggregated plain-text list for everything in the user's cart.
    pub async fn execute(&self, user_id: Uuid) -> Result<String, RecipesServiceError> {
        let rows = self.repo.cart_ingredients(user_id).await?;
        let row_count = rows.len();
        let text = render(rows)?;
        tracing::info!(%user_id, rows = row_count, "shopping list generated");
        Ok(text)
    }
}
