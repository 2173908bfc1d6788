use std::collections::BTreeMap;

use crate::error::RecipesServiceError;

pub const SHOPPING_LIST_HEADER: &str = "Shopping list";

/// One ingredient line of one recipe in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredientRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Summed amount of one (name, unit) pair across the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

/// Group rows by (name, unit) and sum amounts, ordered by name then unit.
pub fn aggregate(rows: Vec<CartIngredientRow>) -> Vec<ShoppingListItem> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for row in rows {
        *totals.entry((row.name, row.measurement_unit)).or_default() += i64::from(row.amount);
    }
    totals
        .into_iter()
        .map(|((name, measurement_unit), total)| ShoppingListItem {
            name,
            measurement_unit,
            total,
        })
        .collect()
}

/// Render the downloadable plain-text list.
///
/// Fails with `ShoppingCartEmpty` when there is nothing to buy.
pub fn render(rows: Vec<CartIngredientRow>) -> Result<String, RecipesServiceError> {
    let items = aggregate(rows);
    if items.is_empty() {
        return Err(RecipesServiceError::ShoppingCartEmpty);
    }
    let lines: Vec<String> = std::iter::once(SHOPPING_LIST_HEADER.to_owned())
        .chain(
            items
                .iter()
                .map(|item| format!("{} - {} {}", item.name, item.total, item.measurement_unit)),
        )
        .collect();
    Ok(lines.join("\n"))
}
