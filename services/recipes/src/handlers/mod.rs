pub mod catalog;
pub mod follow;
pub mod health;
pub mod membership;
pub mod recipe;
pub mod shopping_list;
pub mod user;

use serde::Deserialize;

use foodgram_domain::pagination::PageRequest;

use crate::domain::types::RawNumber;

/// `?page=&limit=` query parameters shared by every paginated endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

pub fn page_request(page: Option<u32>, limit: Option<u32>) -> PageRequest {
    let defaults = PageRequest::default();
    PageRequest {
        page: page.unwrap_or(defaults.page),
        limit: limit.unwrap_or(defaults.limit),
    }
    .clamped()
}

/// Boolean query flags arrive as `1` / `0` (or `true` / `false`).
pub fn query_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}

/// A JSON number field that clients may also send as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Int(i64),
    Text(String),
    Other(serde_json::Value),
}

impl From<NumberField> for RawNumber {
    fn from(value: NumberField) -> Self {
        match value {
            NumberField::Int(n) => RawNumber::Integer(n),
            NumberField::Text(s) => RawNumber::Text(s),
            NumberField::Other(_) => RawNumber::Other,
        }
    }
}
