pub mod catalog;
pub mod follow;
pub mod membership;
pub mod recipe;
pub mod shopping_list;
pub mod user;
pub mod view;
