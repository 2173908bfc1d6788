//! Domain types shared across Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; handlers only use the wire shapes.

pub mod pagination;
pub mod user;
