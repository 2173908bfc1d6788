//! Auth types shared across Foodgram crates.
//!
//! Authentication itself happens at the gateway; this crate only reads the
//! identity the gateway forwards.

pub mod identity;
