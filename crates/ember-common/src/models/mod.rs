//! Core domain models shared across the Ember admin crates.
//!
//! These are the "truth" types — what the database stores and the API serializes.

pub mod account;
pub mod photo;

/// Re-export all model types for convenience.
pub use account::*;
pub use photo::*;
