//! # ember-common
//!
//! Shared types, configuration, error handling, and utilities used across all
//! Ember admin crates. This is the foundation layer — no business logic, just
//! primitives and contracts.

pub mod capability;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;
