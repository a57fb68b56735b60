//! # ember-moderation
//!
//! The admin subsystem's service layer: role assignment, photo moderation, and
//! the read-only admin queries. Services are generic over the store traits in
//! [`store`], so the PostgreSQL and object-storage backends in `ember-db` stay
//! swappable for in-memory doubles in tests.

pub mod photos;
pub mod query;
pub mod roles;
pub mod store;

pub use photos::ModerationService;
pub use query::AdminQueryService;
pub use roles::RoleService;

#[cfg(test)]
mod testing;
