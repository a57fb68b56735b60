//! PostgreSQL repositories implementing the `ember-moderation` store traits.

pub mod accounts;
pub mod photos;

pub use accounts::PgRoleStore;
pub use photos::PgModerationStore;
