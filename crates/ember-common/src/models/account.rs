//! Account model — the slice of the identity layer this subsystem reads.
//!
//! Accounts are owned by the identity service; the admin subsystem references
//! them for role assignment and photo ownership but never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account, as seen by the admin subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID v7 — time-sortable)
    pub id: Uuid,

    /// Unique username
    pub username: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An account joined with its role names, for the admin listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AccountWithRoles {
    pub id: Uuid,
    pub username: String,
    /// Role names held by this account, sorted ascending.
    pub roles: Vec<String>,
}
