//! Photo model — user-submitted profile photos awaiting moderation.
//!
//! Photos are uploaded through the profile service (out of scope here) and
//! enter the moderation queue with `is_approved = false`. The binary lives in
//! object storage under `storage_key`; this record tracks the metadata and the
//! approval state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A photo record in the moderation queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PhotoRecord {
    /// Unique photo ID. Never reused once the record is deleted.
    pub id: Uuid,

    /// Owning account
    pub user_id: Uuid,

    /// Owning account's username (joined in; the moderation listing orders by it)
    pub username: String,

    /// Public URL of the photo
    pub url: String,

    /// Object-storage key of the binary. `None` for legacy records whose
    /// binary was never migrated to object storage; rejecting those deletes
    /// the record directly without an asset-store call.
    pub storage_key: Option<String>,

    /// Whether a moderator has approved this photo
    pub is_approved: bool,

    /// Submission timestamp
    pub added_at: DateTime<Utc>,
}
