//! Photo repository — the PostgreSQL [`ModerationStore`].
//!
//! Moderation transitions run inside a transaction: `get` takes a row lock
//! (`FOR UPDATE`), so a concurrent approve and reject of the same photo
//! serialize at the database and exactly one wins. The loser's conditioned
//! update/delete matches no row, which the service reports as "photo not
//! found" rather than a silent no-op.

use async_trait::async_trait;
use ember_common::error::AdminError;
use ember_common::models::PhotoRecord;
use ember_moderation::store::{ModerationStore, ModerationUow};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// [`ModerationStore`] backed by the `photos` table.
#[derive(Debug, Clone)]
pub struct PgModerationStore {
    pool: PgPool,
}

impl PgModerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModerationStore for PgModerationStore {
    type Uow = PgModerationUow;

    /// Unapproved photos with their owner's username. Profile queries filter
    /// to approved photos; this listing deliberately does not.
    async fn list_pending(&self) -> Result<Vec<PhotoRecord>, AdminError> {
        let pending = sqlx::query_as::<_, PhotoRecord>(
            r#"
            SELECT p.id, p.user_id, u.username, p.url, p.storage_key, p.is_approved, p.added_at
            FROM photos p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_approved = FALSE
            ORDER BY u.username ASC, p.added_at DESC, p.seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(pending)
    }

    async fn begin(&self) -> Result<Self::Uow, AdminError> {
        let tx = self.pool.begin().await?;
        Ok(PgModerationUow { tx })
    }
}

/// Unit of work over a single moderation transition.
pub struct PgModerationUow {
    tx: Transaction<'static, Postgres>,
}

impl std::fmt::Debug for PgModerationUow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgModerationUow").finish_non_exhaustive()
    }
}

#[async_trait]
impl ModerationUow for PgModerationUow {
    async fn get(&mut self, id: Uuid) -> Result<Option<PhotoRecord>, AdminError> {
        let photo = sqlx::query_as::<_, PhotoRecord>(
            r#"
            SELECT p.id, p.user_id, u.username, p.url, p.storage_key, p.is_approved, p.added_at
            FROM photos p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            FOR UPDATE OF p
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(photo)
    }

    async fn mark_approved(&mut self, id: Uuid) -> Result<bool, AdminError> {
        let result = sqlx::query("UPDATE photos SET is_approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&mut self, id: Uuid) -> Result<bool, AdminError> {
        let result =
            sqlx::query("DELETE FROM photos WHERE id = $1 AND is_approved = FALSE")
                .bind(id)
                .execute(&mut *self.tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit(self) -> Result<(), AdminError> {
        self.tx.commit().await.map_err(|e| {
            tracing::error!("moderation commit failed: {e}");
            AdminError::StoreUnavailable
        })
    }
}
