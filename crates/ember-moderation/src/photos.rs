//! Photo moderation — the pending queue and the approve/reject transitions.
//!
//! Each photo moves `Pending → Approved` or `Pending → Deleted`, both
//! terminal. Reject is the only operation that touches two independently
//! failing systems: the object store is asked to delete the binary first, and
//! only on success (or "already gone") is the record removed. A failed or
//! timed-out asset delete leaves the record pending so it can be rejected
//! again later — the record is never orphaned away from a live asset.

use ember_common::error::AdminError;
use ember_common::models::PhotoRecord;
use uuid::Uuid;

use crate::store::{AssetStore, ModerationStore, ModerationUow};

/// Executes moderation transitions against a [`ModerationStore`] and an
/// [`AssetStore`].
#[derive(Debug, Clone)]
pub struct ModerationService<M, A> {
    store: M,
    assets: A,
}

impl<M, A> ModerationService<M, A>
where
    M: ModerationStore,
    A: AssetStore,
{
    pub fn new(store: M, assets: A) -> Self {
        Self { store, assets }
    }

    /// Photos awaiting review, ordered by username ascending then submission
    /// time descending (newest first within a user).
    pub async fn list_pending(&self) -> Result<Vec<PhotoRecord>, AdminError> {
        self.store.list_pending().await
    }

    /// Approve a photo. No asset-store interaction.
    ///
    /// The update is conditioned on the record still existing, so a reject
    /// that won a concurrent race surfaces here as [`AdminError::PhotoNotFound`].
    pub async fn approve(&self, photo_id: Uuid) -> Result<(), AdminError> {
        let mut uow = self.store.begin().await?;

        if !uow.mark_approved(photo_id).await? {
            return Err(AdminError::PhotoNotFound);
        }

        uow.commit().await?;
        tracing::info!(%photo_id, "photo approved");
        Ok(())
    }

    /// Reject a photo, deleting it from object storage and the record store.
    ///
    /// The record is fetched up front: a missing record fails with
    /// [`AdminError::PhotoNotFound`] before any branch is evaluated, and an
    /// already-approved record is likewise not rejectable (approval is
    /// terminal). When the record carries a storage key the asset delete runs
    /// first; only a successful or already-gone outcome lets the record
    /// delete proceed. Any other outcome fails with
    /// [`AdminError::AssetDeletionFailed`] and leaves the record pending.
    pub async fn reject(&self, photo_id: Uuid) -> Result<(), AdminError> {
        let mut uow = self.store.begin().await?;

        let photo = uow.get(photo_id).await?.ok_or(AdminError::PhotoNotFound)?;
        if photo.is_approved {
            return Err(AdminError::PhotoNotFound);
        }

        if let Some(key) = photo.storage_key.as_deref() {
            match self.assets.delete_object(key).await {
                Ok(outcome) => {
                    tracing::debug!(%photo_id, key, ?outcome, "asset delete");
                }
                Err(e) => {
                    tracing::warn!(%photo_id, key, error = %e, "asset delete failed; record left pending");
                    return Err(AdminError::AssetDeletionFailed {
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !uow.delete(photo_id).await? {
            return Err(AdminError::PhotoNotFound);
        }

        uow.commit().await?;
        tracing::info!(%photo_id, "photo rejected");
        Ok(())
    }
}
