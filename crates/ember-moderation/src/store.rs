//! Store traits — the seams between the services and their backends.
//!
//! `ember-db` provides the PostgreSQL and S3 implementations; tests provide
//! in-memory doubles. The services never name a concrete backend.

use std::collections::BTreeSet;

use async_trait::async_trait;
use ember_common::error::AdminError;
use ember_common::models::{Account, AccountWithRoles, PhotoRecord};
use uuid::Uuid;

/// Persistent mapping of account → set of role names.
///
/// `add_roles` and `remove_roles` are each individually atomic, but a full
/// edit (add then remove) is not serialized against another edit on the same
/// account. Callers needing strict serialization must supply their own
/// external locking.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Look up an account by username.
    async fn find_account(&self, username: &str) -> Result<Option<Account>, AdminError>;

    /// Role names currently held by the account.
    async fn roles_of(&self, account_id: Uuid) -> Result<BTreeSet<String>, AdminError>;

    /// Grant roles. Granting an already-held role is a no-op, not an error.
    async fn add_roles(&self, account_id: Uuid, roles: &BTreeSet<String>)
        -> Result<(), AdminError>;

    /// Revoke roles. Revoking a role the account does not hold is a no-op.
    async fn remove_roles(
        &self,
        account_id: Uuid,
        roles: &BTreeSet<String>,
    ) -> Result<(), AdminError>;

    /// All accounts joined with their roles, ordered by username ascending.
    async fn list_accounts_with_roles(&self) -> Result<Vec<AccountWithRoles>, AdminError>;
}

/// Persistent collection of submitted-photo records.
#[async_trait]
pub trait ModerationStore: Send + Sync {
    type Uow: ModerationUow;

    /// Unapproved photos, bypassing the approved-only visibility filter that
    /// ordinary profile queries apply. Ordered by username ascending, then
    /// submission time descending, ties broken by insertion order.
    async fn list_pending(&self) -> Result<Vec<PhotoRecord>, AdminError>;

    /// Open a unit of work for a moderation transition.
    async fn begin(&self) -> Result<Self::Uow, AdminError>;
}

/// A unit of work over the photo records.
///
/// Mutations are staged; nothing is durable until [`commit`](Self::commit)
/// succeeds. A mutation whose unit of work is never committed has no effect.
#[async_trait]
pub trait ModerationUow: Send {
    /// Fetch a record regardless of approval state, locking it against
    /// concurrent transitions for the lifetime of this unit of work.
    async fn get(&mut self, id: Uuid) -> Result<Option<PhotoRecord>, AdminError>;

    /// Set `is_approved = true`. Returns `false` if no record matched —
    /// the caller treats that as the record having been deleted concurrently.
    async fn mark_approved(&mut self, id: Uuid) -> Result<bool, AdminError>;

    /// Remove a still-pending record. Returns `false` if no pending record
    /// matched (already deleted, or approved in the meantime).
    async fn delete(&mut self, id: Uuid) -> Result<bool, AdminError>;

    /// Make the staged mutations durable.
    async fn commit(self) -> Result<(), AdminError>;
}

/// Outcome of an asset-store delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The object existed and was removed.
    Deleted,
    /// The object was already gone. Treated as success by the reject retry
    /// path: a prior reject may have deleted the asset before the record
    /// delete persisted.
    NotFound,
}

/// Thin client to the external object-storage provider.
///
/// Implementations bound the call with a configured timeout; a timeout is
/// reported as an error, identical to an explicit failure response.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Delete an object by its storage key.
    async fn delete_object(&self, key: &str) -> anyhow::Result<DeleteOutcome>;
}
