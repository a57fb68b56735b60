//! Role assignment — diff-and-apply edits of an account's role set.

use std::collections::BTreeSet;

use ember_common::error::AdminError;
use uuid::Uuid;

use crate::store::RoleStore;

/// Applies role edits against a [`RoleStore`].
#[derive(Debug, Clone)]
pub struct RoleService<S> {
    store: S,
}

impl<S: RoleStore> RoleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replace an account's role set with `desired`.
    ///
    /// Computes the diff against the current set and applies additions first,
    /// then removals. If the add step fails, nothing further is attempted and
    /// the error is [`AdminError::RoleAddFailed`]. If the remove step fails,
    /// the adds already applied remain in effect and the error is
    /// [`AdminError::RoleRemoveFailed`] — partial apply is accepted and the
    /// distinct error kind tells the caller which half ran.
    ///
    /// `None` is treated as the empty set (revoke everything). The returned
    /// set is re-read from the store after both steps, so it reflects ground
    /// truth rather than echoing the input.
    pub async fn edit_roles(
        &self,
        username: &str,
        desired: Option<BTreeSet<String>>,
    ) -> Result<BTreeSet<String>, AdminError> {
        let desired = desired.unwrap_or_default();

        let account = self
            .store
            .find_account(username)
            .await?
            .ok_or(AdminError::AccountNotFound)?;

        let current = self.store.roles_of(account.id).await?;

        let to_add: BTreeSet<String> = desired.difference(&current).cloned().collect();
        let to_remove: BTreeSet<String> = current.difference(&desired).cloned().collect();

        if !to_add.is_empty() {
            self.store
                .add_roles(account.id, &to_add)
                .await
                .map_err(|e| AdminError::RoleAddFailed {
                    reason: e.to_string(),
                })?;
        }

        if !to_remove.is_empty() {
            self.store
                .remove_roles(account.id, &to_remove)
                .await
                .map_err(|e| AdminError::RoleRemoveFailed {
                    reason: e.to_string(),
                })?;
        }

        tracing::info!(
            username,
            added = to_add.len(),
            removed = to_remove.len(),
            "role edit applied"
        );

        self.store.roles_of(account.id).await
    }

    /// Current role set of an account, by id.
    pub async fn roles_of(&self, account_id: Uuid) -> Result<BTreeSet<String>, AdminError> {
        self.store.roles_of(account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemRoleStore;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn edit_roles_replaces_the_role_set_exactly() {
        let store = MemRoleStore::new();
        let id = store.add_account("amy");
        store.grant(id, &["Member", "VIP"]);

        let service = RoleService::new(store.clone());
        let result = service
            .edit_roles("amy", Some(set(&["Admin", "Member"])))
            .await
            .unwrap();

        assert_eq!(result, set(&["Admin", "Member"]));
        assert_eq!(store.roles_snapshot(id), set(&["Admin", "Member"]));
    }

    #[tokio::test]
    async fn edit_roles_is_idempotent() {
        let store = MemRoleStore::new();
        let id = store.add_account("amy");
        store.grant(id, &["Member"]);

        let service = RoleService::new(store.clone());
        let desired = set(&["Moderator", "Member"]);

        let first = service.edit_roles("amy", Some(desired.clone())).await.unwrap();
        let writes_after_first = store.write_count();
        let second = service.edit_roles("amy", Some(desired)).await.unwrap();

        assert_eq!(first, second);
        // Second call's diff was empty: no further writes hit the store.
        assert_eq!(store.write_count(), writes_after_first);
    }

    #[tokio::test]
    async fn absent_desired_set_revokes_everything() {
        let store = MemRoleStore::new();
        let id = store.add_account("amy");
        store.grant(id, &["Admin", "Member"]);

        let service = RoleService::new(store.clone());
        let result = service.edit_roles("amy", None).await.unwrap();

        assert!(result.is_empty());
        assert!(store.roles_snapshot(id).is_empty());
    }

    #[tokio::test]
    async fn unknown_account_fails_without_writes() {
        let store = MemRoleStore::new();
        let service = RoleService::new(store.clone());

        let err = service
            .edit_roles("nobody", Some(set(&["Admin"])))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::AccountNotFound));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn add_failure_aborts_before_removes() {
        let store = MemRoleStore::new();
        let id = store.add_account("amy");
        store.grant(id, &["Member"]);
        store.fail_adds("role store rejected the write");

        let service = RoleService::new(store.clone());
        let err = service
            .edit_roles("amy", Some(set(&["Admin"])))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::RoleAddFailed { .. }));
        // The remove step never ran: Member is still held.
        assert_eq!(store.roles_snapshot(id), set(&["Member"]));
    }

    #[tokio::test]
    async fn remove_failure_leaves_adds_in_place() {
        let store = MemRoleStore::new();
        let id = store.add_account("amy");
        store.grant(id, &["Member"]);
        store.fail_removes("role store rejected the write");

        let service = RoleService::new(store.clone());
        let err = service
            .edit_roles("amy", Some(set(&["Admin"])))
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::RoleRemoveFailed { .. }));
        // Partial apply: the add went through and stays.
        assert_eq!(store.roles_snapshot(id), set(&["Admin", "Member"]));
    }
}
