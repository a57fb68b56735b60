//! Read-only admin queries.

use ember_common::error::AdminError;
use ember_common::models::AccountWithRoles;

use crate::store::RoleStore;

/// Read-only projection joining accounts with their roles.
///
/// No mutation, no side effects; the only failure mode is the store being
/// unreachable.
#[derive(Debug, Clone)]
pub struct AdminQueryService<S> {
    store: S,
}

impl<S: RoleStore> AdminQueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All accounts with their role names, ordered by username ascending.
    pub async fn list_accounts_with_roles(&self) -> Result<Vec<AccountWithRoles>, AdminError> {
        self.store.list_accounts_with_roles().await
    }
}
