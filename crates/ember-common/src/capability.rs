//! Capability tags for the admin surface.
//!
//! Each admin operation is gated by a capability rather than a single role
//! string: the gate maps operation → required role names, so "can moderate
//! photos" and "can manage roles" stay independent checks even though both
//! are satisfied by the `Admin` role.

use std::fmt;

/// A capability required to invoke an admin operation.
///
/// The HTTP layer checks these at the route boundary; the services themselves
/// trust the gate and perform no authorization logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// List accounts with their roles, edit an account's role set.
    ManageRoles,
    /// List pending photos, approve or reject them.
    ModeratePhotos,
}

impl Capability {
    /// Role names that grant this capability. Holding any one is sufficient.
    pub fn granting_roles(&self) -> &'static [&'static str] {
        match self {
            Capability::ManageRoles => &["Admin"],
            Capability::ModeratePhotos => &["Admin", "Moderator"],
        }
    }

    /// Whether a caller holding `roles` is granted this capability.
    pub fn granted_by<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles
            .iter()
            .any(|held| self.granting_roles().contains(&held.as_ref()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::ManageRoles => write!(f, "manage_roles"),
            Capability::ModeratePhotos => write!(f, "moderate_photos"),
        }
    }
}
