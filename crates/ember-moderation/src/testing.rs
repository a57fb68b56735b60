//! In-memory store doubles shared by the service unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ember_common::error::AdminError;
use ember_common::models::{Account, AccountWithRoles, PhotoRecord};
use uuid::Uuid;

use crate::store::{
    AssetStore, DeleteOutcome, ModerationStore, ModerationUow, RoleStore,
};

// ============================================================
// Role store double
// ============================================================

#[derive(Debug, Default)]
struct RoleState {
    accounts: BTreeMap<Uuid, String>,
    roles: BTreeMap<Uuid, BTreeSet<String>>,
    fail_adds: Option<String>,
    fail_removes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemRoleStore {
    state: Arc<Mutex<RoleState>>,
    writes: Arc<AtomicUsize>,
}

impl MemRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, username: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.accounts.insert(id, username.to_string());
        state.roles.insert(id, BTreeSet::new());
        id
    }

    pub fn grant(&self, account_id: Uuid, roles: &[&str]) {
        let mut state = self.state.lock().unwrap();
        let held = state.roles.entry(account_id).or_default();
        for role in roles {
            held.insert(role.to_string());
        }
    }

    pub fn roles_snapshot(&self, account_id: Uuid) -> BTreeSet<String> {
        self.state
            .lock()
            .unwrap()
            .roles
            .get(&account_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total add/remove calls that reached the store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_adds(&self, reason: &str) {
        self.state.lock().unwrap().fail_adds = Some(reason.to_string());
    }

    pub fn fail_removes(&self, reason: &str) {
        self.state.lock().unwrap().fail_removes = Some(reason.to_string());
    }
}

#[async_trait]
impl RoleStore for MemRoleStore {
    async fn find_account(&self, username: &str) -> Result<Option<Account>, AdminError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .accounts
            .iter()
            .find(|(_, name)| name.as_str() == username)
            .map(|(id, name)| Account {
                id: *id,
                username: name.clone(),
                created_at: Utc::now(),
            }))
    }

    async fn roles_of(&self, account_id: Uuid) -> Result<BTreeSet<String>, AdminError> {
        Ok(self.roles_snapshot(account_id))
    }

    async fn add_roles(
        &self,
        account_id: Uuid,
        roles: &BTreeSet<String>,
    ) -> Result<(), AdminError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.fail_adds.clone() {
            return Err(AdminError::Validation { message: reason });
        }
        let held = state.roles.entry(account_id).or_default();
        for role in roles {
            held.insert(role.clone());
        }
        Ok(())
    }

    async fn remove_roles(
        &self,
        account_id: Uuid,
        roles: &BTreeSet<String>,
    ) -> Result<(), AdminError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = state.fail_removes.clone() {
            return Err(AdminError::Validation { message: reason });
        }
        let held = state.roles.entry(account_id).or_default();
        for role in roles {
            held.remove(role);
        }
        Ok(())
    }

    async fn list_accounts_with_roles(&self) -> Result<Vec<AccountWithRoles>, AdminError> {
        let state = self.state.lock().unwrap();
        let mut listing: Vec<AccountWithRoles> = state
            .accounts
            .iter()
            .map(|(id, username)| AccountWithRoles {
                id: *id,
                username: username.clone(),
                roles: state
                    .roles
                    .get(id)
                    .map(|r| r.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect();
        listing.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(listing)
    }
}

// ============================================================
// Moderation store double
// ============================================================

#[derive(Debug, Default)]
struct PhotoState {
    /// Insertion order preserved; the pending listing stable-sorts over it.
    photos: Vec<PhotoRecord>,
    fail_commits: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemModerationStore {
    state: Arc<Mutex<PhotoState>>,
}

impl MemModerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pending photo submitted at unix second `ts`.
    pub fn add_photo(&self, username: &str, ts: i64, storage_key: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.photos.push(PhotoRecord {
            id,
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            url: format!("https://photos.test/{id}"),
            storage_key: storage_key.map(str::to_string),
            is_approved: false,
            added_at: Utc.timestamp_opt(ts, 0).single().unwrap(),
        });
        id
    }

    pub fn get_snapshot(&self, id: Uuid) -> Option<PhotoRecord> {
        self.state
            .lock()
            .unwrap()
            .photos
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn fail_commits(&self) {
        self.state.lock().unwrap().fail_commits = true;
    }
}

pub struct MemUow {
    state: Arc<Mutex<PhotoState>>,
}

#[async_trait]
impl ModerationUow for MemUow {
    async fn get(&mut self, id: Uuid) -> Result<Option<PhotoRecord>, AdminError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .photos
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn mark_approved(&mut self, id: Uuid) -> Result<bool, AdminError> {
        let mut state = self.state.lock().unwrap();
        match state.photos.iter_mut().find(|p| p.id == id) {
            Some(photo) => {
                photo.is_approved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<bool, AdminError> {
        let mut state = self.state.lock().unwrap();
        let before = state.photos.len();
        state.photos.retain(|p| !(p.id == id && !p.is_approved));
        Ok(state.photos.len() < before)
    }

    async fn commit(self) -> Result<(), AdminError> {
        if self.state.lock().unwrap().fail_commits {
            return Err(AdminError::StoreUnavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationStore for MemModerationStore {
    type Uow = MemUow;

    async fn list_pending(&self) -> Result<Vec<PhotoRecord>, AdminError> {
        let state = self.state.lock().unwrap();
        let mut pending: Vec<PhotoRecord> = state
            .photos
            .iter()
            .filter(|p| !p.is_approved)
            .cloned()
            .collect();
        // Stable sort: equal (username, added_at) keep insertion order.
        pending.sort_by(|a, b| {
            a.username
                .cmp(&b.username)
                .then(b.added_at.cmp(&a.added_at))
        });
        Ok(pending)
    }

    async fn begin(&self) -> Result<Self::Uow, AdminError> {
        Ok(MemUow {
            state: Arc::clone(&self.state),
        })
    }
}

// ============================================================
// Asset store double
// ============================================================

#[derive(Debug, Default)]
struct AssetState {
    deleted: Vec<String>,
    fail_with: Option<String>,
    not_found: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemAssetStore {
    state: Arc<Mutex<AssetState>>,
}

impl MemAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, reason: &str) {
        self.state.lock().unwrap().fail_with = Some(reason.to_string());
    }

    pub fn report_not_found(&self) {
        self.state.lock().unwrap().not_found = true;
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }
}

#[async_trait]
impl AssetStore for MemAssetStore {
    async fn delete_object(&self, key: &str) -> anyhow::Result<DeleteOutcome> {
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = &state.fail_with {
            return Err(anyhow!("{reason}"));
        }
        if state.not_found {
            return Ok(DeleteOutcome::NotFound);
        }
        state.deleted.push(key.to_string());
        Ok(DeleteOutcome::Deleted)
    }
}
