//! In-memory fakes for exercising the bootstrap without a database.
//!
//! The fakes enforce the same uniqueness semantics as the SQL stores so
//! stage logic behaves identically against either backend.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::auth::password::CredentialHasher;
use crate::error::WardenError;
use crate::models::{permission, role, role_permission, user, user_role};
use crate::seed::confirm::Confirm;
use crate::store::{
    CreateOutcome, NewPermission, NewRole, NewUser, PermissionStore, RoleStore, UserStore,
};

#[derive(Default)]
pub struct MemoryPermissionStore {
    rows: RwLock<Vec<permission::Model>>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn create(
        &self,
        record: NewPermission,
    ) -> Result<CreateOutcome<permission::Model>, WardenError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.name == record.name) {
            return Ok(CreateOutcome::AlreadyExists);
        }

        let model = permission::Model {
            id: rows.len() as i32 + 1,
            name: record.name,
            description: record.description,
            created_at: Utc::now().naive_utc(),
        };
        rows.push(model.clone());
        Ok(CreateOutcome::Created(model))
    }

    async fn find_all(&self) -> Result<Vec<permission::Model>, WardenError> {
        Ok(self.rows.read().await.clone())
    }
}

#[derive(Default)]
struct RoleRows {
    roles: Vec<role::Model>,
    links: Vec<role_permission::Model>,
}

#[derive(Default)]
pub struct MemoryRoleStore {
    inner: RwLock<RoleRows>,
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit permission grants of a role, in seeded order.
    pub async fn permission_ids(&self, role_name: &str) -> Vec<i32> {
        let inner = self.inner.read().await;
        let Some(role) = inner.roles.iter().find(|r| r.name == role_name) else {
            return Vec::new();
        };
        let mut links: Vec<_> = inner
            .links
            .iter()
            .filter(|l| l.role_id == role.id)
            .collect();
        links.sort_by_key(|l| l.position);
        links.iter().map(|l| l.permission_id).collect()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn create(&self, record: NewRole) -> Result<CreateOutcome<role::Model>, WardenError> {
        let mut inner = self.inner.write().await;
        if inner.roles.iter().any(|r| r.name == record.name) {
            return Ok(CreateOutcome::AlreadyExists);
        }

        let now = Utc::now().naive_utc();
        let model = role::Model {
            id: inner.roles.len() as i32 + 1,
            name: record.name,
            description: record.description,
            grant_all: record.grant_all,
            created_at: now,
        };

        for (position, permission_id) in record.permissions.iter().enumerate() {
            let link = role_permission::Model {
                id: inner.links.len() as i32 + 1,
                role_id: model.id,
                permission_id: *permission_id,
                position: position as i32,
                created_at: now,
            };
            inner.links.push(link);
        }

        inner.roles.push(model.clone());
        Ok(CreateOutcome::Created(model))
    }

    async fn find_all(&self) -> Result<Vec<role::Model>, WardenError> {
        Ok(self.inner.read().await.roles.clone())
    }
}

#[derive(Default)]
struct UserRows {
    users: Vec<user::Model>,
    links: Vec<user_role::Model>,
}

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<UserRows>,
    fail_usernames: Mutex<HashSet<String>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create` for this username fail with an injected
    /// persistence error.
    pub fn fail_on(&self, username: &str) {
        self.fail_usernames
            .lock()
            .expect("poisoned lock")
            .insert(username.to_string());
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Role memberships of a user, in seeded order.
    pub async fn role_ids(&self, username: &str) -> Vec<i32> {
        let inner = self.inner.read().await;
        let Some(user) = inner.users.iter().find(|u| u.username == username) else {
            return Vec::new();
        };
        let mut links: Vec<_> = inner.links.iter().filter(|l| l.user_id == user.id).collect();
        links.sort_by_key(|l| l.position);
        links.iter().map(|l| l.role_id).collect()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, record: NewUser) -> Result<user::Model, WardenError> {
        let injected = self
            .fail_usernames
            .lock()
            .expect("poisoned lock")
            .contains(&record.username);
        if injected {
            return Err(WardenError::Internal(format!(
                "injected persistence failure for '{}'",
                record.username
            )));
        }

        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == record.username) {
            return Err(WardenError::Conflict(format!(
                "User '{}' already exists",
                record.username
            )));
        }

        let now = Utc::now().naive_utc();
        let model = user::Model {
            id: inner.users.len() as i32 + 1,
            username: record.username,
            password_hash: record.password_hash,
            user_code: record.profile.user_code,
            full_name: record.profile.full_name,
            date_of_birth: record.profile.date_of_birth,
            address: record.profile.address,
            gender: record.profile.gender,
            created_at: now,
            updated_at: now,
        };

        for (position, role_id) in record.roles.iter().enumerate() {
            let link = user_role::Model {
                id: inner.links.len() as i32 + 1,
                user_id: model.id,
                role_id: *role_id,
                position: position as i32,
                created_at: now,
            };
            inner.links.push(link);
        }

        inner.users.push(model.clone());
        Ok(model)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, WardenError> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// Hasher fake that counts invocations instead of doing real work.
///
/// The returned strings never contain the plaintext, and each call
/// yields a distinct value so an unexpected re-hash shows up as a
/// changed stored credential.
#[derive(Default)]
pub struct CountingHasher {
    calls: AtomicUsize,
}

impl CountingHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CredentialHasher for CountingHasher {
    fn hash(&self, _plaintext: &str) -> Result<String, WardenError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("$fake-hash$call{n}"))
    }
}

/// Confirmation fake that replays a fixed sequence of answers.
///
/// Once the sequence is exhausted every further question is declined.
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        ScriptedConfirm {
            answers: Mutex::new(answers.iter().copied().collect()),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, _question: &str) -> Result<bool, WardenError> {
        Ok(self
            .answers
            .lock()
            .expect("poisoned lock")
            .pop_front()
            .unwrap_or(false))
    }
}
