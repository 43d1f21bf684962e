//! Repository contracts consumed by the seeder.
//!
//! The three stages talk to the datastore only through these traits, so
//! the SQL-backed stores can be swapped for the in-memory fakes in
//! [`crate::testing`] without touching stage logic.

pub mod sql;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::WardenError;
use crate::models::user::Gender;
use crate::models::{permission, role, user};

pub use sql::{SqlPermissionStore, SqlRoleStore, SqlUserStore};

/// Input record for a permission insert.
#[derive(Debug, Clone)]
pub struct NewPermission {
    pub name: String,
    pub description: String,
}

/// Input record for a role insert, carrying its ordered permission grants.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub description: String,
    pub grant_all: bool,
    /// Permission ids, in grant order. Must already exist in the store.
    pub permissions: Vec<i32>,
}

/// Profile data embedded in a user record.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_code: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub gender: Gender,
}

/// Input record for a user insert, carrying its ordered role memberships.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    /// Already-hashed credential. Stores never see plaintext.
    pub password_hash: String,
    /// Role ids, in membership order. Must already exist in the store.
    pub roles: Vec<i32>,
    pub profile: Profile,
}

/// Tagged result of an insert against a unique key.
///
/// Duplicate-key rejection by the datastore is the primary idempotence
/// mechanism; stores translate it into `AlreadyExists` instead of
/// leaving callers to inspect error types.
#[derive(Debug)]
pub enum CreateOutcome<T> {
    Created(T),
    AlreadyExists,
}

#[async_trait]
pub trait PermissionStore: Send + Sync {
    async fn create(
        &self,
        permission: NewPermission,
    ) -> Result<CreateOutcome<permission::Model>, WardenError>;

    async fn find_all(&self) -> Result<Vec<permission::Model>, WardenError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn create(&self, role: NewRole) -> Result<CreateOutcome<role::Model>, WardenError>;

    async fn find_all(&self) -> Result<Vec<role::Model>, WardenError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A duplicate username surfaces as
    /// [`WardenError::Conflict`]; the user stage is expected to have
    /// checked [`find_by_username`](Self::find_by_username) first.
    async fn create(&self, user: NewUser) -> Result<user::Model, WardenError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, WardenError>;
}
