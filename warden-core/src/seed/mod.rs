//! The idempotent three-stage RBAC bootstrap.
//!
//! Stages run in fixed order because each stage's data references the
//! prior stage's persisted identifiers:
//!
//! ```text
//! Permissions ──→ Roles ──→ Users
//!   (names)     (name→id)  (name→id + hashing)
//! ```
//!
//! Within a stage, items are created one at a time in list order, each
//! awaited to completion. Duplicate-key rejection by the store is the
//! primary idempotence mechanism; the user stage additionally checks for
//! an existing username before hashing anything.

pub mod catalog;
pub mod confirm;

use std::collections::HashMap;

use crate::auth::password::CredentialHasher;
use crate::console;
use crate::error::WardenError;
use crate::store::{
    CreateOutcome, NewPermission, NewRole, NewUser, PermissionStore, Profile, RoleStore, UserStore,
};

use catalog::{PermissionName, RoleDef, UserDef};
use confirm::Confirm;

/// Per-stage outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of a full bootstrap run. `None` means the stage was declined.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    pub permissions: Option<StageSummary>,
    pub roles: Option<StageSummary>,
    pub users: Option<StageSummary>,
}

/// The three gated stages, wired to injected stores and capabilities.
pub struct Bootstrap<'a> {
    pub permissions: &'a dyn PermissionStore,
    pub roles: &'a dyn RoleStore,
    pub users: &'a dyn UserStore,
    pub hasher: &'a dyn CredentialHasher,
    pub confirm: &'a dyn Confirm,
}

impl Bootstrap<'_> {
    /// Run all three stages in order, each behind its confirmation gate.
    ///
    /// A declined stage is skipped entirely; later stages still run and
    /// surface their own lookup errors if the data they depend on is
    /// missing.
    pub async fn run(&self) -> Result<BootstrapReport, WardenError> {
        let mut report = BootstrapReport::default();

        if self.confirm.confirm("Do you want to add Permissions?")? {
            report.permissions = Some(seed_permissions(self.permissions).await?);
        } else {
            console::info("Skipped adding Permissions.");
        }

        if self.confirm.confirm("Do you want to add Roles?")? {
            report.roles = Some(seed_roles(self.roles, self.permissions).await?);
        } else {
            console::info("Skipped adding Roles.");
        }

        if self.confirm.confirm("Do you want to add Users?")? {
            report.users = Some(seed_users(self.users, self.roles, self.hasher).await?);
        } else {
            console::info("Skipped adding Users.");
        }

        console::success("Setup completed.");
        Ok(report)
    }
}

/// Stage 1: create every catalog permission.
///
/// Idempotent and order-independent within itself; one item's failure
/// never aborts the batch.
pub async fn seed_permissions(
    store: &dyn PermissionStore,
) -> Result<StageSummary, WardenError> {
    let mut summary = StageSummary::default();

    for permission in PermissionName::ALL {
        let record = NewPermission {
            name: permission.as_str().to_string(),
            description: permission.description().to_string(),
        };

        match store.create(record).await {
            Ok(CreateOutcome::Created(_)) => {
                tracing::debug!(permission = permission.as_str(), "permission created");
                summary.created += 1;
            }
            Ok(CreateOutcome::AlreadyExists) => {
                console::info(format!(
                    "Permission '{}' already exists.",
                    permission.as_str()
                ));
                summary.skipped += 1;
            }
            Err(err) => {
                console::error(format!(
                    "Failed to add permission '{}': {}",
                    permission.as_str(),
                    err
                ));
                summary.failed += 1;
            }
        }
    }

    console::success("Permissions added or verified successfully.");
    Ok(summary)
}

/// Stage 2: create the default roles, resolving their permission grants
/// by name against the freshly loaded permission set.
///
/// A reference to a permission that is not persisted yet is fatal for
/// the whole stage; nothing is created in that case.
pub async fn seed_roles(
    roles: &dyn RoleStore,
    permissions: &dyn PermissionStore,
) -> Result<StageSummary, WardenError> {
    let all = permissions.find_all().await?;
    let by_name: HashMap<&str, i32> = all.iter().map(|p| (p.name.as_str(), p.id)).collect();

    // Resolve every definition before creating anything, so an
    // unresolved reference cannot leave a partially seeded stage behind.
    let mut records = Vec::with_capacity(catalog::DEFAULT_ROLES.len());
    for def in &catalog::DEFAULT_ROLES {
        records.push((def.name, resolve_role(def, &by_name)?));
    }

    let mut summary = StageSummary::default();
    for (name, record) in records {
        match roles.create(record).await? {
            CreateOutcome::Created(_) => {
                tracing::debug!(role = name, "role created");
                summary.created += 1;
            }
            CreateOutcome::AlreadyExists => {
                console::info(format!("Role '{}' already exists.", name));
                summary.skipped += 1;
            }
        }
    }

    console::success("Roles added successfully.");
    Ok(summary)
}

fn resolve_role(def: &RoleDef, by_name: &HashMap<&str, i32>) -> Result<NewRole, WardenError> {
    let mut resolved = Vec::with_capacity(def.permissions.len());
    for permission in def.permissions {
        let id = by_name
            .get(permission.as_str())
            .copied()
            .ok_or_else(|| WardenError::UnresolvedPermission(permission.as_str().to_string()))?;
        resolved.push(id);
    }

    Ok(NewRole {
        name: def.name.to_string(),
        description: def.description.to_string(),
        grant_all: def.grant_all,
        permissions: resolved,
    })
}

/// Stage 3: create the default users, resolving their role memberships
/// by name against the freshly loaded role set.
///
/// An unresolved role name is fatal for the whole stage. Per-user
/// persistence failures are logged with the username and do not abort
/// the remaining users. An existing username is skipped before its
/// password ever reaches the hasher.
pub async fn seed_users(
    users: &dyn UserStore,
    roles: &dyn RoleStore,
    hasher: &dyn CredentialHasher,
) -> Result<StageSummary, WardenError> {
    let all = roles.find_all().await?;
    let by_name: HashMap<&str, i32> = all.iter().map(|r| (r.name.as_str(), r.id)).collect();

    let defs = catalog::default_users();
    let mut resolved = Vec::with_capacity(defs.len());
    for def in &defs {
        let mut role_ids = Vec::with_capacity(def.roles.len());
        for role in def.roles {
            let id = by_name
                .get(role)
                .copied()
                .ok_or_else(|| WardenError::UnresolvedRole(role.to_string()))?;
            role_ids.push(id);
        }
        resolved.push(role_ids);
    }

    let mut summary = StageSummary::default();
    for (def, role_ids) in defs.iter().zip(resolved) {
        match add_user(users, hasher, def, role_ids).await {
            Ok(UserOutcome::Created) => {
                console::success(format!("User '{}' added successfully.", def.username));
                summary.created += 1;
            }
            Ok(UserOutcome::AlreadyExists) => {
                console::info(format!("User '{}' already exists.", def.username));
                summary.skipped += 1;
            }
            Err(err) => {
                console::error(format!("Error adding user '{}': {}", def.username, err));
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

enum UserOutcome {
    Created,
    AlreadyExists,
}

async fn add_user(
    users: &dyn UserStore,
    hasher: &dyn CredentialHasher,
    def: &UserDef,
    role_ids: Vec<i32>,
) -> Result<UserOutcome, WardenError> {
    // Explicit lookup first: a duplicate must be detected before the
    // plaintext is hashed, leaving the stored credential untouched.
    if users.find_by_username(def.username).await?.is_some() {
        return Ok(UserOutcome::AlreadyExists);
    }

    let password_hash = hasher.hash(def.password)?;

    users
        .create(NewUser {
            username: def.username.to_string(),
            password_hash,
            roles: role_ids,
            profile: Profile {
                user_code: def.profile.user_code.to_string(),
                full_name: def.profile.full_name.to_string(),
                date_of_birth: def.profile.date_of_birth,
                address: def.profile.address.to_string(),
                gender: def.profile.gender,
            },
        })
        .await?;

    Ok(UserOutcome::Created)
}
