//! The fixed seed dataset: permission catalog, role definitions, and
//! default users.

use chrono::NaiveDate;

use crate::models::user::Gender;

/// The enumerated set of built-in permissions.
///
/// One row is seeded per variant. Names are the unique keys the role
/// definitions resolve against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PermissionName {
    ListAllPermissions,
    CreatePermission,
    UpdatePermission,
    DeletePermission,
    ListAllRoles,
    CreateRole,
    UpdateRole,
    DeleteRole,
    ListAllUsers,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl PermissionName {
    pub const ALL: [PermissionName; 12] = [
        PermissionName::ListAllPermissions,
        PermissionName::CreatePermission,
        PermissionName::UpdatePermission,
        PermissionName::DeletePermission,
        PermissionName::ListAllRoles,
        PermissionName::CreateRole,
        PermissionName::UpdateRole,
        PermissionName::DeleteRole,
        PermissionName::ListAllUsers,
        PermissionName::CreateUser,
        PermissionName::UpdateUser,
        PermissionName::DeleteUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionName::ListAllPermissions => "list_all_permissions",
            PermissionName::CreatePermission => "create_permission",
            PermissionName::UpdatePermission => "update_permission",
            PermissionName::DeletePermission => "delete_permission",
            PermissionName::ListAllRoles => "list_all_roles",
            PermissionName::CreateRole => "create_role",
            PermissionName::UpdateRole => "update_role",
            PermissionName::DeleteRole => "delete_role",
            PermissionName::ListAllUsers => "list_all_users",
            PermissionName::CreateUser => "create_user",
            PermissionName::UpdateUser => "update_user",
            PermissionName::DeleteUser => "delete_user",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PermissionName::ListAllPermissions => "List every permission in the system",
            PermissionName::CreatePermission => "Create a new permission",
            PermissionName::UpdatePermission => "Update an existing permission",
            PermissionName::DeletePermission => "Delete a permission",
            PermissionName::ListAllRoles => "List every role in the system",
            PermissionName::CreateRole => "Create a new role",
            PermissionName::UpdateRole => "Update an existing role",
            PermissionName::DeleteRole => "Delete a role",
            PermissionName::ListAllUsers => "List every user account",
            PermissionName::CreateUser => "Create a new user account",
            PermissionName::UpdateUser => "Update an existing user account",
            PermissionName::DeleteUser => "Delete a user account",
        }
    }
}

/// A role to seed, with its explicit permission grants by name.
#[derive(Debug, Clone, Copy)]
pub struct RoleDef {
    pub name: &'static str,
    pub description: &'static str,
    /// Override flag, stored verbatim. A grant-all role keeps its
    /// explicit list empty rather than enumerating the catalog.
    pub grant_all: bool,
    pub permissions: &'static [PermissionName],
}

pub const DEFAULT_ROLES: [RoleDef; 2] = [
    RoleDef {
        name: "admin",
        description: "Administrator holding every permission in the system.",
        grant_all: true,
        permissions: &[],
    },
    RoleDef {
        name: "user",
        description: "Regular user with read-only access.",
        grant_all: false,
        permissions: &[
            PermissionName::ListAllPermissions,
            PermissionName::ListAllRoles,
            PermissionName::ListAllUsers,
        ],
    },
];

/// Profile data for a default user.
#[derive(Debug, Clone)]
pub struct ProfileDef {
    pub user_code: &'static str,
    pub full_name: &'static str,
    pub date_of_birth: NaiveDate,
    pub address: &'static str,
    pub gender: Gender,
}

/// A user to seed, with role memberships by name and a plaintext
/// password that is hashed just before persistence.
#[derive(Debug, Clone)]
pub struct UserDef {
    pub username: &'static str,
    pub password: &'static str,
    pub roles: &'static [&'static str],
    pub profile: ProfileDef,
}

pub fn default_users() -> Vec<UserDef> {
    vec![
        UserDef {
            username: "admin",
            password: "123456",
            roles: &["admin"],
            profile: ProfileDef {
                user_code: "ADMIN001",
                full_name: "Admin User",
                date_of_birth: date(1980, 1, 1),
                address: "Admin Address",
                gender: Gender::Male,
            },
        },
        UserDef {
            username: "user",
            password: "123456",
            roles: &["user"],
            profile: ProfileDef {
                user_code: "USER001",
                full_name: "User",
                date_of_birth: date(1985, 2, 2),
                address: "User Address",
                gender: Gender::Female,
            },
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_permission_names_are_distinct() {
        let names: HashSet<&str> = PermissionName::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names.len(), PermissionName::ALL.len());
    }

    #[test]
    fn test_role_definitions_reference_catalog_permissions() {
        for def in DEFAULT_ROLES {
            for permission in def.permissions {
                assert!(PermissionName::ALL.contains(permission));
            }
        }
    }

    #[test]
    fn test_grant_all_roles_have_no_explicit_grants() {
        for def in DEFAULT_ROLES.iter().filter(|d| d.grant_all) {
            assert!(def.permissions.is_empty(), "role '{}'", def.name);
        }
    }

    #[test]
    fn test_default_users_reference_default_roles() {
        let role_names: HashSet<&str> = DEFAULT_ROLES.iter().map(|d| d.name).collect();
        for user in default_users() {
            for role in user.roles {
                assert!(role_names.contains(role), "user '{}'", user.username);
            }
        }
    }

    #[test]
    fn test_default_usernames_are_distinct() {
        let users = default_users();
        let names: HashSet<&str> = users.iter().map(|u| u.username).collect();
        assert_eq!(names.len(), users.len());
    }
}
