use thiserror::Error;

/// Standard error type for Warden.
#[derive(Debug, Error)]
pub enum WardenError {
    /// Unique-key violation raised by the datastore on a duplicate insert.
    ///
    /// Stage code recovers from these locally; they only escape a store
    /// when the tagged [`CreateOutcome`](crate::store::CreateOutcome)
    /// contract does not apply (user creation).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A role definition references a permission name with no persisted
    /// identifier. Fatal: the permission stage must run first.
    #[error("Role references unknown permission '{0}'; seed permissions before roles")]
    UnresolvedPermission(String),

    /// A user definition references a role name with no persisted
    /// identifier. Fatal: the role stage must run first.
    #[error("User references unknown role '{0}'; seed roles before users")]
    UnresolvedRole(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
