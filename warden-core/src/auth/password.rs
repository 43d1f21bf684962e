use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::Config;
use crate::error::WardenError;

/// Turns a plaintext credential into an opaque stored form.
///
/// The bootstrap takes this as an injected capability so tests can count
/// hash invocations (a skipped duplicate user must never reach the
/// hasher).
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, WardenError>;
}

/// Argon2id hasher with a configurable work factor.
///
/// Defaults suit an interactive/offline tool; this is not a
/// high-throughput login path.
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(memory_kib: u32, time_cost: u32, parallelism: u32) -> Result<Self, WardenError> {
        let params = Params::new(memory_kib, time_cost, parallelism, None)
            .map_err(|e| WardenError::Internal(format!("Invalid hash parameters: {e}")))?;
        Ok(Argon2Hasher { params })
    }

    pub fn from_config(config: &Config) -> Result<Self, WardenError> {
        Self::new(
            config.hash_memory_kib,
            config.hash_time_cost,
            config.hash_parallelism,
        )
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Argon2Hasher {
            params: Params::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, WardenError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| WardenError::Internal(format!("Failed to hash password: {e}")))
    }
}

/// Hash a plaintext password with the default work factor.
pub fn hash_password(password: &str) -> Result<String, WardenError> {
    Argon2Hasher::default().hash(password)
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, WardenError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| WardenError::Internal(format!("Invalid password hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
