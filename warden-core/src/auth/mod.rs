pub mod password;

pub use password::{Argon2Hasher, CredentialHasher, hash_password, verify_password};
