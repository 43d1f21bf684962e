use warden_core::auth::password::{
    Argon2Hasher, CredentialHasher, hash_password, verify_password,
};

#[test]
fn test_hash_and_verify_password() {
    let password = "secure_password_123";
    let hash = hash_password(password).expect("Failed to hash password");

    assert!(!hash.is_empty());
    assert_ne!(hash, password);

    let is_valid = verify_password(password, &hash).expect("Failed to verify password");
    assert!(is_valid);
}

#[test]
fn test_wrong_password_fails() {
    let hash = hash_password("correct123").expect("Failed to hash");

    let is_valid = verify_password("wrong456", &hash).expect("Failed to verify");
    assert!(!is_valid);
}

#[test]
fn test_case_sensitive_passwords() {
    let hash = hash_password("Password123").expect("Failed to hash");

    assert!(verify_password("Password123", &hash).expect("Failed to verify"));
    assert!(!verify_password("password123", &hash).expect("Failed to verify"));
}

#[test]
fn test_hash_produces_different_results() {
    let password = "same_password";

    let hash1 = hash_password(password).expect("Failed to hash 1");
    let hash2 = hash_password(password).expect("Failed to hash 2");

    // Different salts, both verify.
    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1).expect("Failed to verify 1"));
    assert!(verify_password(password, &hash2).expect("Failed to verify 2"));
}

#[test]
fn test_hash_format_is_argon2() {
    let hash = hash_password("test123").expect("Failed to hash");

    assert!(
        hash.starts_with("$argon2"),
        "Hash should be Argon2 format: {}",
        hash
    );
}

#[test]
fn test_invalid_hash_format_fails() {
    for invalid_hash in ["", "not a valid hash", "$2b$10$invalid"] {
        let result = verify_password("test123", invalid_hash);
        assert!(
            result.is_err(),
            "Should fail for invalid hash format: {}",
            invalid_hash
        );
    }
}

#[test]
fn test_custom_work_factor_hasher() {
    let hasher = Argon2Hasher::new(1024, 1, 1).expect("valid parameters");
    let hash = hasher.hash("custom_cost").expect("Failed to hash");

    assert!(hash.starts_with("$argon2"));
    // PHC strings are self-describing, so the default verifier handles
    // any work factor.
    assert!(verify_password("custom_cost", &hash).expect("Failed to verify"));
    assert!(!verify_password("other", &hash).expect("Failed to verify"));
}

#[test]
fn test_invalid_work_factor_rejected() {
    // Zero iterations is below the argon2 minimum.
    assert!(Argon2Hasher::new(1024, 0, 1).is_err());
}

#[test]
fn test_hash_is_not_reversible() {
    let password = "secure_password";
    let hash = hash_password(password).expect("Failed to hash");

    assert!(!hash.contains(password));
}
