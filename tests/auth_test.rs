//! Authentication tests: password hashing and verification.

use ticketdesk::auth::password;

const TEST_PASSWORD: &str = "password123";

#[test]
fn test_hash_password_success() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    assert!(hash.starts_with("$argon2"));
}

#[test]
fn test_verify_password_correct_and_incorrect() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    assert!(password::verify_password(TEST_PASSWORD, &hash).expect("Verification failed"));
    assert!(!password::verify_password("wrongpassword", &hash).expect("Verification failed"));
}

#[test]
fn test_hash_password_randomness() {
    let hash1 = password::hash_password(TEST_PASSWORD).unwrap();
    let hash2 = password::hash_password(TEST_PASSWORD).unwrap();

    // Same password, different salts
    assert_ne!(hash1, hash2);
    assert!(password::verify_password(TEST_PASSWORD, &hash1).unwrap());
    assert!(password::verify_password(TEST_PASSWORD, &hash2).unwrap());
}

#[test]
fn test_verify_rejects_malformed_hash() {
    assert!(password::verify_password(TEST_PASSWORD, "not-a-hash").is_err());
}
