use lectern::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "my_secure_password123";
    let result = hash_password(password);

    assert!(result.is_ok());
    let hash = result.unwrap();
    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_hash_password_produces_different_hashes() {
    let password = "same_password";

    let hash1 = hash_password(password).unwrap();
    let hash2 = hash_password(password).unwrap();

    // bcrypt salts each hash.
    assert_ne!(hash1, hash2);
}

#[test]
fn test_verify_password_correct() {
    let password = "correct_password";
    let hash = hash_password(password).unwrap();

    let result = verify_password(password, &hash);

    assert!(result.is_ok());
    assert!(result.unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let password = "correct_password";
    let hash = hash_password(password).unwrap();

    let result = verify_password("wrong_password", &hash);

    assert!(result.is_ok());
    assert!(!result.unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = verify_password("any_password", "not-a-bcrypt-hash");

    assert!(result.is_err());
}

#[test]
fn test_hash_empty_password() {
    let result = hash_password("");

    assert!(result.is_ok());
    assert!(verify_password("", &result.unwrap()).unwrap());
}
