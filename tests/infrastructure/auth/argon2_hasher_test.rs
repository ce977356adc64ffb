use tbodemy::application::ports::PasswordHasher;
use tbodemy::infrastructure::auth::Argon2PasswordHasher;

#[test]
fn given_hashed_password_when_verifying_then_only_the_original_matches() {
    let hasher = Argon2PasswordHasher::new();
    let hash = hasher.hash("s3cret!").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(hasher.verify("s3cret!", &hash).unwrap());
    assert!(!hasher.verify("wrong", &hash).unwrap());
}

#[test]
fn given_same_password_when_hashing_twice_then_salts_differ() {
    let hasher = Argon2PasswordHasher::new();

    assert_ne!(hasher.hash("pw").unwrap(), hasher.hash("pw").unwrap());
}

#[test]
fn given_garbage_hash_when_verifying_then_error_is_returned() {
    let hasher = Argon2PasswordHasher::new();

    assert!(hasher.verify("pw", "not-a-hash").is_err());
}
