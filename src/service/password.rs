//! Password hashing and verification (argon2id).

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::IntakeError;

/// Hash a password with a fresh random salt and the default argon2id work factor.
pub fn hash_password(password: &str) -> Result<String, IntakeError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// Parameters and salt are read from the hash itself. A hash that does not parse
/// never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("password1").unwrap();
        assert_ne!(hash, "password1");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password1", &hash));
        assert!(!verify_password("password2", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn salts_differ_between_calls() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-input", &a));
        assert!(verify_password("same-input", &b));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("password1", "password1"));
        assert!(!verify_password("password1", ""));
    }
}
