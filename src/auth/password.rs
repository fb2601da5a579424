use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub fn hash_password(password: &str) -> String {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

/// A stored hash that fails to parse counts as a mismatch; the row may
/// predate the current hash format.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(p) => p,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_original_password() {
        let hash = hash_password("admin123");
        assert!(verify_password("admin123", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("admin123");
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn hashing_twice_salts_differently() {
        let first = hash_password("admin123");
        let second = hash_password("admin123");
        assert_ne!(first, second);
        assert!(verify_password("admin123", &first));
        assert!(verify_password("admin123", &second));
    }

    #[test]
    fn malformed_stored_hash_is_a_mismatch() {
        assert!(!verify_password("admin123", "not-a-phc-string"));
    }
}
