use bcrypt::{DEFAULT_COST, hash, verify};
use sha2::{Digest, Sha256};
use crate::error::{AppError, AppResult};

/// Hash a password for storage (bcrypt, salted and iterated).
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// Check a plaintext password against a stored hash.
///
/// Rows written before bcrypt was introduced hold a bare SHA-256 hex digest;
/// those are still accepted.
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    if is_legacy_digest(stored) {
        return Ok(legacy_digest(password).eq_ignore_ascii_case(stored));
    }
    verify(password, stored)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))
}

fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == 64 && stored.chars().all(|c| c.is_ascii_hexdigit())
}

fn legacy_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "admin123";
        let hashed = hash_password(password).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("admin123").unwrap();
        let b = hash_password("admin123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_sha256_digest_is_accepted() {
        // sha256("admin123")
        let stored = "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";
        assert!(verify_password("admin123", stored).unwrap());
        assert!(!verify_password("admin124", stored).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password("admin123", "not-a-hash").is_err());
    }
}
