//! Password hashing and verification
//!
//! Argon2id with a fresh random salt per call; the salt and cost parameters
//! travel inside the PHC output string. Hashing is deliberately expensive,
//! so async callers go through the `_async` variants, which run the work on
//! the blocking thread pool instead of stalling the runtime.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password into a PHC string (blocking)
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?;
    Ok(hashed.to_string())
}

/// Hash on the blocking pool so the runtime keeps serving other requests
pub async fn hash_async(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash(&password))
        .await
        .map_err(|e| anyhow::anyhow!("Hashing task failed to join: {}", e))?
}

/// Check a plaintext against a stored PHC string (blocking)
///
/// An unparseable stored hash counts as a mismatch, so a corrupt record
/// fails closed on the login path instead of raising a server error.
pub fn verify(password: &str, stored: &str) -> Result<bool> {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return Ok(false);
    };
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Verify on the blocking pool
pub async fn verify_async(password: String, stored: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify(&password, &stored))
        .await
        .map_err(|e| anyhow::anyhow!("Verification task failed to join: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let hashed = hash("secret").unwrap();
        assert!(verify("secret", &hashed).unwrap());
        assert!(!verify("not-secret", &hashed).unwrap());
    }

    #[test]
    fn test_salting_makes_hashes_unique() {
        let first = hash("secret").unwrap();
        let second = hash("secret").unwrap();
        assert_ne!(first, second);
        assert!(verify("secret", &first).unwrap());
        assert!(verify("secret", &second).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_fails_closed() {
        assert!(!verify("secret", "").unwrap());
        assert!(!verify("secret", "$argon2id$garbage").unwrap());
        assert!(!verify("secret", "plaintext-left-in-column").unwrap());
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let hashed = hash_async("secret".to_string()).await.unwrap();
        assert!(verify_async("secret".to_string(), hashed.clone())
            .await
            .unwrap());
        assert!(!verify_async("wrong".to_string(), hashed).await.unwrap());
    }
}
