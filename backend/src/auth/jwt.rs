//! Signed bearer token issuance and validation
//!
//! Tokens are HS256-signed JWTs carrying the username as subject and a
//! fixed time-to-live. Keys are pre-computed once at startup.

use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed signing keys for token operations
///
/// These are expensive to create, so they are built once and cached in
/// AppState.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    /// Create new keys from the configured secret. Called once at startup.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token issuance and validation service
///
/// Cheap to clone: keys are Arc-wrapped. Time is taken from `chrono::Utc`
/// for both issuance and validation, so issue/validate never disagree on
/// time zones.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    expiry_secs: i64,
    validation: Validation,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    ///
    /// Call once at application startup and store in AppState.
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        // Expiry enforcement is explicit: no leeway, exp must be present.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: TokenKeys::new(secret),
            expiry_secs,
            validation,
        }
    }

    /// Issue a signed token for the given subject
    pub fn issue(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Validate a token and return its claims
    ///
    /// Fails on a bad signature, an unparseable token, an expired `exp`, or
    /// an absent/empty subject.
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        if token_data.claims.sub.is_empty() {
            bail!("Invalid token: empty subject");
        }

        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("test-secret", 1800)
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let service = create_test_service();

        let token = service.issue("alice").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative expiry puts exp in the past at issuance
        let service = TokenService::new("test-secret", -10);

        let token = service.issue("alice").unwrap();
        let result = service.validate(&token);

        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = create_test_service();
        assert!(service.validate("not.a.token").is_err());
        assert!(service.validate("").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = create_test_service();
        let mut token = service.issue("alice").unwrap();
        token.push('x');
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new("another-secret", 1800);

        let token = other.issue("alice").unwrap();
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_empty_subject_rejected() {
        let service = create_test_service();

        // Craft a structurally valid token whose subject is empty
        let now = Utc::now();
        let claims = Claims {
            sub: String::new(),
            exp: (now + Duration::seconds(60)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_missing_exp_rejected() {
        let service = create_test_service();

        // A payload without exp must not validate, even unexpired claims
        #[derive(Serialize)]
        struct NoExpiry {
            sub: String,
            iat: i64,
        }
        let claims = NoExpiry {
            sub: "alice".to_string(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let cloned = service.clone();

        let token = service.issue("alice").unwrap();
        assert_eq!(cloned.validate(&token).unwrap().sub, "alice");
    }
}
