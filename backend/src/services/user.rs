//! Account operations and credential login
//!
//! Password hashing and verification run on the blocking thread pool; the
//! token service is passed by reference with its keys pre-computed.

use crate::auth::password::{hash_async, verify_async};
use crate::auth::TokenService;
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use sqlx::PgPool;
use user_accounts_shared::types::AccessToken;
use user_accounts_shared::validation::{validate_email_length, validate_password, validate_username};
use validator::ValidateEmail;

/// Account operations over the user store
pub struct UserService;

impl UserService {
    /// Create a new user
    ///
    /// Fails with Conflict when the username is taken. The uniqueness check
    /// precedes the insert, so a duplicate create leaves the store untouched.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        validate_input(username, email, password)?;

        if UserRepository::username_exists(pool, username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, username, email, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        Ok(user)
    }

    /// Page users in id order
    pub async fn list(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<UserRecord>, ApiError> {
        // Negative values would be SQL errors; treat them as empty bounds
        let users = UserRepository::list(pool, skip.max(0), limit.max(0))
            .await
            .map_err(ApiError::Internal)?;

        Ok(users)
    }

    /// Fetch a user by id
    pub async fn get(pool: &PgPool, id: i64) -> Result<UserRecord, ApiError> {
        UserRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Replace a user's username, email, and password
    ///
    /// The password is re-hashed unconditionally, even when the caller sends
    /// the plaintext currently in effect. Username uniqueness is not
    /// re-checked here; a collision hits the unique index and surfaces as a
    /// store error.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        validate_input(username, email, password)?;

        let password_hash = hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        UserRepository::update(pool, id, username, email, &password_hash)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Delete a user by id
    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), ApiError> {
        let deleted = UserRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    /// Verify credentials and issue a bearer token
    ///
    /// Unknown username and wrong password produce the same rejection.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

        let valid = verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized(
                "Incorrect username or password".to_string(),
            ));
        }

        let access_token = tokens.issue(&user.username).map_err(ApiError::Internal)?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expiry_secs(),
        })
    }
}

/// Shared input checks for create and update
fn validate_input(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    validate_username(username).map_err(ApiError::Validation)?;
    validate_email_length(email).map_err(ApiError::Validation)?;
    if !email.validate_email() {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }
    validate_password(password).map_err(ApiError::Validation)?;
    Ok(())
}
