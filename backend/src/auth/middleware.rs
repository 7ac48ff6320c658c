//! Authentication middleware
//!
//! Axum extractor that resolves the requesting user from a bearer token.

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Message returned for every credential failure on this path. An invalid
/// token and a token whose user no longer exists are indistinguishable to
/// the caller.
const CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// Requesting user resolved from a validated bearer token
///
/// Validates the token with the pre-computed keys in AppState, then looks
/// the subject up in the user store. Token claims carry the username, so a
/// deleted account invalidates outstanding tokens immediately.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        // Check Bearer prefix
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        let claims = app_state
            .tokens()
            .validate(token)
            .map_err(|_| ApiError::Unauthorized(CREDENTIALS_MESSAGE.to_string()))?;

        // Store failures surface as 5xx, not as a credential rejection
        let user = UserRepository::find_by_username(app_state.db(), &claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized(CREDENTIALS_MESSAGE.to_string()))?;

        Ok(CurrentUser(user))
    }
}
