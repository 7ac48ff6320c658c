//! Token issuance route
//!
//! Credentials arrive form-encoded per the OAuth2 password flow; password
//! verification runs on the blocking thread pool.

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Form, Json, Router};
use user_accounts_shared::types::{AccessToken, Credentials};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(issue_token))
}

/// POST /token - Exchange credentials for a bearer token
async fn issue_token(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> ApiResult<Json<AccessToken>> {
    let token = UserService::login(
        state.db(),
        state.tokens(),
        &credentials.username,
        &credentials.password,
    )
    .await?;
    Ok(Json(token))
}
