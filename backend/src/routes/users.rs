//! User account CRUD routes

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use user_accounts_shared::types::{
    CreateUserRequest, ListUsersQuery, Message, UpdateUserRequest, UserListResponse, UserResponse,
};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(read_current_user))
        .route("/:id", get(read_user).put(update_user).delete(delete_user))
}

/// POST /users - Create a new user
///
/// Returns 201 with the created record, or 400 when the username is taken.
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = UserService::create(state.db(), &req.username, &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users?skip=&limit= - Page users in id order
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let users = UserService::list(state.db(), query.skip, query.limit).await?;
    Ok(Json(UserListResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// GET /users/me - The account behind the presented bearer token
async fn read_current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// GET /users/:id - Fetch one user
async fn read_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get(state.db(), id).await?;
    Ok(Json(user.into()))
}

/// PUT /users/:id - Replace username, email, and password
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user =
        UserService::update(state.db(), id, &req.username, &req.email, &req.password).await?;
    Ok(Json(user.into()))
}

/// DELETE /users/:id - Remove a user
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Message>> {
    UserService::delete(state.db(), id).await?;
    Ok(Json(Message::new("User deleted")))
}
