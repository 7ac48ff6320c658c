//! Liveness and readiness probes

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Probe response body
#[derive(Serialize)]
pub struct Probe {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl Probe {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

/// GET /health - basic health check, no dependency probing
pub async fn health_check() -> Json<Probe> {
    Json(Probe::new("healthy"))
}

/// GET /health/ready - 503 until the database answers
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<Probe>, (StatusCode, Json<Probe>)> {
    match db::ping(state.db()).await {
        Ok(()) => Ok(Json(Probe {
            database: Some("ok".to_string()),
            ..Probe::new("ready")
        })),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Probe {
                database: Some(e.to_string()),
                ..Probe::new("not_ready")
            }),
        )),
    }
}

/// GET /health/live - always OK while the process serves requests
pub async fn liveness_check() -> Json<Probe> {
    Json(Probe::new("alive"))
}
