//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK when the process is running.
//! Used by Docker, Kubernetes, ECS and load balancers to verify the service is alive.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Value of `status` in every successful health response
pub const STATUS_UP: &str = "up";

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Health check handler.
///
/// Returns `{"status": "up"}`, plus `key` when a key provider is configured.
/// The provider is queried on every request; a provider failure surfaces as a 500.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let key = match &state.key_provider {
        Some(provider) => Some(provider.key().await?),
        None => None,
    };

    Ok(Json(HealthResponse {
        status: STATUS_UP,
        key,
    }))
}
