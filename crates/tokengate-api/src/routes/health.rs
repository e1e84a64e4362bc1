//! 헬스 체크 endpoint.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AuthState;

/// 헬스 체크 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn health_router() -> Router<AuthState> {
    Router::new().route("/health", get(health))
}
