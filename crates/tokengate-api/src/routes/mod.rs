//! REST API 라우트.
//!
//! - `GET  /health`
//! - `POST /api/v1/auth/login`
//! - `POST /api/v1/auth/refresh`
//! - `GET  /api/v1/auth/me`

pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AuthState;

pub use auth::{auth_router, LoginRequest};
pub use health::{health_router, HealthResponse};

/// 전체 라우터 생성.
pub fn create_router(state: AuthState) -> Router {
    Router::new()
        .merge(health_router())
        .nest("/api/v1/auth", auth_router())
        .with_state(state)
}
