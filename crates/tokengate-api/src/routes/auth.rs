//! 인증 endpoint.
//!
//! 로그인으로 토큰을 발급받고, `Authorization: Bearer <token>` 헤더로
//! 토큰을 갱신하거나 현재 클레임을 조회합니다.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tokengate_core::{bearer_token, TokenResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::extract::{JwtAuth, RequestHeaders};
use crate::state::AuthState;

/// 로그인 요청.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 128, message = "사용자 이름은 1-128자여야 합니다"))]
    pub username: String,
    #[validate(length(min = 1, message = "비밀번호가 필요합니다"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// 사용자 이름/비밀번호로 토큰 발급.
async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let Some(stored) = state.credentials.find(&request.username).await else {
        warn!(username = %request.username, "Login failed: unknown user");
        return Err(ApiError::InvalidCredentials);
    };

    if !stored.credential.verify(&request.password)? {
        warn!(username = %request.username, "Login failed: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let tokens = &state.tokens;
    let claims = tokens.issuer().issue(
        &stored.username,
        &stored.role,
        stored.role_id,
        tokens.valid_for(),
    )?;

    info!(username = %claims.subject, role = %claims.role_name, "Login succeeded");
    Ok(Json(TokenResponse::from(claims)))
}

/// 현재 토큰으로 새 토큰 발급.
///
/// 만료된 토큰도 서명이 올바르면 갱신됩니다.
async fn refresh(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> ApiResult<Json<TokenResponse>> {
    let request_headers = RequestHeaders(&headers);
    let token = bearer_token(&request_headers)?;
    let claims = state.tokens.refresher().refresh(token)?;
    Ok(Json(TokenResponse::from(claims)))
}

/// 현재 토큰의 클레임 조회.
async fn me(JwtAuth(claims): JwtAuth) -> Json<TokenResponse> {
    Json(TokenResponse::from(claims))
}

pub fn auth_router() -> Router<AuthState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
}
