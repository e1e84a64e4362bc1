//! API 에러 응답.
//!
//! 모든 에러는 다음 형식으로 응답합니다:
//!
//! ```json
//! { "error": { "code": "TOKEN_EXPIRED", "message": "토큰이 만료되었습니다" } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokengate_core::{AuthError, HashError, TokenError};
use tracing::error;

/// API 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("아이디 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,

    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    #[error("자격증명 처리 실패: {0}")]
    Credential(#[from] HashError),
}

/// API 결과 타입.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP 상태 코드와 에러 코드.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Auth(AuthError::MalformedHeader) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_HEADER")
            }
            ApiError::Auth(AuthError::Token(err)) | ApiError::Token(err) => token_status(err),
            ApiError::Auth(AuthError::UnauthorizedRole { .. }) => {
                (StatusCode::FORBIDDEN, "UNAUTHORIZED_ROLE")
            }
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::Credential(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

fn token_status(err: &TokenError) -> (StatusCode, &'static str) {
    match err {
        TokenError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        TokenError::Expired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
        TokenError::Signing(_) | TokenError::InvalidValidity { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_SIGNING_FAILED")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // 내부 에러 상세는 로그에만 남김
        let message = if status.is_server_error() {
            error!(error = %self, code, "Request failed");
            "내부 오류가 발생했습니다".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
