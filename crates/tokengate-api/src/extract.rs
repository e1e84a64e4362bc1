//! Axum용 인증 추출기.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use tokengate_core::{HeaderSource, TokenClaims};

use crate::error::ApiError;
use crate::state::AuthState;

/// `HeaderMap` 을 [`HeaderSource`] 로 노출하는 래퍼.
///
/// ASCII 가 아닌 헤더 값은 없는 것으로 취급합니다.
#[derive(Debug, Clone, Copy)]
pub struct RequestHeaders<'a>(pub &'a HeaderMap);

impl HeaderSource for RequestHeaders<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }
}

/// 인증 추출기.
///
/// 유효하고 만료되지 않은 토큰이면 역할과 무관하게 통과합니다.
/// [`crate::require_roles`] 미들웨어가 이미 검증한 요청이면 그 결과를 재사용합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.subject)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub TokenClaims);

impl<S> FromRequestParts<S> for JwtAuth
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<TokenClaims>() {
            return Ok(JwtAuth(claims.clone()));
        }

        let auth = AuthState::from_ref(state);
        let claims = auth
            .tokens
            .gate()
            .claims_from_request(&RequestHeaders(&parts.headers))?;

        Ok(JwtAuth(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_headers_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));

        let source = RequestHeaders(&headers);
        assert_eq!(source.header("Authorization"), Some("Bearer abc"));
        assert_eq!(source.header("X-Missing"), None);
    }

    #[test]
    fn test_non_ascii_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
        );
        assert_eq!(RequestHeaders(&headers).header("Authorization"), None);
    }
}
