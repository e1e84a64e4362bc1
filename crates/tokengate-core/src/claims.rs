//! 토큰 클레임.
//!
//! [`TokenClaims`] 는 발급/검증된 토큰의 내용이고, [`TokenResponse`] 는
//! 클라이언트에 내려주는 JSON 형식입니다. 서명 대상 페이로드는
//! 표준 클레임(`iss`, `iat`, `exp`)과 사용자 정의 클레임을 함께 담습니다.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// 토큰 타입 (항상 "Bearer").
pub const TOKEN_TYPE: &str = "Bearer";

/// 기본 토큰 유효 기간 (초) - 7일.
pub const DEFAULT_VALIDITY_SECS: i64 = 7 * 24 * 60 * 60;

/// 기본 토큰 유효 기간.
pub fn default_validity() -> Duration {
    Duration::seconds(DEFAULT_VALIDITY_SECS)
}

/// 발급 또는 검증된 토큰의 클레임.
///
/// 새 토큰은 항상 새 클레임으로 만들어지며, 서명된 토큰 문자열은 서명이
/// 성공한 뒤에만 채워지고 이후 바뀌지 않습니다.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// 사용자 이름
    pub subject: String,
    /// 역할 이름
    pub role_name: String,
    /// 역할 ID
    pub role_id: Option<i64>,
    /// 토큰 타입
    pub token_type: String,
    /// 발급 시간 (Unix timestamp)
    pub issued_at: i64,
    /// 만료 시간 (Unix timestamp)
    pub expires_at: i64,
    /// 발급자
    pub issuer: String,
    /// 발급 시점 기준 남은 시간 (초)
    pub expires_in: i64,
    token: String,
}

impl TokenClaims {
    pub(crate) fn unsigned(
        subject: &str,
        role_name: &str,
        role_id: Option<i64>,
        issuer: &str,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            role_name: role_name.to_string(),
            role_id,
            token_type: TOKEN_TYPE.to_string(),
            issued_at,
            expires_at,
            issuer: issuer.to_string(),
            expires_in: expires_at - issued_at,
            token: String::new(),
        }
    }

    pub(crate) fn from_payload(payload: JwtPayload, token: &str) -> Self {
        Self {
            subject: payload.username,
            role_name: payload.role,
            role_id: payload.role_id,
            token_type: payload.token_type,
            issued_at: payload.iat,
            expires_at: payload.exp,
            issuer: payload.iss,
            expires_in: payload.expires_in,
            token: token.to_string(),
        }
    }

    pub(crate) fn to_payload(&self) -> JwtPayload {
        JwtPayload {
            iss: self.issuer.clone(),
            iat: self.issued_at,
            exp: self.expires_at,
            token_type: self.token_type.clone(),
            username: self.subject.clone(),
            role: self.role_name.clone(),
            role_id: self.role_id,
            expires_in: self.expires_in,
        }
    }

    pub(crate) fn signed(mut self, token: String) -> Self {
        self.token = token;
        self
    }

    /// 서명된 토큰 문자열.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// 주어진 시각에 만료되었는지 확인.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

impl std::fmt::Debug for TokenClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClaims")
            .field("subject", &self.subject)
            .field("role_name", &self.role_name)
            .field("role_id", &self.role_id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("issuer", &self.issuer)
            .field("expires_in", &self.expires_in)
            .field("token", &if self.token.is_empty() { "" } else { "[REDACTED]" })
            .finish()
    }
}

/// 서명되는 JWT 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct JwtPayload {
    #[serde(default)]
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    pub expires_in: i64,
}

/// 클라이언트 응답용 토큰 정보.
///
/// 필드 구성은 클라이언트 호환성을 위해 고정되어 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// 서명된 토큰
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 사용자 이름
    pub username: String,
    /// 역할 이름
    pub role: String,
    /// 역할 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    /// 만료까지 남은 시간 (초, 발급 시점 기준)
    pub expires_in: i64,
}

impl From<&TokenClaims> for TokenResponse {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            access_token: claims.token.clone(),
            token_type: claims.token_type.clone(),
            username: claims.subject.clone(),
            role: claims.role_name.clone(),
            role_id: claims.role_id,
            expires_in: claims.expires_in,
        }
    }
}

impl From<TokenClaims> for TokenResponse {
    fn from(claims: TokenClaims) -> Self {
        Self::from(&claims)
    }
}
