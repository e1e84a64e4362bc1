//! 역할 기반 요청 인가.
//!
//! `Authorization: Bearer <token>` 헤더에서 토큰을 꺼내 검증하고,
//! 토큰의 역할이 엔드포인트의 허용 역할 정책을 만족하는지 확인합니다.
//!
//! # 정책 문자열
//!
//! - `""`: 인증만 요구 (역할 무관)
//! - `"*"`: 모든 역할 허용
//! - `"admin, manager"`: 쉼표로 구분된 역할 목록 (대소문자 구분, 앞뒤 공백 제거)

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::error::TokenError;
use crate::{TokenClaims, TokenValidator};

/// 인가 헤더 이름.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Bearer 접두사 (대소문자 구분, 공백 한 칸).
pub const BEARER_PREFIX: &str = "Bearer ";

/// 와일드카드 정책.
pub const WILDCARD_POLICY: &str = "*";

/// 인가 에러.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization 헤더가 'Bearer <token>' 형식이 아닙니다")]
    MalformedHeader,

    /// 토큰 검증 실패 (무효 또는 만료)
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("허용되지 않은 역할입니다: {role}")]
    UnauthorizedRole { role: String },
}

impl AuthError {
    pub fn is_expired(&self) -> bool {
        matches!(self, AuthError::Token(TokenError::Expired))
    }

    pub fn is_invalid_token(&self) -> bool {
        matches!(self, AuthError::Token(TokenError::InvalidToken(_)))
    }
}

/// 헤더 조회가 가능한 요청.
pub trait HeaderSource {
    fn header(&self, name: &str) -> Option<&str>;
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

impl HeaderSource for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// 엔드포인트 허용 역할 정책.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolePolicy {
    /// 유효한 토큰이면 역할과 무관하게 허용
    Authenticated,
    /// 모든 역할 허용
    AnyRole,
    /// 나열된 역할만 허용
    Roles(BTreeSet<String>),
}

impl RolePolicy {
    /// 정책 문자열 파싱.
    ///
    /// 공백뿐인 항목은 버립니다. 남는 항목이 없으면 어떤 역할도 허용하지 않습니다.
    pub fn parse(spec: &str) -> Self {
        if spec.is_empty() {
            return RolePolicy::Authenticated;
        }
        if spec == WILDCARD_POLICY {
            return RolePolicy::AnyRole;
        }

        let roles = spec
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect();
        RolePolicy::Roles(roles)
    }

    /// 역할 목록으로 정책 생성.
    pub fn roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RolePolicy::Roles(roles.into_iter().map(Into::into).collect())
    }

    /// 역할이 정책을 만족하는지 확인.
    pub fn allows(&self, role: &str) -> bool {
        match self {
            RolePolicy::Authenticated | RolePolicy::AnyRole => true,
            RolePolicy::Roles(roles) => roles.contains(role),
        }
    }
}

impl Default for RolePolicy {
    fn default() -> Self {
        RolePolicy::Authenticated
    }
}

impl FromStr for RolePolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RolePolicy::parse(s))
    }
}

impl From<&str> for RolePolicy {
    fn from(spec: &str) -> Self {
        RolePolicy::parse(spec)
    }
}

impl std::fmt::Display for RolePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RolePolicy::Authenticated => Ok(()),
            RolePolicy::AnyRole => f.write_str(WILDCARD_POLICY),
            RolePolicy::Roles(roles) => {
                let joined: Vec<&str> = roles.iter().map(String::as_str).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

/// `Authorization` 헤더에서 Bearer 토큰 추출.
///
/// 접두사가 정확히 `"Bearer "` 가 아니면 토큰 파싱 전에 실패합니다.
pub fn bearer_token<R: HeaderSource + ?Sized>(request: &R) -> Result<&str, AuthError> {
    request
        .header(AUTHORIZATION_HEADER)
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MalformedHeader)
}

/// 요청 인가 게이트.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    validator: TokenValidator,
}

impl AuthorizationGate {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    /// 요청에서 검증된 클레임 추출 (역할 검사 없음).
    ///
    /// 만료된 토큰은 허용하지 않습니다.
    pub fn claims_from_request<R: HeaderSource + ?Sized>(
        &self,
        request: &R,
    ) -> Result<TokenClaims, AuthError> {
        let token = bearer_token(request)?;
        Ok(self.validator.parse(token)?)
    }

    /// 요청 인가.
    ///
    /// # Returns
    ///
    /// 허용되면 검증된 클레임, 아니면 에러 종류별 [`AuthError`]
    pub fn authorize<R: HeaderSource + ?Sized>(
        &self,
        request: &R,
        policy: &RolePolicy,
    ) -> Result<TokenClaims, AuthError> {
        let claims = self.claims_from_request(request)?;

        if policy.allows(&claims.role_name) {
            Ok(claims)
        } else {
            info!(
                username = %claims.subject,
                role = %claims.role_name,
                policy = %policy,
                "Role not permitted"
            );
            Err(AuthError::UnauthorizedRole {
                role: claims.role_name,
            })
        }
    }
}
