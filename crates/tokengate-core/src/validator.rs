//! 토큰 검증.
//!
//! 검증 결과는 세 가지로 나뉩니다:
//! - 유효: 서명이 올바르고 만료되지 않음
//! - 만료: 서명은 올바르지만 `exp` 가 현재 시각보다 이전 (클레임은 여전히 사용 가능)
//! - 무효: 서명 불일치, 형식 오류 등 (클레임을 신뢰할 수 없음)

use std::sync::Arc;

use jsonwebtoken::{decode, Validation};
use tracing::warn;

use crate::claims::JwtPayload;
use crate::clock::{Clock, SystemClock};
use crate::error::{TokenError, TokenResult};
use crate::signing::SigningContext;
use crate::TokenClaims;

/// 서명이 확인된 토큰의 상태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// 유효한 토큰
    Valid(TokenClaims),
    /// 만료되었지만 서명은 올바른 토큰
    Expired(TokenClaims),
}

impl TokenStatus {
    pub fn claims(&self) -> &TokenClaims {
        match self {
            TokenStatus::Valid(claims) | TokenStatus::Expired(claims) => claims,
        }
    }

    pub fn into_claims(self) -> TokenClaims {
        match self {
            TokenStatus::Valid(claims) | TokenStatus::Expired(claims) => claims,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TokenStatus::Expired(_))
    }
}

/// 토큰 검증기.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    context: Arc<SigningContext>,
    clock: Arc<dyn Clock>,
    validation: Arc<Validation>,
}

impl TokenValidator {
    pub fn new(context: Arc<SigningContext>) -> Self {
        Self::with_clock(context, Arc::new(SystemClock))
    }

    pub fn with_clock(context: Arc<SigningContext>, clock: Arc<dyn Clock>) -> Self {
        let validation = Arc::new(context.validation());
        Self {
            context,
            clock,
            validation,
        }
    }

    /// 서명을 확인하고 만료 여부를 구분합니다.
    ///
    /// 무효한 토큰만 `Err(TokenError::InvalidToken)` 로 반환됩니다.
    pub fn inspect(&self, token: &str) -> TokenResult<TokenStatus> {
        let data = decode::<JwtPayload>(token, self.context.decoding_key(), &self.validation)
            .map_err(|e| {
                warn!(error = %e, "Token rejected");
                TokenError::InvalidToken(e)
            })?;

        let payload = data.claims;
        if payload.exp <= payload.iat {
            warn!(iat = payload.iat, exp = payload.exp, "Token has an empty validity window");
            return Err(TokenError::malformed());
        }

        let claims = TokenClaims::from_payload(payload, token);
        if claims.is_expired_at(self.clock.now()) {
            Ok(TokenStatus::Expired(claims))
        } else {
            Ok(TokenStatus::Valid(claims))
        }
    }

    /// 토큰 파싱 및 검증.
    ///
    /// 만료된 토큰은 클레임 없이 `Err(TokenError::Expired)` 를 반환합니다.
    /// 만료된 토큰의 클레임은 [`TokenValidator::inspect`] 의
    /// [`TokenStatus::Expired`] 나 [`TokenValidator::decode`] 로 받습니다.
    /// 인가 게이트처럼 만료를 실패로만 다루는 호출자용입니다.
    pub fn parse(&self, token: &str) -> TokenResult<TokenClaims> {
        match self.inspect(token)? {
            TokenStatus::Valid(claims) => Ok(claims),
            TokenStatus::Expired(_) => Err(TokenError::Expired),
        }
    }

    /// 만료 여부와 관계없이 서명이 올바른 토큰의 클레임을 반환.
    pub fn decode(&self, token: &str) -> TokenResult<TokenClaims> {
        self.inspect(token).map(TokenStatus::into_claims)
    }
}
