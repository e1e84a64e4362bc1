//! 토큰 갱신.
//!
//! 기존 토큰으로 새 토큰을 발급합니다. 만료는 허용되지만 무효한 토큰은
//! 그대로 실패합니다. 이전 토큰은 폐기되거나 추적되지 않습니다.

use chrono::Duration;
use tracing::debug;

use crate::error::TokenResult;
use crate::{TokenClaims, TokenIssuer, TokenValidator};

/// 토큰 갱신기.
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    validator: TokenValidator,
    issuer: TokenIssuer,
    valid_for: Duration,
}

impl TokenRefresher {
    pub fn new(validator: TokenValidator, issuer: TokenIssuer, valid_for: Duration) -> Self {
        Self {
            validator,
            issuer,
            valid_for,
        }
    }

    /// 새 발급 시간과 만료 시간으로 토큰을 다시 발급합니다.
    ///
    /// 사용자 이름, 역할, 역할 ID 는 기존 토큰에서 가져옵니다.
    pub fn refresh(&self, token: &str) -> TokenResult<TokenClaims> {
        let status = self.validator.inspect(token)?;
        let expired = status.is_expired();
        let previous = status.into_claims();

        let renewed = self.issuer.issue(
            &previous.subject,
            &previous.role_name,
            previous.role_id,
            self.valid_for,
        )?;

        debug!(
            username = %renewed.subject,
            expired,
            previous_exp = previous.expires_at,
            exp = renewed.expires_at,
            "Token refreshed"
        );

        Ok(renewed)
    }
}
