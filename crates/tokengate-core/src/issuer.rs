//! 토큰 발급.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::encode;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{TokenError, TokenResult};
use crate::signing::SigningContext;
use crate::TokenClaims;

/// 서명된 Bearer 토큰 발급기.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    context: Arc<SigningContext>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(context: Arc<SigningContext>) -> Self {
        Self::with_clock(context, Arc::new(SystemClock))
    }

    pub fn with_clock(context: Arc<SigningContext>, clock: Arc<dyn Clock>) -> Self {
        Self { context, clock }
    }

    /// 새 토큰 발급.
    ///
    /// # Arguments
    ///
    /// * `subject` - 사용자 이름
    /// * `role_name` - 역할 이름
    /// * `role_id` - 역할 ID (선택)
    /// * `valid_for` - 유효 기간 (양수여야 함)
    ///
    /// # Returns
    ///
    /// 서명된 토큰이 채워진 클레임. 실패 시 부분 결과는 반환하지 않습니다.
    pub fn issue(
        &self,
        subject: &str,
        role_name: &str,
        role_id: Option<i64>,
        valid_for: Duration,
    ) -> TokenResult<TokenClaims> {
        let seconds = valid_for.num_seconds();
        if seconds <= 0 {
            return Err(TokenError::InvalidValidity { seconds });
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add(seconds)
            .ok_or(TokenError::InvalidValidity { seconds })?;

        let claims = TokenClaims::unsigned(
            subject,
            role_name,
            role_id,
            self.context.issuer(),
            issued_at,
            expires_at,
        );

        let token = encode(
            &self.context.header(),
            &claims.to_payload(),
            self.context.encoding_key(),
        )
        .map_err(TokenError::Signing)?;

        debug!(
            username = %claims.subject,
            role = %claims.role_name,
            exp = claims.expires_at,
            "Token issued"
        );

        Ok(claims.signed(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::claims::{default_validity, TOKEN_TYPE};

    fn issuer_at(now: i64) -> TokenIssuer {
        let context = Arc::new(SigningContext::new("test-issuer", b"test-secret-key"));
        TokenIssuer::with_clock(context, Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_issue_sets_claims() {
        let claims = issuer_at(1_700_000_000)
            .issue("alice", "admin", Some(1), default_validity())
            .unwrap();

        assert_eq!(claims.subject, "alice");
        assert_eq!(claims.role_name, "admin");
        assert_eq!(claims.role_id, Some(1));
        assert_eq!(claims.token_type, TOKEN_TYPE);
        assert_eq!(claims.issuer, "test-issuer");
        assert_eq!(claims.issued_at, 1_700_000_000);
        assert_eq!(claims.expires_at - claims.issued_at, 7 * 24 * 3600);
        assert_eq!(claims.expires_in, 7 * 24 * 3600);
        assert_eq!(claims.token().split('.').count(), 3);
    }

    #[test]
    fn test_issue_rejects_non_positive_validity() {
        let issuer = issuer_at(1_700_000_000);

        let result = issuer.issue("alice", "admin", None, Duration::zero());
        assert!(matches!(result, Err(TokenError::InvalidValidity { seconds: 0 })));

        let result = issuer.issue("alice", "admin", None, Duration::seconds(-5));
        assert!(matches!(result, Err(TokenError::InvalidValidity { seconds: -5 })));
    }

    #[test]
    fn test_issue_produces_fresh_tokens() {
        let first = issuer_at(1_700_000_000)
            .issue("alice", "admin", None, Duration::hours(1))
            .unwrap();
        let second = issuer_at(1_700_000_001)
            .issue("alice", "admin", None, Duration::hours(1))
            .unwrap();

        assert_ne!(first.token(), second.token());
    }
}
