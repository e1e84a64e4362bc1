//! 토큰 구성 요소 묶음.
//!
//! 하나의 [`SigningContext`] 와 시계를 공유하는 발급기, 검증기, 갱신기,
//! 인가 게이트를 한 번에 만듭니다. 모든 구성 요소는 `Clone` 이며 내부적으로
//! `Arc` 를 공유하므로 요청마다 복제해도 저렴합니다.

use std::sync::Arc;

use chrono::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::{AuthConfig, SettingsError};
use crate::{AuthorizationGate, SigningContext, TokenIssuer, TokenRefresher, TokenValidator};

#[derive(Debug, Clone)]
pub struct TokenService {
    issuer: TokenIssuer,
    validator: TokenValidator,
    refresher: TokenRefresher,
    gate: AuthorizationGate,
    valid_for: Duration,
}

impl TokenService {
    pub fn new(context: Arc<SigningContext>, valid_for: Duration) -> Self {
        Self::with_clock(context, valid_for, Arc::new(SystemClock))
    }

    pub fn with_clock(
        context: Arc<SigningContext>,
        valid_for: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let issuer = TokenIssuer::with_clock(context.clone(), clock.clone());
        let validator = TokenValidator::with_clock(context, clock);
        let refresher = TokenRefresher::new(validator.clone(), issuer.clone(), valid_for);
        let gate = AuthorizationGate::new(validator.clone());

        Self {
            issuer,
            validator,
            refresher,
            gate,
            valid_for,
        }
    }

    /// 인증 설정에서 생성.
    pub fn from_config(config: &AuthConfig) -> Result<Self, SettingsError> {
        let context = Arc::new(SigningContext::from_config(config)?);
        Ok(Self::new(context, config.token_ttl()?))
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }

    pub fn refresher(&self) -> &TokenRefresher {
        &self.refresher
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// 설정된 유효 기간.
    pub fn valid_for(&self) -> Duration {
        self.valid_for
    }
}
