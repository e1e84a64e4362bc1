//! 핸들러 간 공유 상태.

use std::sync::Arc;

use tokengate_core::TokenService;

use crate::credentials::CredentialStore;

/// 인증 공유 상태.
///
/// 토큰 구성 요소는 시작 시 한 번 만들어지고 이후 읽기 전용입니다.
#[derive(Clone)]
pub struct AuthState {
    /// 토큰 발급/검증/갱신/인가
    pub tokens: TokenService,
    /// 로그인용 자격증명 조회
    pub credentials: Arc<dyn CredentialStore>,
}

impl AuthState {
    pub fn new(tokens: TokenService, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            tokens,
            credentials,
        }
    }
}
