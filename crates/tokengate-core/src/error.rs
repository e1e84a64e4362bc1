//! 토큰 처리 에러.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// 토큰 발급/검증/갱신 에러.
///
/// `Expired` 만이 복구 가능한 실패이며, 갱신 경로에서만 허용됩니다.
#[derive(Debug, Error)]
pub enum TokenError {
    /// 키 또는 직렬화 문제로 서명 실패
    #[error("토큰 서명 실패: {0}")]
    Signing(#[source] JwtError),

    /// 유효 기간이 0 이하라 `exp > iat` 를 만족할 수 없음
    #[error("잘못된 토큰 유효 기간: {seconds}초")]
    InvalidValidity { seconds: i64 },

    /// 서명 불일치, 형식 오류 등 구조적 문제
    #[error("유효하지 않은 토큰: {0}")]
    InvalidToken(#[source] JwtError),

    /// 서명은 올바르지만 만료됨
    #[error("토큰이 만료되었습니다")]
    Expired,
}

impl TokenError {
    pub(crate) fn malformed() -> Self {
        TokenError::InvalidToken(JwtError::from(ErrorKind::InvalidToken))
    }

    /// 만료 에러인지 확인.
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }

    /// 발급 단계 에러인지 확인.
    pub fn is_signing_failure(&self) -> bool {
        matches!(
            self,
            TokenError::Signing(_) | TokenError::InvalidValidity { .. }
        )
    }
}

/// 토큰 처리 결과 타입.
pub type TokenResult<T> = Result<T, TokenError>;
