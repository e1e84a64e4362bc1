//! 토큰 서명 컨텍스트.
//!
//! 발급자 이름과 공유 비밀 키를 보관합니다. 프로세스 시작 시 한 번 생성되고
//! 이후에는 읽기 전용으로 `Arc` 를 통해 공유됩니다. 변경 메서드는 없으며,
//! 키를 바꾸려면 새 컨텍스트로 구성 요소를 다시 만들어야 합니다.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;

use crate::config::{AuthConfig, SettingsError};

/// 기본 발급자 이름.
pub const DEFAULT_ISSUER: &str = "tokengate";

/// 서명 알고리즘 (HMAC-SHA256).
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// 불변 서명 컨텍스트.
pub struct SigningContext {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningContext {
    /// 발급자와 비밀 키로 컨텍스트 생성.
    pub fn new(issuer: impl Into<String>, secret: &[u8]) -> Self {
        Self {
            issuer: issuer.into(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// 인증 설정에서 컨텍스트 생성.
    ///
    /// 발급자나 비밀 키가 비어 있으면 에러를 반환합니다.
    pub fn from_config(config: &AuthConfig) -> Result<Self, SettingsError> {
        config.validate()?;
        Ok(Self::new(
            config.issuer.clone(),
            config.secret.expose_secret().as_bytes(),
        ))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub(crate) fn header(&self) -> Header {
        Header::new(SIGNING_ALGORITHM)
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// 서명 검증 규칙.
    ///
    /// 만료는 라이브러리가 아닌 [`crate::TokenValidator`] 가 직접 판단하므로
    /// `exp` 검사를 끕니다. `exp`, `iat` 클레임은 필수입니다.
    pub(crate) fn validation(&self) -> Validation {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);
        validation
    }
}

impl std::fmt::Debug for SigningContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningContext")
            .field("issuer", &self.issuer)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
