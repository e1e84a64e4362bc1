//! 설정 관리.
//!
//! TOML 파일과 `TOKENGATE__` 접두사 환경 변수에서 설정을 로드합니다.
//! 예: `TOKENGATE__AUTH__SECRET=...`, `TOKENGATE__SERVER__PORT=8080`

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::claims::DEFAULT_VALIDITY_SECS;
use crate::signing::DEFAULT_ISSUER;

/// 설정 에러.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("설정 로드 실패: {0}")]
    Load(#[from] config::ConfigError),

    #[error("잘못된 설정: {0}")]
    Invalid(String),
}

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// 토큰 서명 설정
    #[serde(default)]
    pub auth: AuthConfig,
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 초기 사용자 목록 (메모리 자격증명 저장소용)
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

/// 토큰 서명 설정.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// 토큰 발급자
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// HMAC 공유 비밀 키
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub secret: SecretString,
    /// 토큰 유효 기간 (초)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            secret: empty_secret(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

impl AuthConfig {
    /// 서명에 필요한 값이 갖춰졌는지 확인.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.issuer.trim().is_empty() {
            return Err(SettingsError::Invalid("auth.issuer 가 비어 있습니다".to_string()));
        }
        if self.secret.expose_secret().is_empty() {
            return Err(SettingsError::Invalid("auth.secret 이 비어 있습니다".to_string()));
        }
        self.token_ttl()?;
        Ok(())
    }

    /// 토큰 유효 기간.
    ///
    /// 양수이고 `chrono::Duration` 으로 표현 가능한 범위여야 합니다.
    pub fn token_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        if self.token_ttl_secs <= 0 {
            return Err(SettingsError::Invalid(format!(
                "auth.token_ttl_secs 는 양수여야 합니다: {}",
                self.token_ttl_secs
            )));
        }
        chrono::Duration::try_seconds(self.token_ttl_secs).ok_or_else(|| {
            SettingsError::Invalid(format!(
                "auth.token_ttl_secs 가 너무 큽니다: {}",
                self.token_ttl_secs
            ))
        })
    }
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_token_ttl() -> i64 {
    DEFAULT_VALIDITY_SECS
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(SecretString::new(value.into()))
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 초기 사용자 항목.
///
/// 비밀번호 평문이 아니라 솔트와 다이제스트를 담습니다.
/// (`tokengate hash <password>` 로 생성)
#[derive(Debug, Clone, Deserialize)]
pub struct UserSeed {
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    pub salt: String,
    pub digest: String,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("TOKENGATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, SettingsError> {
        Self::load("config/default.toml")
    }
}
