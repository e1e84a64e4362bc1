//! # Tokengate Core
//!
//! 자격증명 해싱과 Bearer 토큰 기반 인증/인가의 핵심 로직을 제공합니다.
//!
//! - [`password`]: 솔트 SHA-256 해싱 및 검증
//! - [`SigningContext`]: 발급자 이름과 공유 비밀 키 (시작 시 한 번 생성, 이후 읽기 전용)
//! - [`TokenIssuer`]: 서명된 토큰 발급
//! - [`TokenValidator`]: 서명 검증, 만료/무효 구분
//! - [`TokenRefresher`]: 만료만 허용하는 토큰 재발급
//! - [`AuthorizationGate`]: `Authorization` 헤더 기반 역할 인가
//!
//! HTTP 계층, 저장소, 세션은 이 크레이트의 범위가 아닙니다.
//!
//! # 사용 예시
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use tokengate_core::{default_validity, RolePolicy, SigningContext, TokenService};
//!
//! let context = Arc::new(SigningContext::new("my-app", b"change-me"));
//! let tokens = TokenService::new(context, default_validity());
//!
//! let claims = tokens.issuer().issue("alice", "admin", None, default_validity()).unwrap();
//!
//! let request = HashMap::from([(
//!     "Authorization".to_string(),
//!     format!("Bearer {}", claims.token()),
//! )]);
//! let verified = tokens.gate().authorize(&request, &RolePolicy::parse("admin")).unwrap();
//! assert_eq!(verified.subject, "alice");
//! ```

pub mod claims;
pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod issuer;
pub mod logging;
pub mod password;
pub mod refresh;
pub mod service;
pub mod signing;
pub mod validator;

pub use claims::{default_validity, TokenClaims, TokenResponse, DEFAULT_VALIDITY_SECS, TOKEN_TYPE};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, AuthConfig, LoggingConfig, ServerConfig, SettingsError, UserSeed};
pub use error::{TokenError, TokenResult};
pub use gate::{bearer_token, AuthError, AuthorizationGate, HeaderSource, RolePolicy};
pub use issuer::TokenIssuer;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use password::{generate_salt, hash_password, verify_password, Credential, HashError};
pub use refresh::TokenRefresher;
pub use service::TokenService;
pub use signing::SigningContext;
pub use validator::{TokenStatus, TokenValidator};
