//! Bearer 토큰 인증 HTTP 계층.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - [`JwtAuth`]: 인증된 클레임을 꺼내는 Axum 추출기
//! - [`require_roles`]: 라우트별 역할 정책 미들웨어
//! - 로그인/토큰 갱신/내 정보 엔드포인트
//! - 인가 에러 → HTTP 상태 코드 매핑 (400/401/403)
//!
//! # 모듈 구성
//!
//! - [`state`]: 공유 상태 (AuthState)
//! - [`credentials`]: 로그인용 자격증명 조회
//! - [`extract`]: 인증 추출기
//! - [`middleware`]: 역할 정책 미들웨어
//! - [`routes`]: REST 엔드포인트
//! - [`error`]: API 에러 응답

pub mod credentials;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use credentials::{CredentialStore, InMemoryCredentialStore, StoredCredential};
pub use error::{ApiError, ApiResult};
pub use extract::{JwtAuth, RequestHeaders};
pub use middleware::{require_roles, RoleGuard};
pub use routes::create_router;
pub use state::AuthState;
