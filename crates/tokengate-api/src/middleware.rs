//! 역할 정책 미들웨어.
//!
//! ```rust,ignore
//! let admin_routes = Router::new()
//!     .route("/users", get(list_users))
//!     .route_layer(middleware::from_fn_with_state(
//!         RoleGuard::new(state.clone(), "admin, manager"),
//!         require_roles,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokengate_core::RolePolicy;

use crate::error::ApiError;
use crate::extract::RequestHeaders;
use crate::state::AuthState;

/// 라우트에 적용할 역할 정책.
#[derive(Clone)]
pub struct RoleGuard {
    state: AuthState,
    policy: Arc<RolePolicy>,
}

impl RoleGuard {
    pub fn new(state: AuthState, policy: impl Into<RolePolicy>) -> Self {
        Self {
            state,
            policy: Arc::new(policy.into()),
        }
    }

    pub fn policy(&self) -> &RolePolicy {
        &self.policy
    }
}

/// 역할 정책을 만족하는 요청만 통과시킵니다.
///
/// 검증된 클레임은 요청 extensions 에 넣어 핸들러가 다시 파싱하지 않게 합니다.
pub async fn require_roles(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = guard
        .state
        .tokens
        .gate()
        .authorize(&RequestHeaders(request.headers()), &guard.policy)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
