//! 인증 HTTP 계층 통합 테스트.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use tokengate_api::{
    create_router, require_roles, AuthState, InMemoryCredentialStore, JwtAuth, RoleGuard,
};
use tokengate_core::{FixedClock, SigningContext, TokenService};

const SECRET: &[u8] = b"integration-test-secret";

fn context() -> Arc<SigningContext> {
    Arc::new(SigningContext::new("tokengate-test", SECRET))
}

async fn test_state() -> AuthState {
    let store = InMemoryCredentialStore::new();
    store
        .register("alice", "alice-pw", "admin", Some(1))
        .await
        .unwrap();
    store
        .register("bob", "bob-pw", "guest", None)
        .await
        .unwrap();

    let tokens = TokenService::new(context(), Duration::hours(1));
    AuthState::new(tokens, Arc::new(store))
}

/// 한 시간 전에 1분짜리로 발급된 (이미 만료된) 토큰.
fn expired_token(username: &str, role: &str) -> String {
    let issued = Utc::now() - Duration::hours(1);
    let past = TokenService::with_clock(
        context(),
        Duration::minutes(1),
        Arc::new(FixedClock::at(issued)),
    );
    past.issuer()
        .issue(username, role, None, Duration::minutes(1))
        .unwrap()
        .token()
        .to_string()
}

async fn admin_only(JwtAuth(claims): JwtAuth) -> String {
    format!("hello {}", claims.subject)
}

fn app(state: AuthState) -> Router {
    let guarded = Router::new()
        .route("/admin", get(admin_only))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state.clone(), "admin"),
            require_roles,
        ))
        .with_state(state.clone());

    create_router(state).merge(guarded)
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": username, "password": password }).to_string(),
        ))
        .unwrap()
}

fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: Router, username: &str, password: &str) -> String {
    let response = send(app, login_request(username, password)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_login_returns_token_response() {
    let app = app(test_state().await);

    let response = send(app, login_request("alice", "alice-pw")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["role_id"], 1);
    assert_eq!(body["expires_in"], 3_600);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let state = test_state().await;

    let wrong_password = send(app(state.clone()), login_request("alice", "nope")).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(wrong_password).await["error"]["code"],
        "INVALID_CREDENTIALS"
    );

    let unknown_user = send(app(state.clone()), login_request("mallory", "alice-pw")).await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let empty_username = send(app(state), login_request("", "alice-pw")).await;
    assert_eq!(empty_username.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(empty_username).await["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let state = test_state().await;
    let token = login(app(state.clone()), "bob", "bob-pw").await;

    let response = send(app(state), bearer_request("GET", "/api/v1/auth/me", &token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "bob");
    assert_eq!(body["role"], "guest");
    assert!(body.get("role_id").is_none());
    assert_eq!(body["access_token"], token.as_str());
}

#[tokio::test]
async fn test_me_rejects_wrong_scheme() {
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header(header::AUTHORIZATION, "Token xyz")
        .body(Body::empty())
        .unwrap();

    let response = send(app(test_state().await), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "MALFORMED_HEADER");
}

#[tokio::test]
async fn test_me_rejects_missing_header() {
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .body(Body::empty())
        .unwrap();

    let response = send(app(test_state().await), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_rejects_expired_and_invalid_tokens() {
    let state = test_state().await;

    let expired = expired_token("alice", "admin");
    let response = send(
        app(state.clone()),
        bearer_request("GET", "/api/v1/auth/me", &expired),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "TOKEN_EXPIRED");

    let response = send(
        app(state),
        bearer_request("GET", "/api/v1/auth/me", "not.a.token"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_role_guard() {
    let state = test_state().await;
    let admin_token = login(app(state.clone()), "alice", "alice-pw").await;
    let guest_token = login(app(state.clone()), "bob", "bob-pw").await;

    let response = send(app(state.clone()), bearer_request("GET", "/admin", &admin_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"hello alice");

    let response = send(app(state.clone()), bearer_request("GET", "/admin", &guest_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "UNAUTHORIZED_ROLE");

    let expired = expired_token("alice", "admin");
    let response = send(app(state), bearer_request("GET", "/admin", &expired)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_accepts_expired_token() {
    let state = test_state().await;
    let expired = expired_token("bob", "guest");

    let response = send(
        app(state.clone()),
        bearer_request("POST", "/api/v1/auth/refresh", &expired),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "bob");
    assert_eq!(body["role"], "guest");
    assert_eq!(body["expires_in"], 3_600);

    let fresh = body["access_token"].as_str().unwrap();
    assert_ne!(fresh, expired);

    let response = send(app(state), bearer_request("GET", "/api/v1/auth/me", fresh)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_foreign_signature() {
    let foreign = TokenService::new(
        Arc::new(SigningContext::new("tokengate-test", b"another-secret")),
        Duration::hours(1),
    );
    let token = foreign
        .issuer()
        .issue("alice", "admin", None, Duration::hours(1))
        .unwrap();

    let response = send(
        app(test_state().await),
        bearer_request("POST", "/api/v1/auth/refresh", token.token()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_TOKEN");
}
