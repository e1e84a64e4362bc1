//! 토큰 발급/검사/갱신/인가 확인 명령.
//!
//! 서명 키는 설정 파일이나 `TOKENGATE__AUTH__SECRET` 환경 변수에서만 읽습니다.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration};
use serde_json::{json, Value};
use tokengate_core::{RolePolicy, TokenClaims, TokenResponse, TokenService};

/// 새 토큰 발급.
///
/// `ttl_secs` 가 없으면 설정된 유효 기간을 사용합니다.
pub fn run_issue(
    tokens: &TokenService,
    username: &str,
    role: &str,
    role_id: Option<i64>,
    ttl_secs: Option<i64>,
) -> Result<Value> {
    let valid_for = match ttl_secs {
        Some(secs) => Duration::try_seconds(secs)
            .with_context(|| format!("유효 기간이 표현 범위를 벗어났습니다: {}초", secs))?,
        None => tokens.valid_for(),
    };
    let claims = tokens.issuer().issue(username, role, role_id, valid_for)?;
    Ok(serde_json::to_value(TokenResponse::from(claims))?)
}

/// 토큰 내용 확인. 만료된 토큰도 서명이 올바르면 내용을 보여줍니다.
pub fn run_decode(tokens: &TokenService, token: &str) -> Result<Value> {
    let status = tokens.validator().inspect(token)?;
    let mut output = claims_json(status.claims());
    output["expired"] = json!(status.is_expired());
    Ok(output)
}

/// 토큰 갱신.
pub fn run_refresh(tokens: &TokenService, token: &str) -> Result<Value> {
    let claims = tokens.refresher().refresh(token)?;
    Ok(serde_json::to_value(TokenResponse::from(claims))?)
}

/// 역할 정책으로 토큰 인가 확인.
///
/// `roles` 는 서버 라우트에 쓰는 것과 같은 정책 문자열입니다 (`""`, `"*"`, `"admin, manager"`).
pub fn run_check(tokens: &TokenService, token: &str, roles: &str) -> Result<Value> {
    let request = HashMap::from([(
        "Authorization".to_string(),
        format!("Bearer {}", token),
    )]);
    let policy = RolePolicy::parse(roles);
    let claims = tokens.gate().authorize(&request, &policy)?;

    Ok(json!({
        "authorized": true,
        "username": claims.subject,
        "role": claims.role_name,
        "policy": policy.to_string(),
    }))
}

fn claims_json(claims: &TokenClaims) -> Value {
    json!({
        "username": claims.subject,
        "role": claims.role_name,
        "role_id": claims.role_id,
        "token_type": claims.token_type,
        "issuer": claims.issuer,
        "issued_at": format_timestamp(claims.issued_at),
        "expires_at": format_timestamp(claims.expires_at),
        "expires_in": claims.expires_in,
    })
}

fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
