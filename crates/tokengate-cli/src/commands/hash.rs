//! 비밀번호 해싱/검증 명령.
//!
//! 서명 키가 필요 없으므로 설정 없이 동작합니다.

use anyhow::Result;
use serde_json::{json, Value};
use tokengate_core::{hash_password, verify_password};

/// 비밀번호 해싱.
///
/// 출력된 `salt`, `digest` 는 설정 파일의 `[[users]]` 항목에 그대로 넣을 수 있습니다.
pub fn run_hash(password: &str, salt: Option<&str>) -> Result<Value> {
    let (digest, salt) = hash_password(password, salt)?;
    Ok(json!({
        "salt": salt,
        "digest": digest,
    }))
}

/// 비밀번호 검증.
pub fn run_verify(password: &str, salt: &str, digest: &str) -> Result<Value> {
    let matched = verify_password(password, salt, digest)?;
    Ok(json!({ "matched": matched }))
}
