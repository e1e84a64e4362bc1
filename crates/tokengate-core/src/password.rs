//! 비밀번호 해싱 유틸리티.
//!
//! SHA-256 기반 솔트 해싱 및 검증.
//!
//! 다이제스트는 `SHA256(password_bytes ++ salt_bytes)` 로 계산됩니다.
//! 솔트는 16진수 문자열로 저장되며 해싱 전에 원시 바이트로 디코딩됩니다.

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// 솔트 크기 (원시 바이트). 16진수로 인코딩하면 64자.
pub const SALT_SIZE: usize = 32;

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("잘못된 솔트 형식: {0}")]
    MalformedSalt(#[from] hex::FromHexError),
    #[error("난수 생성 실패: {0}")]
    Entropy(#[from] rand::Error),
}

/// 새 솔트 생성.
///
/// OS 난수 소스에서 32바이트를 읽어 16진수로 인코딩합니다.
pub fn generate_salt() -> Result<String, HashError> {
    let mut raw = [0u8; SALT_SIZE];
    OsRng.try_fill_bytes(&mut raw)?;
    Ok(hex::encode(raw))
}

/// 비밀번호 해싱.
///
/// # Arguments
///
/// * `password` - 해싱할 평문 비밀번호
/// * `salt` - 16진수 솔트. `None` 이거나 빈 문자열이면 새로 생성합니다.
///
/// # Returns
///
/// `(digest, salt)` - 16진수 다이제스트와 사용된 솔트
///
/// # Example
///
/// ```
/// use tokengate_core::password::{hash_password, verify_password};
///
/// let (digest, salt) = hash_password("my_password", None).unwrap();
/// assert_eq!(salt.len(), 64);
/// assert!(verify_password("my_password", &salt, &digest).unwrap());
/// ```
pub fn hash_password(password: &str, salt: Option<&str>) -> Result<(String, String), HashError> {
    let salt = match salt {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => generate_salt()?,
    };

    let raw_salt = hex::decode(&salt)?;

    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(&raw_salt);
    let digest = hex::encode(hasher.finalize());

    Ok((digest, salt))
}

/// 비밀번호 검증.
///
/// 주어진 솔트로 다시 해싱하여 저장된 다이제스트와 비교합니다.
/// 비교는 바이트 단위 상수 시간으로 수행됩니다.
pub fn verify_password(password: &str, salt: &str, expected_digest: &str) -> Result<bool, HashError> {
    let (digest, _) = hash_password(password, Some(salt))?;
    Ok(constant_time_eq(digest.as_bytes(), expected_digest.as_bytes()))
}

/// 길이가 다르면 즉시 `false`. 길이는 비밀이 아닙니다 (다이제스트는 항상 64자).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// 저장용 자격증명 (솔트 + 다이제스트).
///
/// 평문 비밀번호는 보관하지 않습니다. 한 번 생성되면 변경되지 않습니다.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    salt: String,
    digest: String,
}

impl Credential {
    /// 새 솔트로 자격증명 생성 (가입/비밀번호 변경 시).
    pub fn create(password: &str) -> Result<Self, HashError> {
        let (digest, salt) = hash_password(password, None)?;
        Ok(Self { salt, digest })
    }

    /// 이미 저장된 솔트와 다이제스트로부터 복원.
    pub fn from_parts(salt: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            digest: digest.into(),
        }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// 로그인 시 비밀번호 확인.
    pub fn verify(&self, password: &str) -> Result<bool, HashError> {
        verify_password(password, &self.salt, &self.digest)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("salt", &self.salt)
            .field("digest", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn test_hash_and_verify_password() {
        let (digest, salt) = hash_password("TestPassword123!", None).unwrap();

        assert_eq!(salt.len(), 64);
        assert_eq!(digest.len(), 64);
        assert!(is_lower_hex(&salt));
        assert!(is_lower_hex(&digest));

        assert!(verify_password("TestPassword123!", &salt, &digest).unwrap());
        assert!(!verify_password("WrongPassword123!", &salt, &digest).unwrap());
    }

    #[test]
    fn test_empty_salt_generates_new_one() {
        let (_, salt) = hash_password("secret", Some("")).unwrap();
        assert_eq!(salt.len(), 64);
    }

    #[test]
    fn test_known_vector() {
        // SHA256("abc" ++ [0x00, 0x01])
        let mut hasher = Sha256::new();
        hasher.update(b"abc");
        hasher.update([0x00u8, 0x01]);
        let expected = hex::encode(hasher.finalize());

        let (digest, salt) = hash_password("abc", Some("0001")).unwrap();
        assert_eq!(salt, "0001");
        assert_eq!(digest, expected);
    }

    #[test]
    fn test_malformed_salt() {
        let result = hash_password("password", Some("not-hex"));
        assert!(matches!(result, Err(HashError::MalformedSalt(_))));

        let result = verify_password("password", "abc", "00");
        assert!(matches!(result, Err(HashError::MalformedSalt(_))));
    }

    #[test]
    fn test_credential_roundtrip() {
        let credential = Credential::create("한글패스워드123").unwrap();
        assert!(credential.verify("한글패스워드123").unwrap());
        assert!(!credential.verify("한글패스워드124").unwrap());

        let restored = Credential::from_parts(credential.salt(), credential.digest());
        assert_eq!(restored, credential);
    }

    #[test]
    fn test_credential_debug_redacts_digest() {
        let credential = Credential::create("password").unwrap();
        let debug = format!("{:?}", credential);
        assert!(!debug.contains(credential.digest()));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_verify_rejects_truncated_digest() {
        let (digest, salt) = hash_password("password", None).unwrap();
        assert!(!verify_password("password", &salt, &digest[..63]).unwrap());
        assert!(!verify_password("password", &salt, "").unwrap());
    }
}
