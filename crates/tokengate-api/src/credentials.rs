//! 로그인용 자격증명 조회.
//!
//! 영속 저장소는 범위 밖이며, 호출자가 [`CredentialStore`] 를 구현해 연결합니다.
//! [`InMemoryCredentialStore`] 는 설정 파일의 초기 사용자 목록으로 채워집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokengate_core::{Credential, HashError, UserSeed};

/// 저장된 사용자 자격증명.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub username: String,
    pub role: String,
    pub role_id: Option<i64>,
    pub credential: Credential,
}

impl From<&UserSeed> for StoredCredential {
    fn from(seed: &UserSeed) -> Self {
        Self {
            username: seed.username.clone(),
            role: seed.role.clone(),
            role_id: seed.role_id,
            credential: Credential::from_parts(seed.salt.clone(), seed.digest.clone()),
        }
    }
}

/// 사용자 이름으로 자격증명 조회.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find(&self, username: &str) -> Option<StoredCredential>;
}

/// 메모리 자격증명 저장소.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, StoredCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정의 초기 사용자 목록으로 생성.
    pub fn from_seeds(seeds: &[UserSeed]) -> Self {
        let users = seeds
            .iter()
            .map(|seed| (seed.username.clone(), StoredCredential::from(seed)))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn insert(&self, stored: StoredCredential) {
        self.users
            .write()
            .await
            .insert(stored.username.clone(), stored);
    }

    /// 비밀번호를 해싱하여 사용자 등록.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
        role_id: Option<i64>,
    ) -> Result<StoredCredential, HashError> {
        let stored = StoredCredential {
            username: username.to_string(),
            role: role.to_string(),
            role_id,
            credential: Credential::create(password)?,
        };
        self.insert(stored.clone()).await;
        Ok(stored)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find(&self, username: &str) -> Option<StoredCredential> {
        self.users.read().await.get(username).cloned()
    }
}
