//! 저장소의 기본 설정 파일 검증.

use std::path::PathBuf;

use tokengate_core::{AppConfig, Credential, TokenService};

fn default_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml")
}

#[test]
fn test_default_config_loads() {
    let config = AppConfig::load(default_config_path()).unwrap();

    assert_eq!(config.auth.issuer, "tokengate");
    assert_eq!(config.auth.token_ttl_secs, 604_800);
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.users.len(), 2);

    assert!(TokenService::from_config(&config.auth).is_ok());
}

#[test]
fn test_seeded_users_verify() {
    let config = AppConfig::load(default_config_path()).unwrap();

    for (username, password) in [("admin", "admin-password"), ("guest", "guest-password")] {
        let seed = config
            .users
            .iter()
            .find(|user| user.username == username)
            .unwrap();
        let credential = Credential::from_parts(seed.salt.clone(), seed.digest.clone());
        assert!(credential.verify(password).unwrap(), "{} should verify", username);
        assert!(!credential.verify("wrong").unwrap());
    }
}
