//! Tokengate API 서버.
//!
//! 로그인, 토큰 갱신, 내 정보 조회 엔드포인트를 제공합니다.
//! 설정은 `CONFIG_PATH` (기본 `config/default.toml`) 와 `TOKENGATE__*` 환경 변수에서 읽습니다.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use tokengate_api::{create_router, AuthState, InMemoryCredentialStore};
use tokengate_core::{init_logging, AppConfig, LogConfig, TokenService};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("설정 로드 실패: {}", config_path))?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!(config = %config_path, "Starting Tokengate API server...");

    let tokens = TokenService::from_config(&config.auth).context("토큰 서명 설정 오류")?;
    let credentials = InMemoryCredentialStore::from_seeds(&config.users);
    if credentials.is_empty().await {
        warn!("No users configured; every login will be rejected");
    }

    let state = AuthState::new(tokens, Arc::new(credentials));
    info!(
        issuer = %config.auth.issuer,
        ttl_secs = config.auth.token_ttl_secs,
        users = config.users.len(),
        "Authentication state initialized"
    );

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "잘못된 서버 주소: {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
