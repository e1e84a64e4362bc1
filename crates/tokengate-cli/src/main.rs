//! Tokengate CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 비밀번호 해싱 (설정 파일 [[users]] 항목용)
//! tokengate hash 'my-password'
//!
//! # 비밀번호 검증
//! tokengate verify 'my-password' --salt <hex> --digest <hex>
//!
//! # 토큰 발급 (서명 키는 설정 또는 TOKENGATE__AUTH__SECRET)
//! tokengate issue -u alice -r admin --role-id 1
//!
//! # 토큰 내용 확인 / 갱신 / 인가 확인
//! tokengate decode <token>
//! tokengate refresh <token>
//! tokengate check <token> --roles "admin, manager"
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

mod commands;

use commands::hash::{run_hash, run_verify};
use commands::token::{run_check, run_decode, run_issue, run_refresh};
use tokengate_core::{init_logging, AppConfig, LogConfig, LogFormat, TokenService};

#[derive(Parser)]
#[command(name = "tokengate")]
#[command(about = "Tokengate CLI - 자격증명 해싱 및 Bearer 토큰 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, env = "CONFIG_PATH", default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 비밀번호 해싱 (솔트 미지정 시 새로 생성)
    Hash {
        /// 평문 비밀번호
        password: String,

        /// 16진수 솔트
        #[arg(short, long)]
        salt: Option<String>,
    },

    /// 비밀번호 검증
    Verify {
        /// 평문 비밀번호
        password: String,

        /// 16진수 솔트
        #[arg(short, long)]
        salt: String,

        /// 16진수 다이제스트
        #[arg(short, long)]
        digest: String,
    },

    /// 토큰 발급
    Issue {
        /// 사용자 이름
        #[arg(short, long)]
        username: String,

        /// 역할 이름
        #[arg(short, long)]
        role: String,

        /// 역할 ID
        #[arg(long)]
        role_id: Option<i64>,

        /// 유효 기간 (초, 기본: 설정값)
        #[arg(long)]
        ttl_secs: Option<i64>,
    },

    /// 토큰 내용 확인 (만료 여부 포함)
    Decode {
        /// 서명된 토큰
        token: String,
    },

    /// 토큰 갱신 (만료된 토큰 허용)
    Refresh {
        /// 서명된 토큰
        token: String,
    },

    /// 역할 정책으로 인가 확인
    Check {
        /// 서명된 토큰
        token: String,

        /// 허용 역할 ("": 인증만, "*": 모든 역할, "a, b": 목록)
        #[arg(long, default_value = "")]
        roles: String,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // stdout 은 JSON 결과용이라 기본 레벨은 낮게 유지 (RUST_LOG 로 변경 가능)
    init_logging(LogConfig::new("warn").with_format(LogFormat::Compact))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Hash { password, salt } => run_hash(&password, salt.as_deref())?,
        Commands::Verify {
            password,
            salt,
            digest,
        } => run_verify(&password, &salt, &digest)?,
        Commands::Issue {
            username,
            role,
            role_id,
            ttl_secs,
        } => run_issue(&load_tokens(&cli.config)?, &username, &role, role_id, ttl_secs)?,
        Commands::Decode { token } => run_decode(&load_tokens(&cli.config)?, &token)?,
        Commands::Refresh { token } => run_refresh(&load_tokens(&cli.config)?, &token)?,
        Commands::Check { token, roles } => {
            run_check(&load_tokens(&cli.config)?, &token, &roles)?
        }
    };

    print_json(&output)
}

/// 설정에서 토큰 서비스 생성.
fn load_tokens(path: &str) -> anyhow::Result<TokenService> {
    let config = AppConfig::load(path).with_context(|| format!("설정 로드 실패: {}", path))?;
    debug!(config = %path, issuer = %config.auth.issuer, "Configuration loaded");
    TokenService::from_config(&config.auth).context("토큰 서명 설정 오류")
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
