use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};

/// Log output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// HMAC secret that signed the bearer tokens we accept.
    pub access_token_secret: Vec<u8>,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads the configuration from `RL_*` environment variables, loading `.env` first.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = env_or("RL_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid RL_LISTEN_ADDR")?;
        let db_path = env_or("RL_DB_PATH", "./db/app.db");
        let cors_allow = env_or("RL_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("RL_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid RL_REQUEST_TIMEOUT_MS")?;

        let secret = std::env::var("RL_ACCESS_TOKEN_SECRET")
            .context("RL_ACCESS_TOKEN_SECRET must be set")?;
        if secret.trim().is_empty() {
            bail!("RL_ACCESS_TOKEN_SECRET cannot be empty");
        }

        let log_format = match env_or("RL_LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => bail!("Invalid RL_LOG_FORMAT '{}': expected text or json", other),
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            access_token_secret: secret.trim().as_bytes().to_vec(),
            log_format,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
