use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the local session snapshot
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,

    /// Simulated delay around login and register, in milliseconds
    #[serde(default = "default_auth_latency_ms")]
    pub auth_latency_ms: u64,

    /// Simulated delay around search, in milliseconds
    #[serde(default = "default_search_latency_ms")]
    pub search_latency_ms: u64,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from(".streamflix")
}

fn default_auth_latency_ms() -> u64 {
    1000
}

fn default_search_latency_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            snapshot_dir: default_snapshot_dir(),
            auth_latency_ms: default_auth_latency_ms(),
            search_latency_ms: default_search_latency_ms(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Configuration with every simulated delay disabled
    pub fn without_latency() -> Self {
        Self {
            auth_latency_ms: 0,
            search_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
