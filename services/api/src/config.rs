use serde::Deserialize;

use yamdb_core::config::Config;
use yamdb_core::tracing::LogFormat;

/// API service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// `json` (default) or `pretty`. Env var: `LOG_FORMAT`.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_api_port() -> u16 {
    3000
}

impl Config for ApiConfig {}
