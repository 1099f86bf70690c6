//! API configuration

use std::time::Duration;

use serde::Deserialize;

use infra_gateway::GatewayConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// Base URL of the proposal service
    pub upstream_base_url: String,
    /// Timeout for upstream calls, in seconds
    pub upstream_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            upstream_base_url: "https://proposal-api.example.com.br".to_string(),
            upstream_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `config/default.toml`, an optional
    /// `config/{RUN_MODE}.toml` overlay, and `API_*` environment variables,
    /// later sources winning.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Gateway settings derived from this configuration.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(&self.upstream_base_url)
            .timeout(Duration::from_secs(self.upstream_timeout_secs))
    }
}
