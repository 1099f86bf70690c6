//! Gateway configuration

use std::time::Duration;

/// Configuration for the upstream proposal API client.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_gateway::GatewayConfig;
///
/// let config = GatewayConfig::new("https://proposal-api.example.com.br")
///     .timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the upstream API, without the version segment.
    pub base_url: String,
    /// Per-request timeout covering connect, send and body read.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration with the default 30s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new("https://proposal-api.example.com.br")
    }
}
