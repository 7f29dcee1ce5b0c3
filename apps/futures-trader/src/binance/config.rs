//! Client configuration.

use std::time::Duration;

/// Target environment for the futures API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Sandboxed exchange with simulated funds.
    Testnet,
    /// Production exchange with real funds.
    Mainnet,
}

impl Environment {
    /// Get the REST API base URL.
    #[must_use]
    pub const fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://testnet.binancefuture.com",
            Self::Mainnet => "https://fapi.binance.com",
        }
    }

    /// Check if this is the production exchange.
    #[must_use]
    pub const fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Testnet => write!(f, "TESTNET"),
            Self::Mainnet => write!(f, "MAINNET"),
        }
    }
}

/// Configuration for the futures client.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// API key.
    pub api_key: String,
    /// API secret used to sign requests.
    pub api_secret: String,
    /// Target environment.
    pub environment: Environment,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Signed-request validity window in milliseconds.
    pub recv_window_ms: u64,
    /// Base URL override, used by tests to point at a local server.
    pub base_url_override: Option<String>,
}

impl BinanceConfig {
    /// Create a new configuration with default timeout and recv window.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String, environment: Environment) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            timeout: Duration::from_secs(30),
            recv_window_ms: 5_000,
            base_url_override: None,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the environment base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Get the effective REST base URL.
    #[must_use]
    pub fn rest_base_url(&self) -> String {
        self.base_url_override
            .clone()
            .unwrap_or_else(|| self.environment.rest_base_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testnet_base_url() {
        let env = Environment::Testnet;
        assert!(env.rest_base_url().contains("testnet"));
        assert!(!env.is_mainnet());
    }

    #[test]
    fn mainnet_base_url() {
        let env = Environment::Mainnet;
        assert!(!env.rest_base_url().contains("testnet"));
        assert!(env.is_mainnet());
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Testnet), "TESTNET");
        assert_eq!(format!("{}", Environment::Mainnet), "MAINNET");
    }

    #[test]
    fn config_defaults() {
        let config = BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            Environment::Testnet,
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.recv_window_ms, 5_000);
        assert!(config.rest_base_url().contains("testnet"));
    }

    #[test]
    fn config_base_url_override() {
        let config = BinanceConfig::new(
            "key".to_string(),
            "secret".to_string(),
            Environment::Testnet,
        )
        .with_base_url("http://127.0.0.1:9000".to_string());
        assert_eq!(config.rest_base_url(), "http://127.0.0.1:9000");
    }
}
