//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::time::Duration;

use fmp_config::{Config, HealthConfig, ProviderConfig, ServerConfig};
use secrecy::SecretString;

use super::upstream::TEST_API_KEY;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                provider: ProviderConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Point the provider at a mock upstream with the test API key
    pub fn with_upstream(mut self, base_url: &str) -> Self {
        self.config.provider = ProviderConfig {
            api_key: Some(SecretString::from(TEST_API_KEY)),
            base_url: base_url.parse().expect("valid URL"),
            timeout: Duration::from_secs(5),
        };
        self
    }

    /// Drop the API key while keeping the upstream
    pub fn without_api_key(mut self) -> Self {
        self.config.provider.api_key = None;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Move the health endpoint
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Keep MCP sessions across HTTP requests
    pub fn with_stateful_sessions(mut self) -> Self {
        self.config.server.mcp.stateful_sessions = true;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
