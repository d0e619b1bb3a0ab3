#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod provider;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use health::*;
pub use loader::{API_KEY_VAR, BASE_URL_VAR};
pub use provider::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level connector configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Inbound server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream FMP provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
