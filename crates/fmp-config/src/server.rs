use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Default address for the HTTP transport
pub const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8000);

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// How MCP clients reach the connector
    #[serde(default)]
    pub transport: TransportKind,
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub mcp: McpEndpointConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

impl ServerConfig {
    /// Configured listen address, falling back to `0.0.0.0:8000`
    pub fn listen_address(&self) -> SocketAddr {
        self.listen_address.unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}

/// Inbound MCP transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Single session over stdin/stdout, for local clients and inspectors
    Stdio,
    /// Streamable HTTP endpoint for deployed use
    #[default]
    Http,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "streamable_http" | "streamable-http" => Ok(Self::Http),
            other => Err(format!("unknown transport '{other}', expected 'stdio' or 'http'")),
        }
    }
}

/// Streamable HTTP endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct McpEndpointConfig {
    /// Path the MCP service is mounted under
    #[serde(default = "default_mcp_path")]
    pub path: String,
    /// Keep per-client sessions instead of answering every request independently
    ///
    /// Session state includes the `logging/setLevel` threshold. When stateless,
    /// a level set by one request does not apply to later requests.
    #[serde(default)]
    pub stateful_sessions: bool,
}

impl Default for McpEndpointConfig {
    fn default() -> Self {
        Self {
            path: default_mcp_path(),
            stateful_sessions: false,
        }
    }
}

fn default_mcp_path() -> String {
    "/mcp".to_string()
}
