use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use fmp_config::TransportKind;

/// FMP Financial Data Connector
#[derive(Debug, Parser)]
#[command(name = "fmp-mcp", about = "MCP server for Financial Modeling Prep market data", version)]
pub struct Args {
    /// Path to a TOML configuration file; defaults and environment are used when omitted
    #[arg(short, long, env = "FMP_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the transport (`stdio` or `http`)
    #[arg(long, env = "FMP_MCP_TRANSPORT")]
    pub transport: Option<TransportKind>,

    /// Override the listen address of the HTTP transport
    #[arg(long, env = "FMP_MCP_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive (e.g. `info`, `fmp_gateway=debug`)
    #[arg(long, default_value = "info", env = "FMP_MCP_LOG")]
    pub log_level: String,
}
