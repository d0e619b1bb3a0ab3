//! Test server wrapper that starts the connector on a random port

use std::net::SocketAddr;

use fmp_config::Config;
use fmp_server::Server;
use rmcp::ClientHandler;
use rmcp::ServiceExt as _;
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::StreamableHttpClientTransport;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(config)?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// URL of `path` on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Plain HTTP client for non-MCP routes
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Connect an MCP client to the streamable HTTP endpoint
    pub async fn mcp_client(&self) -> anyhow::Result<RunningService<RoleClient, ()>> {
        self.connect(()).await
    }

    /// Connect an MCP client with its own notification handler
    pub async fn connect<C: ClientHandler>(&self, handler: C) -> anyhow::Result<RunningService<RoleClient, C>> {
        let transport = StreamableHttpClientTransport::from_uri(self.url("/mcp"));
        handler
            .serve(transport)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect MCP client: {e}"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
