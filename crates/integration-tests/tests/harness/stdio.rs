//! Connector session over an in-memory byte stream, as the stdio transport runs it

use std::time::Duration;

use fmp_config::Config;
use fmp_server::Server;
use rmcp::ClientHandler;
use rmcp::ServiceExt as _;
use rmcp::service::{RoleClient, RunningService};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Server task plus the MCP client on the other end of the stream
pub struct StdioSession<C: ClientHandler> {
    pub client: RunningService<RoleClient, C>,
    server: JoinHandle<anyhow::Result<()>>,
}

impl<C: ClientHandler> StdioSession<C> {
    /// Serve `config` over a duplex pipe and connect `handler` to it
    pub async fn start(config: Config, handler: C) -> anyhow::Result<Self> {
        let server = Server::new(config)?;
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);

        let (server_read, server_write) = tokio::io::split(server_io);
        let server = tokio::spawn(server.serve_io(server_read, server_write, CancellationToken::new()));

        let (client_read, client_write) = tokio::io::split(client_io);
        let client = handler
            .serve((client_read, client_write))
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect MCP client: {e}"))?;

        Ok(Self { client, server })
    }

    /// Close the client side and wait for the server to notice end of stream
    pub async fn finish(self) -> anyhow::Result<()> {
        let Self { client, server } = self;
        client.cancel().await?;
        tokio::time::timeout(Duration::from_secs(5), server).await??
    }
}
