//! Transports for the FMP MCP connector
//!
//! The same [`FmpServer`] handler is served either over stdin/stdout or as a
//! streamable HTTP endpoint inside an axum router.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use fmp_config::{Config, ServerConfig, TransportKind};
use fmp_gateway::Gateway;
use fmp_tools::{FmpServer, ToolRegistry};
use rmcp::ServiceExt as _;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Connector ready to serve on its configured transport
pub struct Server {
    config: ServerConfig,
    registry: Arc<ToolRegistry>,
}

impl Server {
    /// Build the gateway and tool registry from configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = Gateway::new(&config.provider).context("failed to initialize FMP gateway")?;
        if !gateway.has_api_key() {
            tracing::warn!("FMP_API_KEY is not set; every tool call will fail until an API key is configured");
        }
        let registry = Arc::new(ToolRegistry::new(gateway));

        tracing::debug!(tools = registry.definitions().len(), "tool registry built");

        Ok(Self {
            config: config.server,
            registry,
        })
    }

    pub fn listen_address(&self) -> SocketAddr {
        self.config.listen_address()
    }

    pub const fn transport(&self) -> TransportKind {
        self.config.transport
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// HTTP router with the MCP endpoint and, when enabled, the health route
    pub fn router(&self) -> Router {
        let registry = Arc::clone(&self.registry);
        let service = StreamableHttpService::new(
            move || Ok(FmpServer::new(Arc::clone(&registry))),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig {
                stateful_mode: self.config.mcp.stateful_sessions,
                ..StreamableHttpServerConfig::default()
            },
        );

        let mut app = Router::new().nest_service(&self.config.mcp.path, service);

        if self.config.health.enabled {
            app = app.route(&self.config.health.path, axum::routing::get(health::health_handler));
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Consume the server and return the HTTP router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router()
    }

    /// Serve on the configured transport until `shutdown` is cancelled
    ///
    /// The stdio transport also returns when the client closes stdin.
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        match self.config.transport {
            TransportKind::Stdio => self.serve_stdio(shutdown).await,
            TransportKind::Http => self.serve_http(shutdown).await,
        }
    }

    async fn serve_stdio(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        tracing::info!("serving MCP over stdio");

        let (stdin, stdout) = rmcp::transport::stdio();
        self.serve_io(stdin, stdout, shutdown).await
    }

    /// Serve a single MCP session over a byte stream pair
    ///
    /// Returns when the peer closes the stream or `shutdown` is cancelled.
    pub async fn serve_io<R, W>(self, reader: R, writer: W, shutdown: CancellationToken) -> anyhow::Result<()>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let running = FmpServer::new(self.registry)
            .serve((reader, writer))
            .await
            .map_err(|e| anyhow::anyhow!("failed to start MCP session: {e}"))?;

        let session = running.cancellation_token();
        tokio::spawn(async move {
            shutdown.cancelled().await;
            session.cancel();
        });

        let reason = running.waiting().await?;
        tracing::info!(?reason, "MCP session ended");

        Ok(())
    }

    async fn serve_http(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listen_address = self.listen_address();
        let mcp_path = self.config.mcp.path.clone();
        let router = self.into_router();

        let listener = tokio::net::TcpListener::bind(listen_address)
            .await
            .with_context(|| format!("failed to bind {listen_address}"))?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, path = %mcp_path, "serving MCP over streamable HTTP");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
