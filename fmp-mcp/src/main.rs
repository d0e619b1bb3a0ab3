#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::Args;
use clap::Parser;
use fmp_config::{Config, TransportKind};
use fmp_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load_or_env(args.config.as_deref())?;

    if let Some(transport) = args.transport {
        config.server.transport = transport;
    }
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    // Initialize telemetry
    let _telemetry_guard = fmp_telemetry::init(config.telemetry.as_ref(), &args.log_level)?;

    tracing::info!(
        config_path = args.config.as_ref().map(|p| p.display().to_string()),
        base_url = %config.provider.base_url,
        timeout = ?config.provider.timeout,
        "starting fmp-mcp"
    );

    let server = Server::new(config)?;
    if server.transport() == TransportKind::Http {
        tracing::info!(listen_address = %server.listen_address(), "using streamable HTTP transport");
    }

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("fmp-mcp stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
