//! Telemetry for the FMP connector
//!
//! Structured logging through the `tracing` ecosystem, with optional
//! OpenTelemetry trace export over OTLP.
//!
//! Log output always goes to stderr: with the stdio transport, stdout carries
//! the MCP protocol stream.

mod metadata;

use fmp_config::TelemetryConfig;
use fmp_config::telemetry::{ExportProtocol, ExporterConfig};
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};

/// Guard that flushes and shuts down trace export on drop
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Initialize logging and, when an exporter is configured, OTLP tracing
///
/// `log_filter` is an `EnvFilter` directive such as `info` or
/// `fmp_gateway=debug,info`; an unparsable filter falls back to `info`.
/// Returns a guard that must be held for the lifetime of the application.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built or a global
/// subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let mut guard = TelemetryGuard { tracer_provider: None };

    match config.and_then(|c| c.exporter.as_ref().map(|exporter| (c, exporter))) {
        Some((telemetry_config, exporter_config)) => {
            let resource = metadata::build_resource(telemetry_config);
            let tracer_provider = init_tracer(telemetry_config, exporter_config, resource)?;
            let tracer = tracer_provider.tracer("fmp-mcp");
            let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
            global::set_tracer_provider(tracer_provider.clone());
            guard.tracer_provider = Some(tracer_provider);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .with(otel_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

            tracing::info!(
                endpoint = %exporter_config.endpoint,
                protocol = ?exporter_config.protocol,
                "OTLP trace export enabled"
            );
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
        }
    }

    Ok(guard)
}

/// Initialize OTLP trace export
fn init_tracer(
    config: &TelemetryConfig,
    exporter_config: &ExporterConfig,
    resource: opentelemetry_sdk::Resource,
) -> anyhow::Result<SdkTracerProvider> {
    let exporter = build_span_exporter(exporter_config)?;

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler(config))
        .with_batch_exporter(exporter)
        .build();

    Ok(provider)
}

/// Pick the sampler from the configured rate and parent-based flag
fn sampler(config: &TelemetryConfig) -> Sampler {
    let sampling_rate = config.tracing.as_ref().map_or(1.0, |t| t.sampling_rate);

    let sampler = if sampling_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sampling_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sampling_rate)
    };

    if config.tracing.as_ref().is_none_or(|t| t.parent_based) {
        Sampler::ParentBased(Box::new(sampler))
    } else {
        sampler
    }
}

/// Build OTLP span exporter based on protocol
fn build_span_exporter(config: &ExporterConfig) -> anyhow::Result<opentelemetry_otlp::SpanExporter> {
    use opentelemetry_otlp::SpanExporter;

    let exporter = match config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC span exporter: {e}"))?,
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP span exporter: {e}"))?,
    };

    Ok(exporter)
}
