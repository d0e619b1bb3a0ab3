use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// Telemetry configuration
///
/// Logging to stderr is always on; OTLP trace export is enabled by
/// configuring an exporter.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name for telemetry metadata
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// OTLP exporter for traces
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    /// Trace sampling configuration
    #[serde(default)]
    pub tracing: Option<TracingConfig>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            resource_attributes: HashMap::new(),
            exporter: None,
            tracing: None,
        }
    }
}

/// OTLP exporter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// OTLP endpoint URL
    pub endpoint: Url,
    /// Export protocol
    #[serde(default)]
    pub protocol: ExportProtocol,
}

/// OTLP export protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    /// gRPC (default)
    #[default]
    Grpc,
    /// HTTP/protobuf
    HttpProto,
}

/// Tracing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TracingConfig {
    /// Sampling rate (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    /// Use parent-based sampler
    #[serde(default = "default_true")]
    pub parent_based: bool,
}

fn default_service_name() -> String {
    "fmp-mcp".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_rate() -> f64 {
    1.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_the_service() {
        assert_eq!(TelemetryConfig::default().service_name, "fmp-mcp");
    }

    #[test]
    fn default_matches_an_empty_table() {
        let parsed: TelemetryConfig = toml::from_str("").unwrap();
        let built = TelemetryConfig::default();
        assert_eq!(parsed.service_name, built.service_name);
        assert!(built.resource_attributes.is_empty());
        assert!(built.exporter.is_none());
        assert!(built.tracing.is_none());
    }
}
