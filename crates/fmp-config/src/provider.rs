use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Default FMP API base URL
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Default upstream request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream Financial Modeling Prep configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key sent as the `apikey` query parameter
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Timeout for a single upstream request (e.g. "30s")
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Configured API key, ignoring blank values
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_stable_api() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url.as_str(), "https://financialmodelingprep.com/stable");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_key().is_none());
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let config = ProviderConfig {
            api_key: Some(SecretString::from("   ")),
            ..ProviderConfig::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn timeout_accepts_human_durations() {
        let config: ProviderConfig = toml::from_str("timeout = \"1m\"").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn timeout_rejects_garbage() {
        let err = toml::from_str::<ProviderConfig>("timeout = \"soon\"").unwrap_err();
        assert!(err.to_string().contains("invalid duration"));
    }
}
