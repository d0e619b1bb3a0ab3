use fmp_config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::error::GatewayError;
use crate::observer::{Observer, TraceLevel, notify};
use crate::params::{API_KEY_PARAM, QueryParams};

/// Single chokepoint for authenticated calls to the FMP API
///
/// Holds only immutable configuration, so one instance is shared across all
/// concurrent tool invocations. The HTTP client keeps no idle connections:
/// every call opens its own connection and releases it when the call ends.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl Gateway {
    /// Create a gateway from provider configuration
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unexpected` if the HTTP client cannot be built
    pub fn new(config: &ProviderConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| GatewayError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key().cloned(),
        })
    }

    /// Whether an API key is configured
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issue one authenticated GET against `{base_url}/{path...}`
    ///
    /// Each element of `path` becomes exactly one URL path segment. The API
    /// key is appended as the `apikey` query parameter. The parsed JSON body
    /// is returned exactly as received.
    ///
    /// # Errors
    ///
    /// Every failure is a `GatewayError`: a non-success status, a transport
    /// failure, a body that is not JSON, a missing API key, an empty or
    /// dot path segment, or caller parameters that already contain `apikey`
    pub async fn call(
        &self,
        path: &[&str],
        params: QueryParams,
        observer: Option<&dyn Observer>,
    ) -> Result<Value, GatewayError> {
        let endpoint = path.join("/");
        notify(observer, TraceLevel::Debug, &format!("Calling FMP API: {endpoint}")).await;

        match self.send(&endpoint, path, &params).await {
            Ok(value) => {
                notify(observer, TraceLevel::Debug, "FMP API response received").await;
                Ok(value)
            }
            Err(err) => {
                notify(observer, TraceLevel::Error, &err.to_string()).await;
                Err(err)
            }
        }
    }

    async fn send(&self, endpoint: &str, path: &[&str], params: &QueryParams) -> Result<Value, GatewayError> {
        if params.contains(API_KEY_PARAM) {
            return Err(GatewayError::Unexpected(format!(
                "query parameter `{API_KEY_PARAM}` is reserved for authentication"
            )));
        }

        let Some(api_key) = &self.api_key else {
            tracing::warn!(endpoint, "FMP API key is not configured, refusing upstream call");
            return Err(GatewayError::MissingApiKey);
        };

        let url = self.endpoint_url(path)?;
        tracing::debug!(endpoint, url = %url, "calling FMP API");

        let response = self
            .client
            .get(url)
            .query(&params.to_pairs())
            .query(&[(API_KEY_PARAM, api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| {
                let err = GatewayError::transport(e);
                tracing::error!(endpoint, error = %err, "FMP request failed");
                err
            })?;

        let status = response.status();
        let body = response.text().await.map_err(GatewayError::transport)?;

        if !status.is_success() {
            tracing::warn!(endpoint, status = %status, "FMP returned error");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| GatewayError::Unexpected(e.to_string()))?;
        tracing::debug!(endpoint, "FMP response received");

        Ok(value)
    }

    /// Append `path` to the base URL, one segment per element
    ///
    /// Every segment is percent-encoded, `/` included, so a caller-supplied
    /// ticker stays a single segment. Empty, `.` and `..` segments are
    /// rejected rather than dropped or resolved.
    fn endpoint_url(&self, path: &[&str]) -> Result<Url, GatewayError> {
        if path.is_empty() {
            return Err(GatewayError::Unexpected("endpoint path cannot be empty".to_owned()));
        }
        if let Some(segment) = path.iter().find(|s| matches!(s.trim(), "" | "." | "..")) {
            return Err(GatewayError::Unexpected(format!("invalid path segment '{segment}'")));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Unexpected(format!("base URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(path);

        Ok(url)
    }
}
