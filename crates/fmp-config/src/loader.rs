use std::path::Path;

use secrecy::SecretString;
use url::Url;

use crate::Config;

/// Environment variable holding the FMP API key
pub const API_KEY_VAR: &str = "FMP_API_KEY";

/// Environment variable overriding the FMP base URL
pub const BASE_URL_VAR: &str = "FMP_BASE_URL";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, applies the
    /// `FMP_API_KEY`/`FMP_BASE_URL` overrides, then validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, overrides, or validation fail
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Build configuration from defaults and the process environment only
    ///
    /// # Errors
    ///
    /// Returns an error if `FMP_BASE_URL` is set but invalid
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment
    ///
    /// # Errors
    ///
    /// See [`Config::load`] and [`Config::from_env`]
    pub fn load_or_env(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(Self::from_env, Self::load)
    }

    /// Apply `FMP_API_KEY` and `FMP_BASE_URL` on top of the loaded values
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(key) = std::env::var(API_KEY_VAR)
            && !key.trim().is_empty()
        {
            self.provider.api_key = Some(SecretString::from(key));
            tracing::debug!("API key taken from {API_KEY_VAR}");
        }

        if let Ok(raw) = std::env::var(BASE_URL_VAR)
            && !raw.trim().is_empty()
        {
            self.provider.base_url = Url::parse(raw.trim())
                .map_err(|e| anyhow::anyhow!("invalid {BASE_URL_VAR} '{raw}': {e}"))?;
            tracing::debug!(base_url = %self.provider.base_url, "base URL taken from {BASE_URL_VAR}");
        }

        Ok(())
    }

    /// Validate that the configuration is internally consistent
    ///
    /// A missing API key is not an error here; callers warn about it and
    /// every upstream call fails until one is provided.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or timeout are unusable or the
    /// HTTP paths are malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        let base_url = &self.provider.base_url;

        if !matches!(base_url.scheme(), "http" | "https") {
            anyhow::bail!("provider.base_url must use http or https: {base_url}");
        }

        if base_url.cannot_be_a_base() {
            anyhow::bail!("provider.base_url cannot take path segments: {base_url}");
        }

        if self.provider.timeout.is_zero() {
            anyhow::bail!("provider.timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if !self.server.mcp.path.starts_with('/') {
            anyhow::bail!("server.mcp.path must start with '/'");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if self.server.health.enabled && self.server.health.path == self.server.mcp.path {
            anyhow::bail!("server.health.path and server.mcp.path must differ");
        }

        Ok(())
    }
}
