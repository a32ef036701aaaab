//! Backend connection settings

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const CONFIG_FILE: &str = "cadence.toml";
const ENV_PREFIX: &str = "CADENCE";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BaasConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Public (anon) API key, sent as `apikey` on every request
    pub api_key: String,

    /// Signed-in user's token. Requests fall back to the API key.
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many top songs radio picks from
    #[serde(default = "default_radio_pool_size")]
    pub radio_pool_size: usize,
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_radio_pool_size() -> usize {
    25
}

impl BaasConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            access_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            radio_pool_size: default_radio_pool_size(),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Load configuration from `cadence.toml` and the environment
    ///
    /// Environment variables (`CADENCE_URL`, `CADENCE_API_KEY`, ...) override
    /// the file, which is optional.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same as [`load`](Self::load) with an explicit file path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(path.as_ref(), ENV_PREFIX)
    }

    fn build(path: &Path, env_prefix: &str) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if path.exists() {
            settings = settings.add_source(::config::File::from(path));
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix(env_prefix).try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        if self.api_key.trim().is_empty() {
            return Err(ClientError::Config("api_key cannot be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.radio_pool_size == 0 {
            return Err(ClientError::Config(
                "radio_pool_size must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Token for the `Authorization` header
    pub fn bearer_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}
