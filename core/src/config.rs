//! Client configuration.
//!
//! Set once when the client is constructed and never mutated afterwards.
//! `from_env` reads:
//!
//! - `CLOZE_API_KEY` (required)
//! - `CLOZE_BASE_URL` (optional, defaults to `https://api.cloze.com`)
//! - `CLOZE_TIMEOUT_SECS` (optional, defaults to 30)
//! - `CLOZE_MAX_RESPONSE_BYTES` (optional, defaults to 64 MiB)
//!
//! Response bodies larger than `max_response_bytes` are not read to the end
//! and surface as `ClozeError::Decoding`. Raise it for bulk `feed` pages.

use std::time::Duration;

use ureq::http::{HeaderValue, Uri};

use crate::error::{ClozeError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.cloze.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

pub const ENV_API_KEY: &str = "CLOZE_API_KEY";
pub const ENV_BASE_URL: &str = "CLOZE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "CLOZE_TIMEOUT_SECS";
pub const ENV_MAX_RESPONSE_BYTES: &str = "CLOZE_MAX_RESPONSE_BYTES";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Upper bound on a single call, connect through body read.
    pub timeout: Duration,
    pub user_agent: String,
    /// Largest response body the client will read.
    pub max_response_bytes: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("cloze-sdk-rust/", env!("CARGO_PKG_VERSION")).to_string(),
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY)
            .ok_or_else(|| ClozeError::Config(format!("{ENV_API_KEY} is not set")))?;
        let mut config = Self::new(api_key);

        if let Some(base_url) = get(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClozeError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get(ENV_MAX_RESPONSE_BYTES) {
            config.max_response_bytes = raw.trim().parse().map_err(|_| {
                ClozeError::Config(format!("{ENV_MAX_RESPONSE_BYTES} must be a byte count, got '{raw}'"))
            })?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_response_bytes(mut self, limit: u64) -> Self {
        self.max_response_bytes = limit;
        self
    }

    /// Reject values that can never go on the wire.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ClozeError::Config("API key must not be empty".to_string()));
        }
        if HeaderValue::from_str(&format!("Bearer {}", self.api_key)).is_err() {
            return Err(ClozeError::Config(
                "API key contains characters not allowed in an HTTP header".to_string(),
            ));
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ClozeError::Config(format!(
                "user agent '{}' is not a valid HTTP header value",
                self.user_agent.escape_debug()
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClozeError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if let Err(err) = self.base_url.parse::<Uri>() {
            return Err(ClozeError::Config(format!("base URL '{}' is invalid: {err}", self.base_url)));
        }
        if self.timeout.is_zero() {
            return Err(ClozeError::Config("timeout must be greater than zero".to_string()));
        }
        if self.max_response_bytes == 0 {
            return Err(ClozeError::Config("max response size must be greater than zero".to_string()));
        }
        Ok(())
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_response_bytes", &self.max_response_bytes)
            .finish()
    }
}
