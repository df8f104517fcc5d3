//! Settings for a [`RentryClient`](crate::RentryClient) session

use crate::errors::RentryError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://rentry.co";
pub const DEFAULT_USER_AGENT: &str = concat!("rentry-api/", env!("CARGO_PKG_VERSION"));

/// Client configuration
///
/// Every field is optional when deserializing; missing ones fall back to the defaults.
///
/// # Example
/// ```
/// use rentry_api::ClientConfig;
/// let config = ClientConfig::from_json(r#"{ "timeout_ms": 30000 }"#).unwrap();
/// assert_eq!(config.base_url, "https://rentry.co");
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Address of the service, every paste lives beneath it
    pub base_url: String,
    pub user_agent: String,
    /// Whole-request timeout in milliseconds handed to the HTTP client, none by default
    pub timeout_ms: Option<u64>,
    /// Referer sent with every request, the base address when unset
    pub referer: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: None,
            referer: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, RentryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the timeout, rounding up to the next whole millisecond
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
