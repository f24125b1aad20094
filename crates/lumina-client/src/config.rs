//! Generation Service client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ServiceError, ServiceResult};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Generation Service client configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service root; always ends with `/` so endpoint joins keep any path prefix
    pub base_url: Url,
    /// Whole-request timeout (video rendering requests are slow)
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl ServiceConfig {
    /// Create a config pointing at `base_url` with default timeouts.
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// Create config from environment variables.
    pub fn from_env() -> ServiceResult<Self> {
        let base_url = std::env::var("LUMINA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            timeout: Duration::from_secs(
                std::env::var("LUMINA_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("LUMINA_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
        })
    }

    /// Resolve an endpoint path (without leading slash) against the base URL.
    pub fn endpoint(&self, path: &str) -> ServiceResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ServiceError::config_error(format!("Invalid endpoint {}: {}", path, e)))
    }
}

fn parse_base_url(raw: &str) -> ServiceResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ServiceError::config_error("LUMINA_API_URL cannot be empty"));
    }

    let mut url = Url::parse(raw)
        .map_err(|e| ServiceError::config_error(format!("Invalid service URL {}: {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(ServiceError::config_error(format!(
            "Service URL {} cannot be used as a base",
            raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
