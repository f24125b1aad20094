//! Studio configuration.

use std::fmt;
use std::str::FromStr;

use lumina_client::{ServiceConfig, ServiceResult};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, colored
    #[default]
    Pretty,
    /// One JSON object per line, for log shipping
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Anything other than `json` falls back to pretty output.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        })
    }
}

/// Configuration for the studio binary.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub service: ServiceConfig,
    pub log_format: LogFormat,
}

impl StudioConfig {
    /// Create config from environment variables.
    pub fn from_env() -> ServiceResult<Self> {
        Ok(Self {
            service: ServiceConfig::from_env()?,
            log_format: std::env::var("LOG_FORMAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        })
    }
}
