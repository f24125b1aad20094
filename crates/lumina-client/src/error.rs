//! Generation Service error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for Generation Service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Remote operations exposed by the Generation Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOperation {
    ExtractDetails,
    GenerateScript,
    RegenerateScript,
    UploadImages,
    GenerateVideo,
    VideoStatus,
    Health,
}

impl ServiceOperation {
    /// Operation name used in spans and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceOperation::ExtractDetails => "extract_product_details",
            ServiceOperation::GenerateScript => "generate_script",
            ServiceOperation::RegenerateScript => "regenerate_script",
            ServiceOperation::UploadImages => "upload_images",
            ServiceOperation::GenerateVideo => "generate_video",
            ServiceOperation::VideoStatus => "video_status",
            ServiceOperation::Health => "health",
        }
    }

    /// Message shown to the user when the service gives no better one.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ServiceOperation::ExtractDetails => "Failed to extract product details",
            ServiceOperation::GenerateScript => "Failed to generate script",
            ServiceOperation::RegenerateScript => "Failed to regenerate script",
            ServiceOperation::UploadImages => "Failed to upload images",
            ServiceOperation::GenerateVideo => "Failed to generate video",
            ServiceOperation::VideoStatus => "Failed to fetch video status",
            ServiceOperation::Health => "Generation service is unreachable",
        }
    }
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while talking to the Generation Service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Non-2xx response. `message` is the service `detail` or the operation's
    /// fixed failure message.
    #[error("{message}")]
    Rejected {
        operation: ServiceOperation,
        status: u16,
        message: String,
    },

    #[error("{operation} request failed: {source}")]
    Network {
        operation: ServiceOperation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned an invalid response: {reason}")]
    InvalidResponse {
        operation: ServiceOperation,
        reason: String,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        operation: ServiceOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ServiceError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_response(operation: ServiceOperation, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation,
            reason: reason.into(),
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// A string `detail` field in a JSON body wins over the generic message.
    pub fn from_http_status(operation: ServiceOperation, status: u16, body: &[u8]) -> Self {
        let message = detail_from_body(body)
            .unwrap_or_else(|| operation.failure_message().to_string());
        Self::Rejected {
            operation,
            status,
            message,
        }
    }

    /// The operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<ServiceOperation> {
        match self {
            ServiceError::Rejected { operation, .. }
            | ServiceError::Network { operation, .. }
            | ServiceError::InvalidResponse { operation, .. }
            | ServiceError::Io { operation, .. } => Some(*operation),
            ServiceError::ConfigError(_) => None,
        }
    }

    /// HTTP status of a rejected request.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ServiceError::Rejected { status, .. } => Some(*status),
            ServiceError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The most specific message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Rejected { message, .. } => message.clone(),
            ServiceError::ConfigError(_) => self.to_string(),
            other => other
                .operation()
                .map(|op| op.failure_message().to_string())
                .unwrap_or_else(|| other.to_string()),
        }
    }
}

fn detail_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
}
