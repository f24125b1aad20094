//! Studio error types.

use std::path::PathBuf;

use thiserror::Error;

use lumina_client::ServiceError;
use lumina_models::PipelineStatus;

pub type StudioResult<T> = Result<T, StudioError>;

/// Broad category of a failure, for choosing how to notify the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable local input; nothing was sent
    Validation,
    /// Another stage is in flight; nothing was sent
    Busy,
    /// The Generation Service call failed
    Remote,
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("{0}")]
    Validation(String),

    #[error("Cannot start {}: {} is already in progress", .requested.describe(), .running.describe())]
    Busy {
        requested: PipelineStatus,
        running: PipelineStatus,
    },

    #[error("Invalid job manifest {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl StudioError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn busy(requested: PipelineStatus, running: PipelineStatus) -> Self {
        Self::Busy { requested, running }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StudioError::Validation(_) | StudioError::Manifest { .. } => ErrorKind::Validation,
            StudioError::Busy { .. } => ErrorKind::Busy,
            StudioError::Service(_) => ErrorKind::Remote,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, StudioError::Busy { .. })
    }

    /// Message to show in a user notification.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Service(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
