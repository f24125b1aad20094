//! Structured logging for pipeline operations.
//!
//! Every session operation logs its lifecycle with the session id and the
//! operation name attached, so one user's run can be followed in the logs.

use tracing::{error, info, warn, Span};

use crate::session::SessionId;

/// Logger bound to one session and one operation.
#[derive(Debug, Clone)]
pub struct OperationLogger {
    session_id: String,
    operation: String,
}

impl OperationLogger {
    /// Create a logger for `operation` (e.g. "generate_script") within a session.
    pub fn new(session_id: &SessionId, operation: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Operation started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Operation progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Operation warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Operation failed: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            operation = %self.operation,
            "Operation completed: {}", message
        );
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Span covering the whole operation; service request spans nest under it.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "pipeline_operation",
            session_id = %self.session_id,
            operation = %self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_carries_session_and_operation() {
        let session_id = SessionId::new();
        let logger = OperationLogger::new(&session_id, "generate_video");

        assert_eq!(logger.session_id(), session_id.to_string());
        assert_eq!(logger.operation(), "generate_video");
    }
}
