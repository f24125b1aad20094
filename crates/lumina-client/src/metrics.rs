//! Generation Service request metrics.
//!
//! - Request counters by operation and status
//! - Latency histograms by operation

use metrics::{counter, histogram};

use crate::error::ServiceOperation;

/// Metric name constants for consistency.
pub mod names {
    /// Total service requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "lumina_service_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "lumina_service_latency_seconds";
}

/// Record metrics for a completed service request.
///
/// `status` is the HTTP status, or 0 when no response was received.
pub fn record_request(operation: ServiceOperation, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.as_str(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.as_str()
    )
    .record(latency_ms / 1000.0);
}
