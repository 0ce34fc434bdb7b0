//! Progress reporting
//!
//! The batch orchestrator emits progress events to an optional observer.
//! Delivery is fire-and-forget: sinks must not block the pipeline, and events
//! are transient, never stored.

use std::fmt;

/// Phase of the batch run an event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Batch accepted, groups being prepared
    Preparing,
    /// A group's uploads are running
    Uploading,
    /// A group's results are being folded and persisted
    Saving,
    /// The batch finished
    Completed,
    /// The batch was abandoned due to a fatal error
    Error,
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ProgressStatus::Preparing => "preparing",
            ProgressStatus::Uploading => "uploading",
            ProgressStatus::Saving => "saving",
            ProgressStatus::Completed => "completed",
            ProgressStatus::Error => "error",
        };
        f.write_str(text)
    }
}

/// One progress observation
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Products completed so far, monotonically non-decreasing
    pub processed: usize,

    /// Products in the whole batch
    pub total: usize,

    /// Phase the batch is in
    pub status: ProgressStatus,

    /// Product currently in flight, 0 when not applicable
    pub current_product_id: i64,

    /// Human-readable description
    pub message: String,
}

/// Observer for batch progress
///
/// Implementations must return quickly; a slow sink may drop or coalesce
/// events rather than stall the exporter.
pub trait ProgressSink: Send + Sync {
    /// Receive one event, best-effort
    fn emit(&self, event: ProgressEvent);
}

/// Sink that forwards events to the structured log
#[derive(Debug, Default)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: ProgressEvent) {
        tracing::info!(
            processed = event.processed,
            total = event.total,
            status = %event.status,
            message = %event.message,
            "Export progress"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(ProgressStatus::Preparing.to_string(), "preparing");
        assert_eq!(ProgressStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_log_sink_accepts_events() {
        let sink = LogProgressSink;
        sink.emit(ProgressEvent {
            processed: 1,
            total: 10,
            status: ProgressStatus::Uploading,
            current_product_id: 42,
            message: "Exporting products 1-3 of 10".to_string(),
        });
    }
}
