//! Export pipeline
//!
//! Per-product export, batch orchestration, result aggregation, and progress
//! reporting.

pub mod batch;
pub mod product;
pub mod progress;
pub mod report;

pub use batch::{BatchExporter, DEFAULT_GROUP_SIZE};
pub use product::ProductExporter;
pub use progress::{LogProgressSink, ProgressEvent, ProgressSink, ProgressStatus};
pub use report::{BatchExportResult, ProductExportResult, UploadOutcome, UploadStatus};
