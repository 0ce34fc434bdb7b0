//! Export results and statistics
//!
//! This module defines the per-image outcomes, the per-product result record,
//! and the run-level batch aggregate. All folds are commutative (sums and
//! list concatenation), so statistics are independent of completion order.

use crate::domain::ImageSlot;
use std::fmt;
use std::time::Duration;

/// What happened to one image slot during an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// Successfully uploaded in this run
    Uploaded,
    /// Already exported, remote URL left untouched
    Skipped,
    /// File missing on disk; does not flip the product's success flag
    NotFound,
    /// Read or upload failure
    Error,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UploadStatus::Uploaded => "uploaded",
            UploadStatus::Skipped => "skipped",
            UploadStatus::NotFound => "not_found",
            UploadStatus::Error => "error",
        };
        f.write_str(text)
    }
}

/// Result of processing one image slot
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Slot the outcome belongs to
    pub slot: ImageSlot,

    /// Canonical local path of the image
    pub local_path: String,

    /// Remote URL, present for uploaded and skipped outcomes
    pub remote_url: Option<String>,

    /// Outcome classification
    pub status: UploadStatus,

    /// Error message for not_found and error outcomes
    pub error: Option<String>,
}

/// Result of exporting one product's images
#[derive(Debug, Clone)]
pub struct ProductExportResult {
    /// Product the result belongs to
    pub product_id: i64,

    /// True iff no error-status outcomes occurred and the error list is
    /// empty; not_found outcomes alone never flip this
    pub success: bool,

    /// Slots considered (uploads attempted plus skips)
    pub total_processed: usize,

    /// Images uploaded in this run
    pub total_uploaded: usize,

    /// Slots skipped because they were already exported
    pub total_skipped: usize,

    /// Images missing on disk
    pub total_not_found: usize,

    /// Read/upload failures
    pub total_errors: usize,

    /// Per-slot outcomes
    pub outcomes: Vec<UploadOutcome>,

    /// Error and warning messages collected during the export
    pub errors: Vec<String>,
}

impl ProductExportResult {
    /// Create an empty result for a product
    pub fn new(product_id: i64) -> Self {
        Self {
            product_id,
            success: false,
            total_processed: 0,
            total_uploaded: 0,
            total_skipped: 0,
            total_not_found: 0,
            total_errors: 0,
            outcomes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Zero-progress failure, used for validation errors and crashes
    pub fn failed(product_id: i64, message: impl Into<String>) -> Self {
        let mut result = Self::new(product_id);
        result.total_errors = 1;
        result.errors.push(message.into());
        result
    }

    /// Record one outcome, updating the matching counter
    pub fn record(&mut self, outcome: UploadOutcome) {
        match outcome.status {
            UploadStatus::Uploaded => self.total_uploaded += 1,
            UploadStatus::Skipped => self.total_skipped += 1,
            UploadStatus::NotFound => self.total_not_found += 1,
            UploadStatus::Error => self.total_errors += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Run-level aggregate over all products in a batch
#[derive(Debug, Clone)]
pub struct BatchExportResult {
    /// True iff no product reported an error and no batch-level errors
    /// occurred
    pub success: bool,

    /// Products the batch was asked to export
    pub total_products: usize,

    /// Products that produced a result
    pub processed_products: usize,

    /// Sum of per-product uploaded counts
    pub total_uploaded: usize,

    /// Sum of per-product skipped counts
    pub total_skipped: usize,

    /// Sum of per-product not_found counts
    pub total_not_found: usize,

    /// Sum of per-product error counts
    pub total_errors: usize,

    /// Every per-product result, in completion order
    pub product_results: Vec<ProductExportResult>,

    /// Batch-level error strings (failed products and group failures)
    pub errors: Vec<String>,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl BatchExportResult {
    /// Create an empty aggregate for a batch of `total_products`
    pub fn new(total_products: usize) -> Self {
        Self {
            success: false,
            total_products,
            processed_products: 0,
            total_uploaded: 0,
            total_skipped: 0,
            total_not_found: 0,
            total_errors: 0,
            product_results: Vec::new(),
            errors: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Fold one product result into the aggregate
    pub fn absorb(&mut self, result: ProductExportResult) {
        self.processed_products += 1;
        self.total_uploaded += result.total_uploaded;
        self.total_skipped += result.total_skipped;
        self.total_not_found += result.total_not_found;
        self.total_errors += result.total_errors;

        if !result.success && !result.errors.is_empty() {
            self.errors.push(format!(
                "Product {}: {}",
                result.product_id,
                result.errors.join(", ")
            ));
        }

        self.product_results.push(result);
    }

    /// Stamp the final duration and success flag
    pub fn finish(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self.success = self.total_errors == 0 && self.errors.is_empty();
        self
    }

    /// Log the batch summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_products = self.total_products,
            processed = self.processed_products,
            uploaded = self.total_uploaded,
            skipped = self.total_skipped,
            not_found = self.total_not_found,
            errors = self.total_errors,
            duration_secs = self.duration.as_secs(),
            "Batch export completed"
        );

        for error in &self.errors {
            tracing::warn!(error = %error, "Batch export error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: UploadStatus) -> UploadOutcome {
        UploadOutcome {
            slot: ImageSlot::Main,
            local_path: "a.jpg".to_string(),
            remote_url: None,
            status,
            error: None,
        }
    }

    #[test]
    fn test_record_updates_counters() {
        let mut result = ProductExportResult::new(1);
        result.record(outcome(UploadStatus::Uploaded));
        result.record(outcome(UploadStatus::Uploaded));
        result.record(outcome(UploadStatus::Skipped));
        result.record(outcome(UploadStatus::NotFound));
        result.record(outcome(UploadStatus::Error));

        assert_eq!(result.total_uploaded, 2);
        assert_eq!(result.total_skipped, 1);
        assert_eq!(result.total_not_found, 1);
        assert_eq!(result.total_errors, 1);
        assert_eq!(result.outcomes.len(), 5);
    }

    #[test]
    fn test_failed_result_is_zero_progress() {
        let result = ProductExportResult::failed(7, "Invalid product id");
        assert_eq!(result.product_id, 7);
        assert!(!result.success);
        assert_eq!(result.total_processed, 0);
        assert_eq!(result.total_errors, 1);
        assert_eq!(result.errors, vec!["Invalid product id".to_string()]);
    }

    #[test]
    fn test_absorb_is_additive() {
        let mut batch = BatchExportResult::new(2);

        let mut first = ProductExportResult::new(1);
        first.record(outcome(UploadStatus::Uploaded));
        first.record(outcome(UploadStatus::Skipped));
        first.success = true;

        let mut second = ProductExportResult::new(2);
        second.record(outcome(UploadStatus::Uploaded));
        second.record(outcome(UploadStatus::NotFound));
        second.success = true;

        batch.absorb(first);
        batch.absorb(second);

        assert_eq!(batch.processed_products, 2);
        assert_eq!(batch.total_uploaded, 2);
        assert_eq!(batch.total_skipped, 1);
        assert_eq!(batch.total_not_found, 1);
        let summed: usize = batch
            .product_results
            .iter()
            .map(|r| r.total_uploaded)
            .sum();
        assert_eq!(batch.total_uploaded, summed);
    }

    #[test]
    fn test_failed_product_errors_surface_at_batch_level() {
        let mut batch = BatchExportResult::new(1);
        batch.absorb(ProductExportResult::failed(9, "Product not found: 9"));

        assert_eq!(batch.errors.len(), 1);
        assert!(batch.errors[0].starts_with("Product 9:"));

        let batch = batch.finish(Duration::from_millis(5));
        assert!(!batch.success);
    }

    #[test]
    fn test_finish_success_requires_no_errors() {
        let mut batch = BatchExportResult::new(1);
        let mut result = ProductExportResult::new(1);
        result.record(outcome(UploadStatus::NotFound));
        result.success = true;
        batch.absorb(result);

        let batch = batch.finish(Duration::from_millis(5));
        assert!(batch.success, "not_found alone must not fail the batch");
    }

    #[test]
    fn test_upload_status_display() {
        assert_eq!(UploadStatus::Uploaded.to_string(), "uploaded");
        assert_eq!(UploadStatus::NotFound.to_string(), "not_found");
    }
}
