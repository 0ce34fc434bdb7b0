//! Batch export orchestration
//!
//! Splits a batch of product ids into fixed-size groups and runs each group's
//! exports concurrently on the runtime. Groups run strictly one after another
//! so that at most `group_size` products are in flight at any time.

use crate::core::export::product::ProductExporter;
use crate::core::export::progress::{ProgressEvent, ProgressSink, ProgressStatus};
use crate::core::export::report::{BatchExportResult, ProductExportResult};
use std::sync::Arc;
use std::time::Instant;

/// Default number of products exported concurrently per group
pub const DEFAULT_GROUP_SIZE: usize = 3;

/// Runs product exports in sequential groups of concurrent tasks
pub struct BatchExporter {
    exporter: Arc<ProductExporter>,
    group_size: usize,
}

impl BatchExporter {
    /// Create a batch exporter with the default group size
    pub fn new(exporter: Arc<ProductExporter>) -> Self {
        Self::with_group_size(exporter, DEFAULT_GROUP_SIZE)
    }

    /// Create a batch exporter with an explicit group size
    ///
    /// A zero group size is clamped to one so the batch always makes
    /// progress.
    pub fn with_group_size(exporter: Arc<ProductExporter>, group_size: usize) -> Self {
        Self {
            exporter,
            group_size: group_size.max(1),
        }
    }

    /// Export every product id in the batch and return the aggregate
    ///
    /// Individual product failures never abort the batch; a task that
    /// panics is folded in as a zero-progress failure for its product id.
    /// An empty id list is the only terminal rejection.
    pub async fn export_all(
        &self,
        product_ids: &[i64],
        progress: Option<&dyn ProgressSink>,
    ) -> BatchExportResult {
        if product_ids.is_empty() {
            tracing::warn!("Batch export called with no product ids");
            let mut result = BatchExportResult::new(0);
            result.total_errors = 1;
            result.errors.push("No product ids to export".to_string());
            return result.finish(std::time::Duration::from_secs(0));
        }

        let started = Instant::now();
        let total = product_ids.len();
        let mut batch = BatchExportResult::new(total);

        tracing::info!(
            total_products = total,
            group_size = self.group_size,
            "Starting batch export"
        );

        emit(
            progress,
            ProgressEvent {
                processed: 0,
                total,
                status: ProgressStatus::Preparing,
                current_product_id: 0,
                message: format!("Preparing export of {total} products"),
            },
        );

        for group in product_ids.chunks(self.group_size) {
            let group_start = batch.processed_products + 1;
            let group_end = batch.processed_products + group.len();

            emit(
                progress,
                ProgressEvent {
                    processed: batch.processed_products,
                    total,
                    status: ProgressStatus::Uploading,
                    current_product_id: group[0],
                    message: format!("Exporting products {group_start}-{group_end} of {total}"),
                },
            );

            let mut handles = Vec::with_capacity(group.len());
            for &product_id in group {
                let exporter = Arc::clone(&self.exporter);
                handles.push(tokio::spawn(async move {
                    exporter.export_product(product_id).await
                }));
            }

            let outcomes = futures::future::join_all(handles).await;
            for (&product_id, outcome) in group.iter().zip(outcomes) {
                let result = match outcome {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::error!(product_id, error = %e, "Export task crashed");
                        ProductExportResult::failed(
                            product_id,
                            format!("Export task crashed: {e}"),
                        )
                    }
                };
                batch.absorb(result);
            }

            emit(
                progress,
                ProgressEvent {
                    processed: batch.processed_products,
                    total,
                    status: ProgressStatus::Saving,
                    current_product_id: 0,
                    message: format!(
                        "Saved results for {} of {total} products",
                        batch.processed_products
                    ),
                },
            );
        }

        let batch = batch.finish(started.elapsed());

        emit(
            progress,
            ProgressEvent {
                processed: batch.processed_products,
                total,
                status: if batch.success {
                    ProgressStatus::Completed
                } else {
                    ProgressStatus::Error
                },
                current_product_id: 0,
                message: format!(
                    "Export finished: {} uploaded, {} skipped, {} missing, {} errors",
                    batch.total_uploaded,
                    batch.total_skipped,
                    batch.total_not_found,
                    batch.total_errors
                ),
            },
        );

        batch.log_summary();
        batch
    }
}

fn emit(progress: Option<&dyn ProgressSink>, event: ProgressEvent) {
    if let Some(sink) = progress {
        sink.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::assets::{AssetUploader, UploadRequest};
    use crate::adapters::database::ProductStore;
    use crate::core::paths::PathResolver;
    use crate::domain::{AssetApiError, ImageSlot, ProductImages, Result, StoreError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EmptyStore;

    #[async_trait]
    impl ProductStore for EmptyStore {
        async fn get_images(&self, product_id: i64) -> Result<ProductImages> {
            Err(StoreError::ProductNotFound(product_id).into())
        }

        async fn update_remote_images_and_mark_exported(
            &self,
            _product_id: i64,
            _staged: &[(ImageSlot, String)],
        ) -> Result<()> {
            Ok(())
        }

        async fn list_not_exported(&self, _limit: i64) -> Result<Vec<i64>> {
            Ok(Vec::new())
        }
    }

    struct PanickingStore {
        panic_id: i64,
    }

    #[async_trait]
    impl ProductStore for PanickingStore {
        async fn get_images(&self, product_id: i64) -> Result<ProductImages> {
            if product_id == self.panic_id {
                panic!("store blew up for product {product_id}");
            }
            Err(StoreError::ProductNotFound(product_id).into())
        }

        async fn update_remote_images_and_mark_exported(
            &self,
            _product_id: i64,
            _staged: &[(ImageSlot, String)],
        ) -> Result<()> {
            Ok(())
        }

        async fn list_not_exported(&self, _limit: i64) -> Result<Vec<i64>> {
            Ok(Vec::new())
        }
    }

    struct RejectingUploader;

    #[async_trait]
    impl AssetUploader for RejectingUploader {
        async fn upload_image(
            &self,
            _request: UploadRequest,
        ) -> std::result::Result<String, AssetApiError> {
            Err(AssetApiError::ConnectionFailed(
                "no server in unit tests".to_string(),
            ))
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ProgressSink for CollectingSink {
        fn emit(&self, event: ProgressEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn batch_exporter(group_size: usize) -> BatchExporter {
        let exporter = Arc::new(ProductExporter::new(
            Arc::new(EmptyStore),
            Arc::new(RejectingUploader),
            PathResolver::new("/nonexistent/uploads"),
        ));
        BatchExporter::with_group_size(exporter, group_size)
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let result = batch_exporter(3).export_all(&[], None).await;

        assert!(!result.success);
        assert_eq!(result.total_products, 0);
        assert_eq!(result.processed_products, 0);
        assert_eq!(result.total_errors, 1);
        assert_eq!(result.errors, vec!["No product ids to export".to_string()]);
    }

    #[tokio::test]
    async fn test_every_id_gets_a_result() {
        let ids = [1, 2, 3, 4, 5, 6, 7];
        let result = batch_exporter(3).export_all(&ids, None).await;

        assert_eq!(result.total_products, 7);
        assert_eq!(result.processed_products, 7);
        assert_eq!(result.product_results.len(), 7);
        // Every product is missing from the store, so all fail without
        // aborting the batch.
        assert!(!result.success);
        assert_eq!(result.errors.len(), 7);
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_ends_at_total() {
        let sink = CollectingSink::default();
        batch_exporter(3).export_all(&[1, 2, 3, 4, 5, 6, 7], Some(&sink)).await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events[0].status, ProgressStatus::Preparing);

        let mut last = 0;
        for event in events.iter() {
            assert!(event.processed >= last);
            last = event.processed;
        }

        let final_event = events.last().unwrap();
        assert_eq!(final_event.processed, 7);

        // Groups of 3 produce one uploading event per group: 3, 3, 1.
        let uploading = events
            .iter()
            .filter(|e| e.status == ProgressStatus::Uploading)
            .count();
        assert_eq!(uploading, 3);
    }

    #[tokio::test]
    async fn test_panicking_task_becomes_synthetic_failure() {
        let exporter = Arc::new(ProductExporter::new(
            Arc::new(PanickingStore { panic_id: 2 }),
            Arc::new(RejectingUploader),
            PathResolver::new("/nonexistent/uploads"),
        ));
        let batch = BatchExporter::with_group_size(exporter, 3);

        let result = batch.export_all(&[1, 2, 3], None).await;

        // The crashed task still yields a result for its product id.
        assert_eq!(result.processed_products, 3);
        assert_eq!(result.product_results.len(), 3);

        let crashed = result
            .product_results
            .iter()
            .find(|r| r.product_id == 2)
            .unwrap();
        assert!(!crashed.success);
        assert!(crashed.errors[0].contains("Export task crashed"));
    }

    #[tokio::test]
    async fn test_zero_group_size_still_progresses() {
        let result = batch_exporter(0).export_all(&[1, 2], None).await;
        assert_eq!(result.processed_products, 2);
    }
}
