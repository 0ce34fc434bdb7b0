//! Single-product export
//!
//! Orchestrates resolver, file reader, and uploader for one product and
//! persists the newly obtained remote URLs. Uploads within a product run
//! sequentially; parallelism lives one level up, across products in a group.

use crate::adapters::assets::{AssetUploader, UploadRequest};
use crate::adapters::database::ProductStore;
use crate::core::export::report::{ProductExportResult, UploadOutcome, UploadStatus};
use crate::core::paths::{normalize_image_path, PathResolver};
use crate::core::reader::{file_exists, read_image};
use crate::core::resolver::{resolve_slots, ExportItem};
use crate::domain::{ImageSlot, PicsyncError, ProductImages, StoreError};
use std::collections::HashMap;
use std::sync::Arc;

/// Exports the images of one product at a time
pub struct ProductExporter {
    store: Arc<dyn ProductStore>,
    uploader: Arc<dyn AssetUploader>,
    paths: PathResolver,
}

impl ProductExporter {
    /// Create a new exporter over the given collaborators
    pub fn new(
        store: Arc<dyn ProductStore>,
        uploader: Arc<dyn AssetUploader>,
        paths: PathResolver,
    ) -> Self {
        Self {
            store,
            uploader,
            paths,
        }
    }

    /// Export one product's images and return its result record
    ///
    /// Always returns exactly one result; every failure mode is folded into
    /// it rather than propagated. The result's `success` flag is true iff no
    /// error-status outcome occurred: missing files count separately and do
    /// not flip it, and a failed persistence write is appended as a warning
    /// after the flag is computed, since the uploads themselves succeeded and
    /// are not undone.
    pub async fn export_product(&self, product_id: i64) -> ProductExportResult {
        if product_id <= 0 {
            return ProductExportResult::failed(
                product_id,
                format!("Invalid product id: {product_id}"),
            );
        }

        let product = match self.store.get_images(product_id).await {
            Ok(product) => product,
            Err(PicsyncError::Store(StoreError::ProductNotFound(_))) => {
                tracing::warn!(product_id, "Product not found");
                return ProductExportResult::failed(
                    product_id,
                    format!("Product not found: {product_id}"),
                );
            }
            Err(e) => {
                tracing::error!(product_id, error = %e, "Failed to load product");
                return ProductExportResult::failed(product_id, e.to_string());
            }
        };

        let plan = resolve_slots(&product, &self.paths);
        let mut result = ProductExportResult::new(product_id);

        for item in &plan.skipped {
            result.record(UploadOutcome {
                slot: item.slot,
                local_path: item.canonical_path.clone(),
                remote_url: item.existing_remote.clone(),
                status: UploadStatus::Skipped,
                error: None,
            });
        }

        result.total_processed = plan.to_upload.len() + plan.skipped.len();

        // Nothing to upload: no disk or network access happens at all.
        if plan.to_upload.is_empty() {
            result.success = true;
            return result;
        }

        // Remote URL obtained for each canonical path, for the fan-out below
        let mut uploaded_urls: HashMap<String, String> = HashMap::new();

        let alt_text = alt_text_for(&product);
        for item in &plan.to_upload {
            self.upload_one(product_id, item, &alt_text, &mut result, &mut uploaded_urls)
                .await;
        }

        // Success is decided by the upload phase; the persistence warning
        // appended below must not flip it.
        let success = result.total_errors == 0 && result.errors.is_empty();

        // Fan out every uploaded URL to all slots sharing its canonical path,
        // re-checked against the loaded record so an existing remote URL is
        // never overwritten.
        let staged = stage_remote_urls(&product, &uploaded_urls);

        if !staged.is_empty() {
            if let Err(e) = self
                .store
                .update_remote_images_and_mark_exported(product_id, &staged)
                .await
            {
                tracing::error!(product_id, error = %e, "Failed to persist remote URLs");
                result.errors.push(format!("Database: {e}"));
            }
        }

        result.success = success;
        result
    }

    async fn upload_one(
        &self,
        product_id: i64,
        item: &ExportItem,
        alt_text: &str,
        result: &mut ProductExportResult,
        uploaded_urls: &mut HashMap<String, String>,
    ) {
        if !file_exists(&item.absolute_path).await {
            tracing::warn!(
                product_id,
                slot = %item.slot,
                path = %item.absolute_path.display(),
                "File not found on disk"
            );
            result.record(UploadOutcome {
                slot: item.slot,
                local_path: item.canonical_path.clone(),
                remote_url: None,
                status: UploadStatus::NotFound,
                error: Some("File not found on disk".to_string()),
            });
            return;
        }

        let image = match read_image(&item.absolute_path).await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!(product_id, slot = %item.slot, error = %e, "Failed to read image");
                result.record(UploadOutcome {
                    slot: item.slot,
                    local_path: item.canonical_path.clone(),
                    remote_url: None,
                    status: UploadStatus::Error,
                    error: Some(e.to_string()),
                });
                result.errors.push(format!("{}: {}", item.slot, e));
                return;
            }
        };

        let request = UploadRequest {
            bytes: image.bytes,
            content_type: image.content_type.to_string(),
            file_name: image.file_name,
            product_id,
            slot: item.slot,
            description: format!("Product {} - {}", product_id, item.slot),
            alt_text: alt_text.to_string(),
        };

        match self.uploader.upload_image(request).await {
            Ok(url) => {
                uploaded_urls.insert(item.canonical_path.clone(), url.clone());
                result.record(UploadOutcome {
                    slot: item.slot,
                    local_path: item.canonical_path.clone(),
                    remote_url: Some(url),
                    status: UploadStatus::Uploaded,
                    error: None,
                });
            }
            Err(e) => {
                tracing::error!(product_id, slot = %item.slot, error = %e, "Upload failed");
                result.record(UploadOutcome {
                    slot: item.slot,
                    local_path: item.canonical_path.clone(),
                    remote_url: None,
                    status: UploadStatus::Error,
                    error: Some(e.to_string()),
                });
                result.errors.push(format!("{}: {}", item.slot, e));
            }
        }
    }
}

/// Alt text sent with every upload of a product: the catalog name when one
/// is set, a generic fallback otherwise
fn alt_text_for(product: &ProductImages) -> String {
    product
        .product_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Product {} image", product.product_id))
}

/// Stage remote URL writes for every slot whose canonical path was uploaded
///
/// Walks the whole record, not just the upload plan, so duplicate slots
/// dropped by the resolver still receive the shared URL. Slots that already
/// carry a remote URL are left alone.
fn stage_remote_urls(
    product: &ProductImages,
    uploaded_urls: &HashMap<String, String>,
) -> Vec<(ImageSlot, String)> {
    let mut staged = Vec::new();

    for slot in ImageSlot::ALL {
        let Some(local_path) = product.local_path(slot) else {
            continue;
        };
        let Some(canonical) = normalize_image_path(local_path) else {
            continue;
        };
        let Some(url) = uploaded_urls.get(&canonical) else {
            continue;
        };
        if !product.has_remote(slot) {
            staged.push((slot, url.clone()));
        }
    }

    staged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetApiError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MemoryStore {
        products: Mutex<HashMap<i64, ProductImages>>,
    }

    impl MemoryStore {
        fn with(products: Vec<ProductImages>) -> Self {
            Self {
                products: Mutex::new(
                    products.into_iter().map(|p| (p.product_id, p)).collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl ProductStore for MemoryStore {
        async fn get_images(&self, product_id: i64) -> Result<ProductImages> {
            self.products
                .lock()
                .unwrap()
                .get(&product_id)
                .cloned()
                .ok_or_else(|| StoreError::ProductNotFound(product_id).into())
        }

        async fn update_remote_images_and_mark_exported(
            &self,
            product_id: i64,
            staged: &[(ImageSlot, String)],
        ) -> Result<()> {
            let mut products = self.products.lock().unwrap();
            let product = products
                .get_mut(&product_id)
                .ok_or(StoreError::ProductNotFound(product_id))?;
            for (slot, url) in staged {
                product.set_remote_url(*slot, url.clone());
            }
            product.flag_export = true;
            Ok(())
        }

        async fn list_not_exported(&self, _limit: i64) -> Result<Vec<i64>> {
            Ok(Vec::new())
        }
    }

    struct StubUploader;

    #[async_trait]
    impl AssetUploader for StubUploader {
        async fn upload_image(
            &self,
            request: UploadRequest,
        ) -> std::result::Result<String, AssetApiError> {
            Ok(format!("https://cdn.example.com/{}", request.file_name))
        }
    }

    fn exporter(store: MemoryStore) -> ProductExporter {
        ProductExporter::new(
            Arc::new(store),
            Arc::new(StubUploader),
            PathResolver::new("/nonexistent/uploads"),
        )
    }

    #[tokio::test]
    async fn test_invalid_product_id_is_zero_progress_error() {
        let exporter = exporter(MemoryStore::with(vec![]));

        let result = exporter.export_product(0).await;
        assert!(!result.success);
        assert_eq!(result.total_processed, 0);
        assert_eq!(result.total_errors, 1);
        assert!(result.errors[0].contains("Invalid product id"));

        let result = exporter.export_product(-5).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_missing_product_is_terminal_error() {
        let exporter = exporter(MemoryStore::with(vec![]));

        let result = exporter.export_product(99).await;
        assert!(!result.success);
        assert_eq!(result.total_errors, 1);
        assert!(result.errors[0].contains("Product not found"));
    }

    #[tokio::test]
    async fn test_product_without_images_succeeds_without_io() {
        let store = MemoryStore::with(vec![ProductImages {
            product_id: 10,
            ..Default::default()
        }]);
        let exporter = exporter(store);

        let result = exporter.export_product(10).await;
        assert!(result.success);
        assert_eq!(result.total_processed, 0);
        assert!(result.outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_fully_exported_product_only_skips() {
        let store = MemoryStore::with(vec![ProductImages {
            product_id: 11,
            image_main: Some("a.jpg".to_string()),
            srv_image_main: Some("https://cdn/a.jpg".to_string()),
            ..Default::default()
        }]);
        let exporter = exporter(store);

        let result = exporter.export_product(11).await;
        assert!(result.success);
        assert_eq!(result.total_processed, 1);
        assert_eq!(result.total_skipped, 1);
        assert_eq!(result.total_uploaded, 0);
    }

    #[test]
    fn test_alt_text_prefers_product_name() {
        let named = ProductImages {
            product_id: 5,
            product_name: Some("Blue Widget".to_string()),
            ..Default::default()
        };
        assert_eq!(alt_text_for(&named), "Blue Widget");

        let unnamed = ProductImages {
            product_id: 5,
            ..Default::default()
        };
        assert_eq!(alt_text_for(&unnamed), "Product 5 image");

        let blank = ProductImages {
            product_id: 5,
            product_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(alt_text_for(&blank), "Product 5 image");
    }

    #[test]
    fn test_stage_remote_urls_fans_out_and_respects_existing() {
        let product = ProductImages {
            product_id: 1,
            image_main: Some("a.jpg".to_string()),
            image1: Some("/uploads/a.jpg".to_string()),
            image2: Some("b.jpg".to_string()),
            srv_image2: Some("https://cdn/old-b.jpg".to_string()),
            ..Default::default()
        };

        let mut uploaded = HashMap::new();
        uploaded.insert("a.jpg".to_string(), "https://cdn/a.jpg".to_string());
        uploaded.insert("b.jpg".to_string(), "https://cdn/new-b.jpg".to_string());

        let staged = stage_remote_urls(&product, &uploaded);

        // Both slots sharing a.jpg are staged; image2 keeps its existing URL.
        assert_eq!(
            staged,
            vec![
                (ImageSlot::Main, "https://cdn/a.jpg".to_string()),
                (ImageSlot::One, "https://cdn/a.jpg".to_string()),
            ]
        );
    }
}
