//! Catalog store abstraction
//!
//! The export pipeline reads product image records and writes back remote
//! URLs through this trait. There is no transaction spanning the asset upload
//! and the catalog update; persistence is a single-row, best-effort write.

use crate::domain::{ImageSlot, ProductImages, Result};
use async_trait::async_trait;

/// Product catalog store
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Load the image record for one product
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` when the product is absent,
    /// which is terminal for that product and never retried.
    async fn get_images(&self, product_id: i64) -> Result<ProductImages>;

    /// Write the staged remote URLs in one update and mark the product
    /// exported
    ///
    /// Only the given slots are touched; the export flag and timestamp are
    /// stamped in the same statement.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UpdateFailed` when the write fails. Successful
    /// uploads are not undone by a failed write.
    async fn update_remote_images_and_mark_exported(
        &self,
        product_id: i64,
        staged: &[(ImageSlot, String)],
    ) -> Result<()>;

    /// Product ids not yet exported, capped at `limit`
    ///
    /// Ordered so products with a main image come first.
    async fn list_not_exported(&self, limit: i64) -> Result<Vec<i64>>;
}
