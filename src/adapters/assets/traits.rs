//! Asset uploader abstraction
//!
//! The exporter talks to the asset store through this trait so the upload
//! transport can be swapped out in tests.

use crate::domain::{AssetApiError, ImageSlot};
use async_trait::async_trait;

/// One file upload: bytes plus the metadata the asset store expects
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// Content type of the file
    pub content_type: String,

    /// File name sent with the multipart part
    pub file_name: String,

    /// Owning product id
    pub product_id: i64,

    /// Slot the upload belongs to, used as a tag
    pub slot: ImageSlot,

    /// Human description stored alongside the asset
    pub description: String,

    /// Alt text for the asset, the product name when the catalog has one
    pub alt_text: String,
}

/// Uploads one file to the external asset store
///
/// A single attempt per call: implementations must not retry internally, so
/// one failed upload yields exactly one error outcome for its slot.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Upload one image and return its remote locator URL
    ///
    /// # Errors
    ///
    /// Returns `AssetApiError::Upload` with the store's messages verbatim
    /// when the store rejects the file, and `AssetApiError::NoLocatorReturned`
    /// when the store reports success without either URL field.
    async fn upload_image(&self, request: UploadRequest) -> Result<String, AssetApiError>;
}
