//! Domain error types
//!
//! This module defines the error hierarchy for picsync. All errors are
//! domain-specific and don't expose third-party types. Each failure is meant
//! to be caught at the narrowest scope that can still produce a meaningful
//! statistic; nothing escapes the batch orchestrator.

use thiserror::Error;

/// Main picsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum PicsyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors (bad product id, empty batch)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catalog store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Local image file errors
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Asset store API errors
    #[error("Asset API error: {0}")]
    AssetApi(#[from] AssetApiError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Catalog store errors
///
/// Errors raised by the product catalog persistence layer. These don't expose
/// the underlying database driver types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the catalog database
    #[error("Failed to connect to catalog database: {0}")]
    ConnectionFailed(String),

    /// Product not found - terminal for that product, never retried
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Update failed (remote references could not be persisted)
    #[error("Update failed: {0}")]
    UpdateFailed(String),
}

/// Local image file errors
///
/// Per-image failures: non-fatal for the owning product, recorded as a
/// `not_found` or `error` outcome.
#[derive(Debug, Error)]
pub enum FileError {
    /// File does not exist at check time
    #[error("File not found on disk: {0}")]
    NotFound(String),

    /// File exists but could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
}

/// Asset store API errors
///
/// Errors raised when uploading to the external asset store. The store's own
/// messages are carried verbatim. One failed upload yields exactly one error
/// outcome for its slot; there is no automatic retry.
#[derive(Debug, Error)]
pub enum AssetApiError {
    /// Failed to reach the asset store
    #[error("Failed to connect to asset store: {0}")]
    ConnectionFailed(String),

    /// Upload request exceeded the configured deadline
    #[error("Upload timed out: {0}")]
    Timeout(String),

    /// The request could not be built
    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),

    /// The store rejected the upload, messages verbatim
    #[error("Upload rejected: {0}")]
    Upload(String),

    /// The store reported success but returned neither URL field
    #[error("No locator returned by the asset store")]
    NoLocatorReturned,

    /// The store's response could not be interpreted
    #[error("Invalid response from asset store: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for PicsyncError {
    fn from(err: std::io::Error) -> Self {
        PicsyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PicsyncError {
    fn from(err: serde_json::Error) -> Self {
        PicsyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PicsyncError {
    fn from(err: toml::de::Error) -> Self {
        PicsyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picsync_error_display() {
        let err = PicsyncError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::ProductNotFound(42);
        let err: PicsyncError = store_err.into();
        assert!(matches!(
            err,
            PicsyncError::Store(StoreError::ProductNotFound(42))
        ));
    }

    #[test]
    fn test_file_error_conversion() {
        let file_err = FileError::NotFound("2024/01/a.jpg".to_string());
        let err: PicsyncError = file_err.into();
        assert!(matches!(err, PicsyncError::File(_)));
    }

    #[test]
    fn test_asset_api_error_display() {
        let err = AssetApiError::Upload("file too large, bad format".to_string());
        assert_eq!(
            err.to_string(),
            "Upload rejected: file too large, bad format"
        );
    }

    #[test]
    fn test_no_locator_display() {
        let err = AssetApiError::NoLocatorReturned;
        assert_eq!(err.to_string(), "No locator returned by the asset store");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PicsyncError = io_err.into();
        assert!(matches!(err, PicsyncError::Io(_)));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = PicsyncError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = AssetApiError::NoLocatorReturned;
        let _: &dyn std::error::Error = &err;
        let err = StoreError::QueryFailed("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
