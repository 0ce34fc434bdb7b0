//! Result type alias for picsync

use super::errors::PicsyncError;

/// Result type alias for picsync operations
///
/// Convenience alias that uses `PicsyncError` as the error type. Use this
/// throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, PicsyncError>;
