//! Image path normalization
//!
//! Raw paths in the catalog arrive in mixed shapes: URL-prefixed, rooted at
//! the uploads folder, or already relative. Normalization strips the known
//! prefixes until none match and yields the canonical relative path that
//! serves as the deduplication key across slots. The absolute path is the
//! configured uploads root joined with the canonical path.

use std::path::{Path, PathBuf};

/// Prefixes stripped from raw image paths, matched case-insensitively
const KNOWN_PREFIXES: [&str; 5] = ["http://", "https://", "/uploads/", "uploads/", "./uploads/"];

/// Normalize a raw image path into its canonical relative form
///
/// Returns `None` when the input is empty or reduces to empty. Canonical
/// paths compare case-sensitively; only the prefix matching is
/// case-insensitive.
pub fn normalize_image_path(raw: &str) -> Option<String> {
    let mut normalized = raw.trim();
    if normalized.is_empty() {
        return None;
    }

    // Strip until no known prefix matches anymore
    loop {
        let lower = normalized.to_lowercase();
        let Some(prefix) = KNOWN_PREFIXES.iter().find(|p| lower.starts_with(**p)) else {
            break;
        };
        normalized = &normalized[prefix.len()..];
    }

    let normalized = normalized.trim_start_matches('/');

    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Resolves canonical relative paths against the uploads root
#[derive(Debug, Clone)]
pub struct PathResolver {
    uploads_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at the configured uploads directory
    pub fn new(uploads_root: impl Into<PathBuf>) -> Self {
        Self {
            uploads_root: uploads_root.into(),
        }
    }

    /// Root directory the canonical paths are resolved against
    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    /// Absolute filesystem path for a raw stored path
    ///
    /// Returns `None` when the raw path normalizes to nothing.
    pub fn absolute(&self, raw: &str) -> Option<PathBuf> {
        normalize_image_path(raw).map(|relative| self.uploads_root.join(relative))
    }
}
