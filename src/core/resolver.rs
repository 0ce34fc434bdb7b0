//! Image-set resolution
//!
//! Given one product's image record, partitions its slots into "already
//! exported" and "needs upload", deduplicating slots whose local paths
//! canonicalize to the same file. Slots are walked in the fixed declaration
//! order, so the earliest slot claims a shared path and later duplicates are
//! dropped silently; they are serviced by the fan-out at persistence time.

use crate::core::paths::{normalize_image_path, PathResolver};
use crate::domain::{ImageSlot, ProductImages};
use std::collections::HashSet;
use std::path::PathBuf;

/// One slot under consideration for upload
#[derive(Debug, Clone)]
pub struct ExportItem {
    /// Slot this item belongs to
    pub slot: ImageSlot,

    /// Canonical relative path, the deduplication key
    pub canonical_path: String,

    /// Absolute path on disk
    pub absolute_path: PathBuf,

    /// Remote URL the slot already carries, if any
    pub existing_remote: Option<String>,
}

/// Partition of a product's slots into upload work and skips
#[derive(Debug, Default)]
pub struct UploadPlan {
    /// Items that need uploading, at most one per canonical path
    pub to_upload: Vec<ExportItem>,

    /// Items already exported, possibly several per canonical path
    pub skipped: Vec<ExportItem>,
}

/// Build the upload plan for one product record
pub fn resolve_slots(product: &ProductImages, paths: &PathResolver) -> UploadPlan {
    let mut plan = UploadPlan::default();
    let mut claimed: HashSet<String> = HashSet::new();

    for slot in ImageSlot::ALL {
        let Some(local_path) = product.local_path(slot) else {
            continue;
        };

        let Some(canonical_path) = normalize_image_path(local_path) else {
            continue;
        };

        let absolute_path = paths.uploads_root().join(&canonical_path);

        let item = ExportItem {
            slot,
            canonical_path: canonical_path.clone(),
            absolute_path,
            existing_remote: product
                .remote_url(slot)
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string),
        };

        // A slot that already carries a remote URL is skipped regardless of
        // whether other slots share its path.
        if item.existing_remote.is_some() {
            plan.skipped.push(item);
            continue;
        }

        // An earlier slot already claimed this path; its upload result will
        // fan out to this slot at persistence time.
        if !claimed.insert(canonical_path) {
            continue;
        }

        plan.to_upload.push(item);
    }

    plan
}
