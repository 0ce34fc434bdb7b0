//! Core domain types for picsync
//!
//! This module contains the domain model: image slots, product image records,
//! and the error hierarchy shared across the pipeline.

pub mod errors;
pub mod product;
pub mod result;
pub mod slot;

pub use errors::{AssetApiError, FileError, PicsyncError, StoreError};
pub use product::ProductImages;
pub use result::Result;
pub use slot::ImageSlot;
