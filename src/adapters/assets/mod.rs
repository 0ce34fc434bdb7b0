//! Asset store integration
//!
//! This module provides the HTTP client for the external asset store and the
//! uploader trait the export pipeline is written against.

pub mod client;
pub mod models;
pub mod traits;

pub use client::AssetsClient;
pub use traits::{AssetUploader, UploadRequest};
