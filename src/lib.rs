// picsync - Product Image Export Tool
// Copyright (c) 2026 picsync Contributors
// Licensed under the MIT License

//! # picsync - Product image export tool
//!
//! picsync uploads a product catalog's local images to a remote asset store
//! and writes the returned URLs back to the catalog, marking each product as
//! exported. Re-running an export is safe: already-exported images are
//! skipped and duplicate local paths within a product are uploaded once.
//!
//! ## Architecture
//!
//! picsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (path normalization, slot resolution, export)
//! - [`adapters`] - External integrations (asset store API, catalog database)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use picsync::adapters::assets::AssetsClient;
//! use picsync::adapters::database::PostgresProductStore;
//! use picsync::core::export::{BatchExporter, ProductExporter};
//! use picsync::core::paths::PathResolver;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = picsync::config::load_config("picsync.toml")?;
//!
//! let store = Arc::new(PostgresProductStore::new(&config.database)?);
//! let client = Arc::new(AssetsClient::new(config.assets.clone())?);
//! let resolver = PathResolver::new(&config.export.uploads_root);
//!
//! let exporter = Arc::new(ProductExporter::new(store, client, resolver));
//! let batch = BatchExporter::with_group_size(exporter, config.export.group_size);
//!
//! let result = batch.export_all(&[101, 102, 103], None).await;
//! println!("Uploaded {} images", result.total_uploaded);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
