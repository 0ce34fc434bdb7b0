//! Export command implementation
//!
//! This module implements the `export` command for uploading product images
//! to the asset store and writing the remote URLs back to the catalog.

use crate::adapters::assets::AssetsClient;
use crate::adapters::database::traits::ProductStore;
use crate::adapters::database::PostgresProductStore;
use crate::config::load_config;
use crate::core::export::{BatchExporter, LogProgressSink, ProductExporter};
use crate::core::paths::PathResolver;
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Product id(s) to export (comma-separated). When omitted, products
    /// not yet exported are fetched from the catalog.
    #[arg(long)]
    pub product_id: Option<String>,

    /// Maximum number of not-yet-exported products to fetch (1-100)
    #[arg(long)]
    pub limit: Option<i64>,

    /// Override the number of products exported concurrently per group
    #[arg(long)]
    pub group_size: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(group_size) = self.group_size {
            tracing::info!(group_size, "Overriding group size from CLI");
            config.export.group_size = group_size;
        }
        if let Some(limit) = self.limit {
            tracing::info!(limit, "Overriding list limit from CLI");
            config.export.list_limit = limit;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        // Parse explicit product ids if given
        let explicit_ids = match &self.product_id {
            Some(raw) => Some(parse_product_ids(raw)?),
            None => None,
        };

        // Connect to the catalog
        let store = Arc::new(PostgresProductStore::new(&config.database)?);
        store.test_connection().await?;
        tracing::info!("Database connection established");

        // Build the pipeline
        let client = Arc::new(AssetsClient::new(config.assets.clone())?);
        let resolver = PathResolver::new(&config.export.uploads_root);
        let exporter = Arc::new(ProductExporter::new(store.clone(), client, resolver));
        let batch = BatchExporter::with_group_size(exporter, config.export.group_size);

        // Resolve which products to export
        let product_ids = match explicit_ids {
            Some(ids) => ids,
            None => store.list_not_exported(config.export.list_limit).await?,
        };

        if product_ids.is_empty() {
            println!("No products to export.");
            return Ok(0);
        }

        println!("Exporting {} product(s)...", product_ids.len());

        let progress = LogProgressSink;
        let result = batch.export_all(&product_ids, Some(&progress)).await;

        println!();
        println!("Export Summary:");
        println!("  Products:  {}", result.processed_products);
        println!("  Uploaded:  {}", result.total_uploaded);
        println!("  Skipped:   {}", result.total_skipped);
        println!("  Not found: {}", result.total_not_found);
        println!("  Errors:    {}", result.total_errors);
        println!("  Duration:  {:.1}s", result.duration.as_secs_f64());

        if !result.errors.is_empty() {
            println!();
            println!("Errors:");
            for error in &result.errors {
                println!("  - {error}");
            }
        }

        if result.success {
            println!();
            println!("✅ Export completed successfully");
            Ok(0)
        } else {
            println!();
            println!("❌ Export completed with errors");
            Ok(1)
        }
    }
}

/// Parse a comma-separated list of product ids
fn parse_product_ids(raw: &str) -> anyhow::Result<Vec<i64>> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("Invalid product id: '{s}'"))
        })
        .collect()
}
