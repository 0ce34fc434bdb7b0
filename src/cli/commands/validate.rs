//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the picsync configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates internally, so a successful load means
        // the configuration is usable
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Asset Store: {}", config.assets.base_url);
                println!(
                    "  Database: {}:{}/{}",
                    config.database.host, config.database.port, config.database.dbname
                );
                println!("  Uploads Root: {}", config.export.uploads_root);
                println!("  Group Size: {}", config.export.group_size);
                println!("  List Limit: {}", config.export.list_limit);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
