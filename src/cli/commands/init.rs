//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "picsync.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set PICSYNC_ASSETS_API_KEY and PICSYNC_DATABASE_PASSWORD");
                println!("     (a .env file next to the binary is picked up automatically)");
                println!("  3. Validate configuration: picsync validate-config");
                println!("  4. Run export: picsync export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate sample configuration
    fn generate_config() -> String {
        r#"# picsync Configuration File
# Product image export tool

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[assets]
# Base URL of the asset store API
base_url = "https://assets.example.com/api"

# API key sent with every upload (use environment variable)
api_key = "${PICSYNC_ASSETS_API_KEY}"

# Request timeout in seconds
timeout_seconds = 30

# TLS certificate verification
tls_verify = true

[database]
host = "localhost"
port = 5432
user = "picsync"
password = "${PICSYNC_DATABASE_PASSWORD}"
dbname = "catalog"

# Connection pool settings
max_connections = 10
connection_timeout_seconds = 30

[export]
# Root directory the catalog's local image paths are relative to
uploads_root = "/srv/shop/uploads"

# Number of products exported concurrently per group (1-50)
group_size = 3

# Maximum products fetched when no ids are given (1-100)
list_limit = 100

[logging]
# Enable JSON file logging with rotation
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
