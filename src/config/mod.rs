//! Configuration management for picsync.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! picsync uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`PICSYNC_*` prefix)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [assets]
//! base_url = "https://assets.example.com/api"
//! api_key = "${PICSYNC_ASSETS_API_KEY}"
//!
//! [database]
//! host = "localhost"
//! user = "picsync"
//! password = "${PICSYNC_DATABASE_PASSWORD}"
//! dbname = "catalog"
//!
//! [export]
//! uploads_root = "/srv/shop/uploads"
//! group_size = 3
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AssetsConfig, DatabaseConfig, ExportConfig, LoggingConfig, PicsyncConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
