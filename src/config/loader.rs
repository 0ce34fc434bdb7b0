//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PicsyncConfig;
use crate::config::secret_string;
use crate::domain::errors::PicsyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PicsyncConfig
/// 4. Applies environment variable overrides (PICSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<PicsyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PicsyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PicsyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    let mut config: PicsyncConfig = toml::from_str(&contents)
        .map_err(|e| PicsyncError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PicsyncError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PicsyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PICSYNC_* prefix
///
/// Environment variables follow the pattern: PICSYNC_<SECTION>_<KEY>
/// For example: PICSYNC_ASSETS_BASE_URL, PICSYNC_EXPORT_GROUP_SIZE
fn apply_env_overrides(config: &mut PicsyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("PICSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Asset store overrides
    if let Ok(val) = std::env::var("PICSYNC_ASSETS_BASE_URL") {
        config.assets.base_url = val;
    }
    if let Ok(val) = std::env::var("PICSYNC_ASSETS_API_KEY") {
        config.assets.api_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("PICSYNC_ASSETS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.assets.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("PICSYNC_ASSETS_TLS_VERIFY") {
        config.assets.tls_verify = val.parse().unwrap_or(true);
    }

    // Database overrides
    if let Ok(val) = std::env::var("PICSYNC_DATABASE_HOST") {
        config.database.host = val;
    }
    if let Ok(val) = std::env::var("PICSYNC_DATABASE_PORT") {
        if let Ok(port) = val.parse() {
            config.database.port = port;
        }
    }
    if let Ok(val) = std::env::var("PICSYNC_DATABASE_USER") {
        config.database.user = val;
    }
    if let Ok(val) = std::env::var("PICSYNC_DATABASE_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("PICSYNC_DATABASE_DBNAME") {
        config.database.dbname = val;
    }
    if let Ok(val) = std::env::var("PICSYNC_DATABASE_MAX_CONNECTIONS") {
        if let Ok(max) = val.parse() {
            config.database.max_connections = max;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("PICSYNC_EXPORT_UPLOADS_ROOT") {
        config.export.uploads_root = val;
    }
    if let Ok(val) = std::env::var("PICSYNC_EXPORT_GROUP_SIZE") {
        if let Ok(size) = val.parse() {
            config.export.group_size = size;
        }
    }
    if let Ok(val) = std::env::var("PICSYNC_EXPORT_LIST_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.export.list_limit = limit;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PICSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PICSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
