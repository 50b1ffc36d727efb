pub mod init;
mod schema;

pub use schema::{Config, DEFAULT_NAME_COLUMN};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::positions::PositionGroup;
use crate::scoring::validate_scoring;

/// Get the config directory path (~/.config/scout-rank/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("scout-rank")
}

/// Get the default config file path (~/.config/scout-rank/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let path = get_config_path();
            if path.exists() {
                read_config(&path)
            } else {
                debug!("no config at {}, using defaults", path.display());
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Validate a loaded configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = match validate_scoring(&config.weights, &config.filters) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    if let Some(ref group) = config.default_group {
        if let Err(e) = group.parse::<PositionGroup>() {
            errors.push(format!("default_group: {}", e));
        }
    }

    if config.name_column.trim().is_empty() {
        errors.push("name_column: must not be empty".to_string());
    }

    if config.top == Some(0) {
        errors.push("top: must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
