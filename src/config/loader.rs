//! Configuration loading from the file system

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::CONFIG_RELATIVE_PATH;
use super::types::ToolboxConfig;
use crate::error::ToolboxError;

/// Path of the config file (~/.toolbox/config.json)
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(CONFIG_RELATIVE_PATH)
}

/// Load configuration from ~/.toolbox/config.json
///
/// Returns `ToolboxConfig::default()` if the file is missing or unreadable.
pub fn load_config() -> ToolboxConfig {
    load_config_from(&config_path())
}

/// Load configuration from `path`, falling back to defaults on any failure.
#[instrument(name = "load_config", fields(path = %path.display()))]
pub fn load_config_from(path: &Path) -> ToolboxConfig {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return ToolboxConfig::default();
    }

    match try_load_config(path) {
        Ok(config) => {
            info!("Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            ToolboxConfig::default()
        }
    }
}

/// Strict variant of [`load_config_from`] that reports what went wrong.
pub fn try_load_config(path: &Path) -> Result<ToolboxConfig, ToolboxError> {
    let content = fs::read_to_string(path).map_err(|source| ToolboxError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ToolboxError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}
