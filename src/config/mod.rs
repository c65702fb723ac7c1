//! Configuration module - engine settings and user preferences
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.toolbox/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (ToolboxConfig, WeaponSetsConfig, etc.)
//! - `loader` - File system loading and parsing
//!
//! Hotkeys themselves are not configured here; they live in the settings
//! store so the overlay can edit them.

pub mod defaults;
mod loader;
mod types;

pub use loader::{config_path, load_config, load_config_from, try_load_config};
pub use types::{HotkeyPanelConfig, ToolboxConfig, WeaponSetsConfig};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
