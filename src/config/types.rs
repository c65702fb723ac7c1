//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;
use crate::logging::LoggingConfig;

// ============================================
// HOTKEY PANEL
// ============================================

/// Layout of the hotkey settings panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeyPanelConfig {
    /// Rows shown at once (default: 8)
    #[serde(default = "default_visible_rows")]
    pub visible_rows: usize,
}

fn default_visible_rows() -> usize {
    DEFAULT_VISIBLE_ROWS
}

impl Default for HotkeyPanelConfig {
    fn default() -> Self {
        HotkeyPanelConfig {
            visible_rows: DEFAULT_VISIBLE_ROWS,
        }
    }
}

// ============================================
// WEAPON SETS
// ============================================

/// Initial layout of the weapon set grid. Values saved in the settings
/// store take precedence once the widget has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponSetsConfig {
    /// Cell size in pixels (default: 100)
    #[serde(default = "default_weapon_set_size")]
    pub size: u32,
    /// Cells per row (default: 4)
    #[serde(default = "default_weapon_set_columns")]
    pub columns: u32,
    /// Whether the grid is shown (default: true)
    #[serde(default = "default_weapon_sets_visible")]
    pub visible: bool,
}

fn default_weapon_set_size() -> u32 {
    DEFAULT_WEAPON_SET_SIZE
}
fn default_weapon_set_columns() -> u32 {
    DEFAULT_WEAPON_SET_COLUMNS
}
fn default_weapon_sets_visible() -> bool {
    DEFAULT_WEAPON_SETS_VISIBLE
}

impl Default for WeaponSetsConfig {
    fn default() -> Self {
        WeaponSetsConfig {
            size: DEFAULT_WEAPON_SET_SIZE,
            columns: DEFAULT_WEAPON_SET_COLUMNS,
            visible: DEFAULT_WEAPON_SETS_VISIBLE,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolboxConfig {
    /// Settings file holding hotkeys and weapon sets (default: ~/.toolbox/settings.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey_panel: Option<HotkeyPanelConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_sets: Option<WeaponSetsConfig>,
    /// `EnvFilter` directive for logging, e.g. `"debug,toolbox_hotkeys::hotkeys=trace"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Directory for the JSONL log (default: ~/.toolbox/logs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl ToolboxConfig {
    /// Returns the settings file path, or the default under the home directory
    pub fn get_settings_path(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(crate::settings::default_settings_path)
    }

    pub fn get_hotkey_panel(&self) -> HotkeyPanelConfig {
        self.hotkey_panel.clone().unwrap_or_default()
    }

    /// Returns the visible row count, never less than one
    pub fn get_visible_rows(&self) -> usize {
        self.get_hotkey_panel().visible_rows.max(1)
    }

    pub fn get_weapon_sets(&self) -> WeaponSetsConfig {
        self.weapon_sets.clone().unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            filter: self.log_filter.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}
