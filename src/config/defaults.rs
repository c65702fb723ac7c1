//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Config file, relative to the home directory
pub const CONFIG_RELATIVE_PATH: &str = ".toolbox/config.json";

/// Settings file, relative to the home directory
pub const SETTINGS_RELATIVE_PATH: &str = ".toolbox/settings.json";

/// Rows the hotkey panel shows at once
pub const DEFAULT_VISIBLE_ROWS: usize = 8;

/// Weapon set cell size in pixels
pub const DEFAULT_WEAPON_SET_SIZE: u32 = 100;

/// Weapon sets per grid row
pub const DEFAULT_WEAPON_SET_COLUMNS: u32 = 4;

/// Whether the weapon set grid starts visible
pub const DEFAULT_WEAPON_SETS_VISIBLE: bool = true;

/// Log filter used when neither `RUST_LOG` nor `logFilter` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// JSONL log file name inside the log directory
pub const LOG_FILE_NAME: &str = "toolbox-hotkeys.jsonl";
