use thiserror::Error;
use tracing::{error, warn};

use crate::hotkeys::CodecError;
use crate::settings::SettingsError;

/// Error severity for overlay display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
    Critical, // requires user action
}

/// Domain-specific errors for the toolbox hotkey engine
#[derive(Error, Debug)]
pub enum ToolboxError {
    #[error("Settings store error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Hotkey section error: {0}")]
    Codec(#[from] CodecError),

    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown hotkey kind: {0}")]
    UnknownHotkeyKind(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Index {index} out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ToolboxError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Settings(SettingsError::Io(_)) => ErrorSeverity::Critical,
            Self::Settings(_) => ErrorSeverity::Error,
            Self::Codec(_) => ErrorSeverity::Warning,
            Self::ConfigRead { .. } => ErrorSeverity::Warning,
            Self::ConfigParse { .. } => ErrorSeverity::Warning,
            Self::UnknownHotkeyKind(_) => ErrorSeverity::Info,
            Self::UnknownKey(_) => ErrorSeverity::Info,
            Self::IndexOutOfRange { .. } => ErrorSeverity::Info,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Settings(e) => format!("Could not access settings: {}", e),
            Self::Codec(e) => format!("Ignoring hotkey entry: {}", e),
            Self::ConfigRead { path, .. } => format!("Could not read config from {}", path),
            Self::ConfigParse { path, .. } => format!("Config at {} is malformed", path),
            Self::UnknownHotkeyKind(kind) => format!("No hotkey type called '{}'", kind),
            Self::UnknownKey(key) => format!("No key called '{}'", key),
            Self::IndexOutOfRange { index, len } => {
                format!("There is no entry {} (only {} configured)", index, len)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolboxError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use toolbox_hotkeys::error::ResultExt;
///
/// // Keep going with an empty store if the file is unreadable
/// let store = JsonSettings::load(&path).log_err().unwrap_or_default();
///
/// // Log as warning for expected failures
/// let config = read_config().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
