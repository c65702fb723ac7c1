//! Structured JSONL logging plus human-readable stderr output.
//!
//! Dual output:
//! - **JSONL to file** (`~/.toolbox/logs/toolbox-hotkeys.jsonl`) for tooling
//! - **Compact to stderr** for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use toolbox_hotkeys::logging;
//!
//! // Keep the guard alive for the duration of the program
//! let _guard = logging::init(&logging::LoggingConfig::default());
//!
//! tracing::info!(event_type = "hotkey_load", loaded = 3, "Hotkeys loaded");
//! ```
//!
//! # JSONL Output Format
//!
//! ```json
//! {"timestamp":"2026-01-05T10:30:45.123Z","level":"INFO","target":"toolbox_hotkeys::hotkeys::registry","fields":{"event_type":"hotkey_load","loaded":3,"message":"Hotkeys loaded"}}
//! ```

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use parking_lot::{const_mutex, Mutex};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::defaults::{DEFAULT_LOG_FILTER, LOG_FILE_NAME};

// =============================================================================
// In-memory log buffer for the overlay's log view
// =============================================================================

static LOG_BUFFER: Mutex<LogBuffer> = const_mutex(LogBuffer::new(MAX_LOG_LINES));
const MAX_LOG_LINES: usize = 50;

/// Ring of the most recent formatted log lines.
#[derive(Debug)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub const fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Oldest first
    pub fn recent(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// Newest first
    pub fn last(&self, n: usize) -> Vec<String> {
        self.lines.iter().rev().take(n).cloned().collect()
    }
}

/// Logging options, usually taken from `ToolboxConfig`.
#[derive(Clone, Debug, Default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive. `RUST_LOG` wins when set.
    pub filter: Option<String>,
    /// Directory for the JSONL file. Defaults to `~/.toolbox/logs`.
    pub log_dir: Option<PathBuf>,
}

/// Guard that must be kept alive for the duration of the program.
/// Dropping it flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// If the log file cannot be opened, only stderr logging is installed.
pub fn init(config: &LoggingConfig) -> LoggingGuard {
    let log_dir = config.log_dir.clone().unwrap_or_else(get_log_dir);
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    };

    let (file_writer, file_guard) = match file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
    });

    let json_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_span_events(FmtSpan::NONE)
    });

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    // A second init (tests, embedding hosts) keeps the first subscriber
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %log_path.display(),
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (~/.toolbox/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".toolbox").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("toolbox-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

// =============================================================================
// Category logging, mirrored into the buffer
// =============================================================================

/// Log a message under a category and keep it for the overlay's log view.
pub fn log(category: &str, message: &str) {
    add_to_buffer(category, message);
    tracing::info!(category = category, "{}", message);
}

/// Debug-only logging, compiled out in release builds.
#[cfg(debug_assertions)]
pub fn log_debug(category: &str, message: &str) {
    add_to_buffer(category, message);
    tracing::debug!(category = category, "{}", message);
}

#[cfg(not(debug_assertions))]
pub fn log_debug(_category: &str, _message: &str) {}

fn add_to_buffer(category: &str, message: &str) {
    LOG_BUFFER.lock().push(format!("[{}] {}", category, message));
}

/// Buffered log lines, oldest first
pub fn get_recent_logs() -> Vec<String> {
    LOG_BUFFER.lock().recent()
}

/// The last `n` buffered lines, newest first
pub fn get_last_logs(n: usize) -> Vec<String> {
    LOG_BUFFER.lock().last(n)
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a hotkey lifecycle event (create, delete, trigger)
pub fn log_hotkey_event(action: &str, hotkey_id: i64, kind: &str) {
    add_to_buffer("HOTKEY", &format!("{} #{} ({})", action, hotkey_id, kind));

    tracing::info!(
        event_type = "hotkey_event",
        action = action,
        hotkey_id = hotkey_id,
        kind = kind,
        "Hotkey {} #{}", action, hotkey_id
    );
}

/// Log a keyboard event with structured fields
pub fn log_key_event(key: &str, modifiers: &str, action: &str) {
    add_to_buffer("KEY", &format!("{} {} ({})", action, key, modifiers));

    tracing::debug!(
        event_type = "key_event",
        key = key,
        modifiers = modifiers,
        action = action,
        "Key {} {}", action, key
    );
}

/// Log an error with structured fields and context
pub fn log_error(category: &str, error: &str, context: Option<&str>) {
    let msg = match context {
        Some(ctx) => format!("{}: {} (context: {})", category, error, ctx),
        None => format!("{}: {}", category, error),
    };
    add_to_buffer("ERROR", &msg);

    tracing::error!(
        event_type = "error",
        category = category,
        error_message = error,
        context = context,
        "{}", msg
    );
}
