//! Sectioned key-value settings storage.
//!
//! `SettingsStore` is the narrow capability the hotkey engine consumes:
//! enumerate section names, read typed values with a default, write values,
//! and delete a whole section. `JsonSettings` is the file-backed store used by
//! the overlay, persisted as `~/.toolbox/settings.json`.
//!
//! Format:
//! ```json
//! { "sections": [ { "name": "hotkey-3:sendchat", "values": { "active": true, "msg": "hi" } } ] }
//! ```
//! Section order is preserved, so hotkeys load back in the order they were written.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error that can occur when loading/saving a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value sections keyed by name.
///
/// Reads never fail: a missing section, missing key or a value of the wrong
/// shape yields the supplied default.
pub trait SettingsStore {
    fn section_names(&self) -> Vec<String>;
    fn read_bool(&self, section: &str, key: &str, default: bool) -> bool;
    fn read_long(&self, section: &str, key: &str, default: i64) -> i64;
    fn read_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn read_string(&self, section: &str, key: &str, default: &str) -> String;
    fn write_bool(&mut self, section: &str, key: &str, value: bool);
    fn write_long(&mut self, section: &str, key: &str, value: i64);
    fn write_double(&mut self, section: &str, key: &str, value: f64);
    fn write_string(&mut self, section: &str, key: &str, value: &str);
    fn delete_section(&mut self, section: &str);
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct StoredSection {
    name: String,
    #[serde(default)]
    values: BTreeMap<String, Value>,
}

/// In-memory ordered sections, optionally backed by a JSON file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSettings {
    #[serde(default)]
    sections: Vec<StoredSection>,
}

impl JsonSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON file.
    ///
    /// Returns empty settings if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.find(section).is_some()
    }

    fn find(&self, section: &str) -> Option<&StoredSection> {
        self.sections.iter().find(|s| s.name == section)
    }

    fn value(&self, section: &str, key: &str) -> Option<&Value> {
        self.find(section).and_then(|s| s.values.get(key))
    }

    fn write(&mut self, section: &str, key: &str, value: Value) {
        let index = match self.sections.iter().position(|s| s.name == section) {
            Some(index) => index,
            None => {
                self.sections.push(StoredSection {
                    name: section.to_string(),
                    values: BTreeMap::new(),
                });
                self.sections.len() - 1
            }
        };
        self.sections[index].values.insert(key.to_string(), value);
    }
}

impl SettingsStore for JsonSettings {
    fn section_names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name.clone()).collect()
    }

    fn read_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.value(section, key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().map(|v| v != 0).unwrap_or(default),
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => default,
            },
            _ => default,
        }
    }

    fn read_long(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.value(section, key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            Some(Value::Bool(b)) => *b as i64,
            _ => default,
        }
    }

    fn read_double(&self, section: &str, key: &str, default: f64) -> f64 {
        match self.value(section, key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    fn read_string(&self, section: &str, key: &str, default: &str) -> String {
        match self.value(section, key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    fn write_bool(&mut self, section: &str, key: &str, value: bool) {
        self.write(section, key, Value::Bool(value));
    }

    fn write_long(&mut self, section: &str, key: &str, value: i64) {
        self.write(section, key, Value::from(value));
    }

    fn write_double(&mut self, section: &str, key: &str, value: f64) {
        // NaN/inf have no JSON form; store them as null so reads fall back to the default
        self.write(section, key, Value::from(value));
    }

    fn write_string(&mut self, section: &str, key: &str, value: &str) {
        self.write(section, key, Value::String(value.to_string()));
    }

    fn delete_section(&mut self, section: &str) {
        self.sections.retain(|s| s.name != section);
    }
}

/// Get the default path for the settings file.
pub fn default_settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(crate::config::defaults::SETTINGS_RELATIVE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_nonexistent_returns_empty() {
        let result = JsonSettings::load(Path::new("/nonexistent/path/settings.json"));
        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn reads_fall_back_to_defaults() {
        let settings = JsonSettings::new();
        assert!(settings.read_bool("missing", "active", true));
        assert_eq!(settings.read_long("missing", "hotkey", 7), 7);
        assert_eq!(settings.read_double("missing", "x", 1.5), 1.5);
        assert_eq!(settings.read_string("missing", "msg", "dflt"), "dflt");
    }

    #[test]
    fn reads_tolerate_cross_representations() {
        let settings: JsonSettings = serde_json::from_str(
            r#"{"sections":[{"name":"s","values":{
                "flag":"true","num":"42","float":"2.5","text":12,"bad":[1,2]
            }}]}"#,
        )
        .unwrap();
        assert!(settings.read_bool("s", "flag", false));
        assert_eq!(settings.read_long("s", "num", 0), 42);
        assert_eq!(settings.read_double("s", "float", 0.0), 2.5);
        assert_eq!(settings.read_string("s", "text", ""), "12");
        assert_eq!(settings.read_long("s", "bad", -1), -1);
    }

    #[test]
    fn section_order_is_insertion_order() {
        let mut settings = JsonSettings::new();
        settings.write_long("b", "k", 1);
        settings.write_long("a", "k", 2);
        settings.write_long("b", "other", 3);
        assert_eq!(settings.section_names(), vec!["b", "a"]);
    }

    #[test]
    fn delete_section_removes_only_that_section() {
        let mut settings = JsonSettings::new();
        settings.write_bool("one", "active", true);
        settings.write_bool("two", "active", true);
        settings.delete_section("one");
        settings.delete_section("never-existed");
        assert_eq!(settings.section_names(), vec!["two"]);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = JsonSettings::new();
        settings.write_bool("hotkey-1:sendchat", "active", true);
        settings.write_string("hotkey-1:sendchat", "msg", "hello");
        settings.write_double("hotkey-2:move", "x", -120.5);
        settings.save(&path).unwrap();

        let loaded = JsonSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.read_string("hotkey-1:sendchat", "msg", ""), "hello");
        assert_eq!(loaded.read_double("hotkey-2:move", "x", 0.0), -120.5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonSettings::load(&path),
            Err(SettingsError::Json(_))
        ));
    }
}
