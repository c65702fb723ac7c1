//! Ordered hotkey registry with Vec storage.
//!
//! Insertion order is display order. Ids are handed out as `max seen + 1` and
//! never reused for the lifetime of the registry, even after deletion.

use tracing::{debug, info, instrument, warn};

use crate::settings::SettingsStore;

use super::action::HotkeyKind;
use super::codec::{self, CodecError, DEFAULT_NAMESPACE, MAX_HOTKEY_ID};
use super::hotkey::Hotkey;

/// Owns every configured hotkey of one namespace.
#[derive(Clone, Debug)]
pub struct HotkeyRegistry {
    namespace: String,
    hotkeys: Vec<Hotkey>,
    max_id: i64,
}

impl Default for HotkeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeyRegistry {
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            hotkeys: Vec::new(),
            max_id: 0,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Append every hotkey section of this namespace, in store order.
    ///
    /// Bad sections are skipped and returned; the rest still load. Ids of
    /// skipped sections with a readable id still count towards `next_id` so a
    /// new hotkey can never land on a leftover section.
    #[instrument(name = "load_hotkeys", skip_all, fields(namespace = %self.namespace))]
    pub fn load(&mut self, store: &dyn SettingsStore) -> Vec<CodecError> {
        let mut errors = Vec::new();
        let mut loaded = 0usize;

        for section in store.section_names() {
            if !codec::is_in_namespace(&self.namespace, &section) {
                continue;
            }

            if let Ok((id, _)) = codec::parse_section_name(&self.namespace, &section) {
                self.max_id = self.max_id.max(id);
            }

            match codec::decode(store, &self.namespace, &section) {
                Ok(hotkey) => {
                    if self.position_of(hotkey.id).is_some() {
                        warn!(
                            event_type = "hotkey_load",
                            section = %section,
                            id = hotkey.id,
                            "Duplicate hotkey id, skipping section"
                        );
                        continue;
                    }
                    debug!(section = %section, "Loaded hotkey");
                    self.hotkeys.push(hotkey);
                    loaded += 1;
                }
                Err(error) => {
                    warn!(
                        event_type = "hotkey_load",
                        section = %section,
                        error = %error,
                        "Skipping unreadable hotkey section"
                    );
                    errors.push(error);
                }
            }
        }

        info!(
            event_type = "hotkey_load",
            loaded = loaded,
            skipped = errors.len(),
            "Hotkeys loaded"
        );
        errors
    }

    /// Write every hotkey to `store`.
    ///
    /// A hotkey whose kind changed since it was last saved leaves a section
    /// under its old tag; those are removed so the id maps to one section.
    pub fn save(&self, store: &mut dyn SettingsStore) {
        for section in store.section_names() {
            let Ok((id, tag)) = codec::parse_section_name(&self.namespace, &section) else {
                continue;
            };
            let stale = self
                .hotkeys
                .iter()
                .any(|hotkey| hotkey.id == id && hotkey.kind().tag() != tag);
            if stale {
                debug!(section = %section, "Removing section left by a kind change");
                store.delete_section(&section);
            }
        }
        for hotkey in &self.hotkeys {
            codec::encode(store, &self.namespace, hotkey);
        }
    }

    /// Id the next created hotkey will receive. Never above `MAX_HOTKEY_ID`.
    pub fn next_id(&self) -> i64 {
        self.max_id.saturating_add(1).min(MAX_HOTKEY_ID)
    }

    /// Append a hotkey. A clashing or out-of-range id is replaced with a
    /// fresh one.
    ///
    /// Returns the index of the new hotkey.
    pub fn add(&mut self, mut hotkey: Hotkey) -> usize {
        if hotkey.id > MAX_HOTKEY_ID || self.position_of(hotkey.id).is_some() {
            let fresh = self.fresh_id();
            warn!(
                old_id = hotkey.id,
                new_id = fresh,
                "Hotkey id unavailable, reassigning"
            );
            hotkey.id = fresh;
        }
        self.max_id = self.max_id.max(hotkey.id);
        self.hotkeys.push(hotkey);
        self.hotkeys.len() - 1
    }

    /// `next_id`, unless the id space is used up. Then the lowest id not held
    /// by a loaded hotkey is handed out instead.
    fn fresh_id(&self) -> i64 {
        let next = self.next_id();
        if self.position_of(next).is_none() {
            return next;
        }
        (1..=MAX_HOTKEY_ID)
            .find(|id| self.position_of(*id).is_none())
            .unwrap_or(next)
    }

    /// Create an unbound hotkey of `kind` with a fresh id and append it.
    pub fn create(&mut self, kind: HotkeyKind) -> usize {
        let id = self.fresh_id();
        self.add(Hotkey::with_defaults(id, kind))
    }

    /// Remove the hotkey at `index` and every persisted section with its id.
    ///
    /// Out-of-range indices are a no-op.
    pub fn delete(&mut self, index: usize, store: &mut dyn SettingsStore) -> Option<Hotkey> {
        if index >= self.hotkeys.len() {
            debug!(index = index, len = self.hotkeys.len(), "Delete index out of range");
            return None;
        }

        let hotkey = self.hotkeys.remove(index);
        for section in store.section_names() {
            if matches!(
                codec::parse_section_name(&self.namespace, &section),
                Ok((id, _)) if id == hotkey.id
            ) {
                store.delete_section(&section);
            }
        }
        Some(hotkey)
    }

    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.hotkeys.iter().position(|h| h.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Hotkey> {
        self.hotkeys.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Hotkey> {
        self.hotkeys.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hotkey> {
        self.hotkeys.iter()
    }

    pub(crate) fn hotkeys_mut(&mut self) -> &mut [Hotkey] {
        &mut self.hotkeys
    }

    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }

    /// Delete-selector labels, one per hotkey in display order.
    pub fn descriptions(&self) -> Vec<String> {
        self.hotkeys.iter().map(Hotkey::description).collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
