//! Hotkey settings panel state.
//!
//! `HotkeyPanel` ties the registry to its paged list view and the
//! create/delete selectors. It is owned by whatever wires up the overlay and
//! is only touched from the input/UI thread.

use tracing::info;

use crate::keys::ModifierSource;
use crate::logging;
use crate::settings::SettingsStore;

use super::action::HotkeyKind;
use super::codec::CodecError;
use super::dispatch::ActionQueue;
use super::hotkey::Hotkey;
use super::matcher::{self, InputEvent};
use super::paging::{PagingState, RowPlacement};
use super::registry::HotkeyRegistry;

/// First entry of the create selector
pub const CREATE_PLACEHOLDER: &str = "Create Hotkey...";

/// First entry of the delete selector
pub const DELETE_PLACEHOLDER: &str = "Delete Hotkey...";

pub struct HotkeyPanel {
    registry: HotkeyRegistry,
    paging: PagingState,
    delete_options: Vec<String>,
}

impl HotkeyPanel {
    pub fn new(visible_rows: usize) -> Self {
        Self::with_registry(HotkeyRegistry::new(), visible_rows)
    }

    pub fn with_registry(registry: HotkeyRegistry, visible_rows: usize) -> Self {
        let mut panel = Self {
            registry,
            paging: PagingState::new(visible_rows),
            delete_options: Vec::new(),
        };
        panel.paging.scroll_to_top(panel.registry.len());
        panel.refresh_delete_options();
        panel
    }

    pub fn registry(&self) -> &HotkeyRegistry {
        &self.registry
    }

    pub fn paging(&self) -> &PagingState {
        &self.paging
    }

    /// Load hotkeys from `store` and show the top of the list.
    pub fn load(&mut self, store: &dyn SettingsStore) -> Vec<CodecError> {
        let errors = self.registry.load(store);
        self.paging.scroll_to_top(self.registry.len());
        self.refresh_delete_options();
        errors
    }

    pub fn save(&self, store: &mut dyn SettingsStore) {
        self.registry.save(store);
    }

    /// Append a hotkey and scroll it into view.
    pub fn add(&mut self, hotkey: Hotkey) -> usize {
        let index = self.registry.add(hotkey);
        self.after_add(index);
        index
    }

    /// Create a hotkey of `kind` with default payload and a fresh id.
    pub fn create(&mut self, kind: HotkeyKind) -> usize {
        let index = self.registry.create(kind);
        self.after_add(index);
        index
    }

    fn after_add(&mut self, index: usize) {
        self.paging.scroll_to_bottom(self.registry.len());
        self.refresh_delete_options();
        if let Some(hotkey) = self.registry.get(index) {
            logging::log_hotkey_event("create", hotkey.id, hotkey.kind().tag());
        }
    }

    /// Delete by position; out-of-range is a no-op.
    pub fn delete(&mut self, index: usize, store: &mut dyn SettingsStore) -> Option<Hotkey> {
        let removed = self.registry.delete(index, store)?;
        self.paging.reclamp(self.registry.len());
        self.refresh_delete_options();
        logging::log_hotkey_event("delete", removed.id, removed.kind().tag());
        Some(removed)
    }

    /// Edit a hotkey in place; labels are refreshed afterwards.
    pub fn edit<R>(&mut self, index: usize, f: impl FnOnce(&mut Hotkey) -> R) -> Option<R> {
        let result = self.registry.get_mut(index).map(f);
        self.refresh_delete_options();
        result
    }

    /// Entries of the create selector: placeholder, then one per kind.
    pub fn create_options(&self) -> Vec<&'static str> {
        std::iter::once(CREATE_PLACEHOLDER)
            .chain(HotkeyKind::ALL.iter().map(|kind| kind.label()))
            .collect()
    }

    /// Handle a pick in the create selector. Index 0 is the placeholder.
    pub fn select_create(&mut self, selected: usize) -> Option<usize> {
        let kind = *HotkeyKind::ALL.get(selected.checked_sub(1)?)?;
        Some(self.create(kind))
    }

    /// Entries of the delete selector: placeholder, then one per hotkey.
    pub fn delete_options(&self) -> &[String] {
        &self.delete_options
    }

    /// Handle a pick in the delete selector. Index 0 is the placeholder.
    pub fn select_delete(
        &mut self,
        selected: usize,
        store: &mut dyn SettingsStore,
    ) -> Option<Hotkey> {
        self.delete(selected.checked_sub(1)?, store)
    }

    fn refresh_delete_options(&mut self) {
        self.delete_options.clear();
        self.delete_options.push(DELETE_PLACEHOLDER.to_string());
        self.delete_options.extend(self.registry.descriptions());
    }

    pub fn on_scroll(&mut self, delta: i32) {
        self.paging.on_scroll(delta, self.registry.len());
    }

    pub fn set_first_shown(&mut self, first: i64) {
        self.paging.set_first_shown(first, self.registry.len());
    }

    /// Placements of the rows currently on screen.
    pub fn visible_rows(&self) -> &[RowPlacement] {
        self.paging.layout()
    }

    /// Visible hotkeys paired with their placement, top row first.
    pub fn visible_hotkeys(&self) -> impl Iterator<Item = (&RowPlacement, &Hotkey)> {
        self.paging
            .layout()
            .iter()
            .filter_map(|placement| Some((placement, self.registry.get(placement.index)?)))
    }

    /// Feed one key message through the hotkeys. Returns whether to swallow it.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        modifiers: &dyn ModifierSource,
        queue: &dyn ActionQueue,
    ) -> bool {
        let consumed =
            matcher::process_input(self.registry.hotkeys_mut(), event, modifiers, queue);
        if consumed {
            info!(
                event_type = "hotkey_trigger",
                key = %event.key,
                "Hotkey input consumed"
            );
        }
        consumed
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
