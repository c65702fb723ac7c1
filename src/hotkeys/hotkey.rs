//! A single configured hotkey.

use crate::keys::{Chord, Key, ModifierSet};

use super::action::{HotkeyAction, HotkeyKind};

/// A user-defined trigger: chord → action.
///
/// `pressed` is transient state owned by the matcher; it is never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Hotkey {
    pub id: i64,
    pub chord: Chord,
    pub active: bool,
    pub action: HotkeyAction,
    pressed: bool,
}

impl Hotkey {
    pub fn new(id: i64, chord: Chord, active: bool, action: HotkeyAction) -> Self {
        Self {
            id,
            chord,
            active,
            action,
            pressed: false,
        }
    }

    /// An unbound, active hotkey with the default payload for `kind`.
    pub fn with_defaults(id: i64, kind: HotkeyKind) -> Self {
        Self::new(id, Chord::UNBOUND, true, HotkeyAction::default_for(kind))
    }

    pub fn kind(&self) -> HotkeyKind {
        self.action.kind()
    }

    pub fn key(&self) -> Key {
        self.chord.key
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.chord.modifiers
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Whether a key-down of `key` with exactly `modifiers` held arms this hotkey.
    pub fn matches_press(&self, key: Key, modifiers: ModifierSet) -> bool {
        self.active && !self.pressed && self.chord.key == key && self.chord.modifiers == modifiers
    }

    /// Whether a key-up of `key` releases this hotkey. Modifiers are not
    /// checked so releasing Ctrl before the letter still clears the press.
    pub fn matches_release(&self, key: Key) -> bool {
        self.pressed && self.chord.key == key
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Label for the delete selector: `[Ctrl + A] Send /age`.
    pub fn description(&self) -> String {
        format!("[{}] {}", self.chord.describe(), self.action.describe())
    }
}
