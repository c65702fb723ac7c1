//! Key codes, modifier sets and chords.
//!
//! This module provides:
//! - `Key` - A raw virtual key code as delivered by the window procedure
//! - `ModifierSet` - Control/Shift/Alt flags, stored with the persisted bit values
//! - `Chord` - A (key, modifiers) pair identifying a trigger
//! - `ModifierSource` - Point-in-time sampling of held modifier keys
//!
//! Key codes follow the Windows virtual-key numbering because that is what the
//! overlay's input hook receives and what existing settings files contain.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw virtual key code. `Key::NONE` (0) means "unbound".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub u32);

impl Key {
    pub const NONE: Key = Key(0);
    pub const BACKSPACE: Key = Key(0x08);
    pub const TAB: Key = Key(0x09);
    pub const ENTER: Key = Key(0x0D);
    pub const SHIFT: Key = Key(0x10);
    pub const CONTROL: Key = Key(0x11);
    pub const MENU: Key = Key(0x12);
    pub const PAUSE: Key = Key(0x13);
    pub const ESCAPE: Key = Key(0x1B);
    pub const SPACE: Key = Key(0x20);
    pub const PAGE_UP: Key = Key(0x21);
    pub const PAGE_DOWN: Key = Key(0x22);
    pub const END: Key = Key(0x23);
    pub const HOME: Key = Key(0x24);
    pub const LEFT: Key = Key(0x25);
    pub const UP: Key = Key(0x26);
    pub const RIGHT: Key = Key(0x27);
    pub const DOWN: Key = Key(0x28);
    pub const INSERT: Key = Key(0x2D);
    pub const DELETE: Key = Key(0x2E);
    pub const F1: Key = Key(0x70);
    pub const MIDDLE_MOUSE: Key = Key(0x04);
    pub const X_BUTTON1: Key = Key(0x05);
    pub const X_BUTTON2: Key = Key(0x06);

    /// Letter key `A`..`Z` (case-insensitive).
    pub fn letter(c: char) -> Option<Key> {
        let upper = c.to_ascii_uppercase();
        upper
            .is_ascii_uppercase()
            .then(|| Key(upper as u32))
    }

    /// Digit key `0`..`9` on the main row.
    pub fn digit(d: u8) -> Option<Key> {
        (d <= 9).then(|| Key(0x30 + d as u32))
    }

    /// Function key `F1`..`F24`.
    pub fn function(n: u8) -> Option<Key> {
        (1..=24).contains(&n).then(|| Key(Key::F1.0 + (n as u32 - 1)))
    }

    pub fn is_none(self) -> bool {
        self == Key::NONE
    }

    /// Parse a key name such as `a`, `f5`, `space`, `pagedown` or a raw `0x41`.
    pub fn parse(name: &str) -> Option<Key> {
        let lower = name.trim().to_lowercase();
        if let Some(hex) = lower.strip_prefix("0x") {
            return u32::from_str_radix(hex, 16).ok().map(Key);
        }
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Key::letter(c);
            }
            if let Some(d) = c.to_digit(10) {
                return Key::digit(d as u8);
            }
        }
        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            return Key::function(n);
        }
        let key = match lower.as_str() {
            "backspace" | "back" => Key::BACKSPACE,
            "tab" => Key::TAB,
            "enter" | "return" => Key::ENTER,
            "pause" => Key::PAUSE,
            "escape" | "esc" => Key::ESCAPE,
            "space" => Key::SPACE,
            "pageup" | "pgup" => Key::PAGE_UP,
            "pagedown" | "pgdn" => Key::PAGE_DOWN,
            "end" => Key::END,
            "home" => Key::HOME,
            "left" => Key::LEFT,
            "up" => Key::UP,
            "right" => Key::RIGHT,
            "down" => Key::DOWN,
            "insert" | "ins" => Key::INSERT,
            "delete" | "del" => Key::DELETE,
            "mbutton" | "middlemouse" => Key::MIDDLE_MOUSE,
            "xbutton1" => Key::X_BUTTON1,
            "xbutton2" => Key::X_BUTTON2,
            _ => return None,
        };
        Some(key)
    }

    /// Human-readable key name, as shown on hotkey buttons.
    pub fn name(self) -> String {
        match self.0 {
            0 => "None".to_string(),
            0x04 => "Middle Mouse".to_string(),
            0x05 => "X Button 1".to_string(),
            0x06 => "X Button 2".to_string(),
            0x08 => "Backspace".to_string(),
            0x09 => "Tab".to_string(),
            0x0D => "Enter".to_string(),
            0x13 => "Pause".to_string(),
            0x1B => "Escape".to_string(),
            0x20 => "Space".to_string(),
            0x21 => "Page Up".to_string(),
            0x22 => "Page Down".to_string(),
            0x23 => "End".to_string(),
            0x24 => "Home".to_string(),
            0x25 => "Left".to_string(),
            0x26 => "Up".to_string(),
            0x27 => "Right".to_string(),
            0x28 => "Down".to_string(),
            0x2D => "Insert".to_string(),
            0x2E => "Delete".to_string(),
            c @ 0x30..=0x39 | c @ 0x41..=0x5A => char::from_u32(c)
                .map(|ch| ch.to_string())
                .unwrap_or_default(),
            c @ 0x60..=0x69 => format!("Numpad {}", c - 0x60),
            c @ 0x70..=0x87 => format!("F{}", c - 0x70 + 1),
            other => format!("0x{:X}", other),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

bitflags! {
    /// Modifier keys held while a key is pressed.
    ///
    /// The bit values are the ones existing settings files were written with,
    /// so they must not change.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierSet: u32 {
        const SHIFT = 0x0001_0000;
        const CONTROL = 0x0002_0000;
        const ALT = 0x0004_0000;
    }
}

impl ModifierSet {
    /// Sample the currently held modifiers from an input source.
    pub fn sample(source: &dyn ModifierSource) -> Self {
        let mut modifiers = ModifierSet::empty();
        if source.is_held(ModifierSet::CONTROL) {
            modifiers |= ModifierSet::CONTROL;
        }
        if source.is_held(ModifierSet::SHIFT) {
            modifiers |= ModifierSet::SHIFT;
        }
        if source.is_held(ModifierSet::ALT) {
            modifiers |= ModifierSet::ALT;
        }
        modifiers
    }

    /// Rebuild from a persisted value, ignoring unknown bits.
    pub fn from_persisted(value: i64) -> Self {
        u32::try_from(value)
            .map(ModifierSet::from_bits_truncate)
            .unwrap_or_default()
    }

    pub fn to_persisted(self) -> i64 {
        self.bits() as i64
    }
}

/// Point-in-time query of whether a modifier key is held.
///
/// The overlay backs this with `GetKeyState`; tests use a fixed `ModifierSet`.
pub trait ModifierSource {
    fn is_held(&self, modifier: ModifierSet) -> bool;
}

impl ModifierSource for ModifierSet {
    fn is_held(&self, modifier: ModifierSet) -> bool {
        self.contains(modifier)
    }
}

/// A key plus the exact set of modifiers that must be held with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Chord {
    pub key: Key,
    pub modifiers: ModifierSet,
}

impl Chord {
    pub const UNBOUND: Chord = Chord {
        key: Key::NONE,
        modifiers: ModifierSet::empty(),
    };

    pub fn new(key: Key, modifiers: ModifierSet) -> Self {
        Self { key, modifiers }
    }

    pub fn is_unbound(&self) -> bool {
        self.key.is_none()
    }

    /// `Ctrl + Shift + F1` style label; `None` when unbound.
    pub fn describe(&self) -> String {
        if self.is_unbound() {
            return "None".to_string();
        }
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(ModifierSet::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(ModifierSet::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.modifiers.contains(ModifierSet::ALT) {
            parts.push("Alt".to_string());
        }
        parts.push(self.key.name());
        parts.join(" + ")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_letters_digits_and_function_keys() {
        assert_eq!(Key::parse("a"), Some(Key(0x41)));
        assert_eq!(Key::parse("Z"), Some(Key(0x5A)));
        assert_eq!(Key::parse("7"), Some(Key(0x37)));
        assert_eq!(Key::parse("f1"), Some(Key::F1));
        assert_eq!(Key::parse("F12"), Some(Key(0x7B)));
        assert_eq!(Key::parse("f25"), None);
        assert_eq!(Key::parse("pgdn"), Some(Key::PAGE_DOWN));
        assert_eq!(Key::parse("0x5b"), Some(Key(0x5B)));
        assert_eq!(Key::parse("nonsense"), None);
    }

    #[test]
    fn key_names_are_readable() {
        assert_eq!(Key(0x41).name(), "A");
        assert_eq!(Key(0x31).name(), "1");
        assert_eq!(Key(0x75).name(), "F6");
        assert_eq!(Key(0x63).name(), "Numpad 3");
        assert_eq!(Key::NONE.name(), "None");
        assert_eq!(Key(0xBA).name(), "0xBA");
    }

    #[test]
    fn modifier_bits_match_persisted_values() {
        assert_eq!(ModifierSet::SHIFT.to_persisted(), 0x10000);
        assert_eq!(ModifierSet::CONTROL.to_persisted(), 0x20000);
        assert_eq!(ModifierSet::ALT.to_persisted(), 0x40000);
        assert_eq!(
            ModifierSet::from_persisted(0x30000),
            ModifierSet::CONTROL | ModifierSet::SHIFT
        );
        assert_eq!(ModifierSet::from_persisted(-1), ModifierSet::empty());
        assert_eq!(ModifierSet::from_persisted(0x41), ModifierSet::empty());
    }

    #[test]
    fn sample_reads_each_modifier() {
        let held = ModifierSet::CONTROL | ModifierSet::ALT;
        assert_eq!(ModifierSet::sample(&held), held);
        assert_eq!(ModifierSet::sample(&ModifierSet::empty()), ModifierSet::empty());
    }

    #[test]
    fn chord_description_orders_modifiers() {
        let chord = Chord::new(
            Key::F1,
            ModifierSet::ALT | ModifierSet::SHIFT | ModifierSet::CONTROL,
        );
        assert_eq!(chord.describe(), "Ctrl + Shift + Alt + F1");
        assert_eq!(Chord::new(Key(0x41), ModifierSet::empty()).describe(), "A");
        assert_eq!(Chord::UNBOUND.describe(), "None");
    }
}
