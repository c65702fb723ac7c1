//! Matching raw key messages against the registry.
//!
//! Each hotkey is a two-state machine:
//! - Idle → Pressed on a key-down whose key and *exact* modifier set match
//!   an active hotkey. The hotkey's action is dispatched in the same pass.
//! - Pressed → Idle on a key-up of the same key, whatever modifiers are held.
//!
//! Auto-repeat is suppressed by the pressed flag rather than the OS repeat bit,
//! so every input source behaves the same.

use tracing::debug;

use crate::keys::{Key, ModifierSet, ModifierSource};

use super::dispatch::{self, ActionQueue};
use super::hotkey::Hotkey;

const WM_KEYDOWN: u32 = 0x0100;
const WM_KEYUP: u32 = 0x0101;
const WM_SYSKEYDOWN: u32 = 0x0104;
const WM_SYSKEYUP: u32 = 0x0105;
const WM_MBUTTONDOWN: u32 = 0x0207;
const WM_MBUTTONUP: u32 = 0x0208;
const WM_MBUTTONDBLCLK: u32 = 0x0209;
const WM_XBUTTONDOWN: u32 = 0x020B;
const WM_XBUTTONUP: u32 = 0x020C;
const WM_XBUTTONDBLCLK: u32 = 0x020D;

const MK_MBUTTON: usize = 0x0010;
const MK_XBUTTON1: usize = 0x0020;
const MK_XBUTTON2: usize = 0x0040;

const XBUTTON1: usize = 0x0001;
const XBUTTON2: usize = 0x0002;

/// Kind of key message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
    /// Key-down while Alt is held or F10 is pressed.
    SysKeyDown,
    SysKeyUp,
}

impl KeyEventKind {
    pub fn is_down(self) -> bool {
        matches!(self, Self::KeyDown | Self::SysKeyDown)
    }
}

/// One key message from the window procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: KeyEventKind,
    pub key: Key,
    /// OS auto-repeat flag. Informational only for hotkeys.
    pub repeat: bool,
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        Self {
            kind: KeyEventKind::KeyDown,
            key,
            repeat: false,
        }
    }

    pub fn key_up(key: Key) -> Self {
        Self {
            kind: KeyEventKind::KeyUp,
            key,
            repeat: false,
        }
    }

    pub fn sys_key_down(key: Key) -> Self {
        Self {
            kind: KeyEventKind::SysKeyDown,
            key,
            repeat: false,
        }
    }

    pub fn sys_key_up(key: Key) -> Self {
        Self {
            kind: KeyEventKind::SysKeyUp,
            key,
            repeat: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Decode a key message, or a middle/extra mouse button message as a
    /// press of `Key::MIDDLE_MOUSE`, `Key::X_BUTTON1` or `Key::X_BUTTON2`.
    /// Other messages yield `None`.
    pub fn from_window_message(message: u32, wparam: usize, lparam: isize) -> Option<Self> {
        let kind = match message {
            WM_KEYDOWN => KeyEventKind::KeyDown,
            WM_KEYUP => KeyEventKind::KeyUp,
            WM_SYSKEYDOWN => KeyEventKind::SysKeyDown,
            WM_SYSKEYUP => KeyEventKind::SysKeyUp,
            _ => return Self::from_mouse_message(message, wparam),
        };
        Some(Self {
            kind,
            key: Key(wparam as u32),
            repeat: kind.is_down() && (lparam & (1 << 30)) != 0,
        })
    }

    fn from_mouse_message(message: u32, wparam: usize) -> Option<Self> {
        let held = wparam & 0xFFFF;
        let button = (wparam >> 16) & 0xFFFF;
        match message {
            // The last held button wins: X2 over X1 over middle.
            WM_MBUTTONDOWN | WM_XBUTTONDOWN | WM_XBUTTONDBLCLK => {
                let key = if held & MK_XBUTTON2 != 0 {
                    Key::X_BUTTON2
                } else if held & MK_XBUTTON1 != 0 {
                    Key::X_BUTTON1
                } else if held & MK_MBUTTON != 0 {
                    Key::MIDDLE_MOUSE
                } else {
                    return None;
                };
                Some(Self::key_down(key))
            }
            WM_MBUTTONDBLCLK => Some(Self::key_down(Key::MIDDLE_MOUSE)),
            WM_MBUTTONUP => Some(Self::key_up(Key::MIDDLE_MOUSE)),
            // Released button is in the high word; the low word lists those still held.
            WM_XBUTTONUP => match button {
                XBUTTON1 => Some(Self::key_up(Key::X_BUTTON1)),
                XBUTTON2 => Some(Self::key_up(Key::X_BUTTON2)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Feed one key message through `hotkeys`.
///
/// Returns whether the message triggered at least one hotkey, i.e. whether
/// the caller should swallow it. Key-ups are never swallowed.
pub fn process_input(
    hotkeys: &mut [Hotkey],
    event: InputEvent,
    modifiers: &dyn ModifierSource,
    queue: &dyn ActionQueue,
) -> bool {
    if event.kind.is_down() {
        key_down(hotkeys, event.key, ModifierSet::sample(modifiers), queue)
    } else {
        key_up(hotkeys, event.key);
        false
    }
}

/// Arm and dispatch every hotkey matching the chord. All matches fire.
pub fn key_down(
    hotkeys: &mut [Hotkey],
    key: Key,
    modifiers: ModifierSet,
    queue: &dyn ActionQueue,
) -> bool {
    let mut triggered = false;
    for hotkey in hotkeys.iter_mut() {
        if hotkey.matches_press(key, modifiers) {
            hotkey.set_pressed(true);
            debug!(
                event_type = "hotkey_trigger",
                hotkey_id = hotkey.id,
                key = %key,
                "Hotkey triggered"
            );
            dispatch::dispatch(hotkey, queue);
            triggered = true;
        }
    }
    triggered
}

/// Release every pressed hotkey bound to `key`.
pub fn key_up(hotkeys: &mut [Hotkey], key: Key) {
    for hotkey in hotkeys.iter_mut() {
        if hotkey.matches_release(key) {
            hotkey.set_pressed(false);
        }
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
