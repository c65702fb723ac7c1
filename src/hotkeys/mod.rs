//! User-defined hotkeys.
//!
//! - `action`: hotkey variants and payloads
//! - `hotkey`: a single chord → action binding
//! - `codec`: settings-section encoding
//! - `registry`: ordered collection with id allocation
//! - `matcher`: key messages → triggered hotkeys
//! - `dispatch`: handoff of triggered actions to the game thread
//! - `paging`: visible window over the list
//! - `panel`: the settings panel tying it all together

mod action;
pub mod codec;
mod dispatch;
mod hotkey;
pub mod matcher;
mod paging;
mod panel;
mod registry;

pub use action::{HotkeyAction, HotkeyKind, ToggleFunction, SKILL_RECALL};
pub use codec::{CodecError, DEFAULT_NAMESPACE};
pub use dispatch::{dispatch, execute, ActionQueue, ActionSender, GameAction, GameThread};
pub use hotkey::Hotkey;
pub use matcher::{process_input, InputEvent, KeyEventKind};
pub use paging::{PagingState, RowPlacement, ROW_HEIGHT, ROW_PADDING};
pub use panel::{HotkeyPanel, CREATE_PLACEHOLDER, DELETE_PLACEHOLDER};
pub use registry::HotkeyRegistry;
