//! Toolbox hotkeys - the hotkey engine of a game overlay
//!
//! Users bind key chords to in-game actions. This library keeps the ordered
//! set of bindings, persists it in a sectioned settings store, matches raw key
//! messages against it, and hands triggered actions to the game thread.

pub mod config;
pub mod error;
pub mod game;
pub mod hotkeys;
pub mod keys;
pub mod logging;
pub mod settings;
pub mod weaponsets;
