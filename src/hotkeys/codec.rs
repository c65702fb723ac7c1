//! Hotkey persistence in sectioned key-value settings.
//!
//! Each hotkey owns one section named `{namespace}-{id}:{type tag}`, e.g.
//! `hotkey-7:sendchat`. Every section carries `active`, `hotkey` (key code)
//! and `modifier`; the remaining keys depend on the variant. Missing keys fall
//! back to defaults, so hand-edited or older files still load.

use thiserror::Error;

use crate::keys::{Chord, Key, ModifierSet};
use crate::settings::SettingsStore;

use super::action::{HotkeyAction, HotkeyKind, ToggleFunction};
use super::hotkey::Hotkey;

/// Namespace of the main hotkey panel's sections.
pub const DEFAULT_NAMESPACE: &str = "hotkey";

pub const KEY_ACTIVE: &str = "active";
pub const KEY_HOTKEY: &str = "hotkey";
pub const KEY_MODIFIER: &str = "modifier";

const KEY_MSG: &str = "msg";
const KEY_CHANNEL: &str = "channel";
const KEY_ITEM_ID: &str = "ItemID";
const KEY_ITEM_NAME: &str = "ItemName";
const KEY_SKILL_ID: &str = "SkillID";
const KEY_TOGGLE_ID: &str = "ToggleID";
const KEY_TARGET_ID: &str = "TargetID";
const KEY_TARGET_NAME: &str = "TargetName";
const KEY_X: &str = "x";
const KEY_Y: &str = "y";
const KEY_NAME: &str = "name";
const KEY_DIALOG_ID: &str = "DialogID";
const KEY_DIALOG_NAME: &str = "DialogName";
const KEY_BUILD_INDEX: &str = "BuildIndex";

/// Errors decoding a single section. All are recoverable: the loader skips
/// the section and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("section '{section}' is not in namespace '{namespace}'")]
    NotInNamespace { section: String, namespace: String },
    #[error("section '{section}' has no type tag")]
    MissingTypeTag { section: String },
    #[error("section '{section}' has invalid id '{id}'")]
    InvalidId { section: String, id: String },
    #[error("section '{section}' has unknown hotkey type '{tag}'")]
    UnknownType { section: String, tag: String },
}

/// Largest id a section may carry. Anything higher leaves no id for the next hotkey.
pub const MAX_HOTKEY_ID: i64 = i64::MAX - 1;

/// Build the section name for a hotkey.
pub fn section_name(namespace: &str, id: i64, kind: HotkeyKind) -> String {
    format!("{}-{}:{}", namespace, id, kind.tag())
}

/// Split `{namespace}-{id}:{tag}` into its id and tag.
pub fn parse_section_name<'a>(
    namespace: &str,
    section: &'a str,
) -> Result<(i64, &'a str), CodecError> {
    let rest = section
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(|| CodecError::NotInNamespace {
            section: section.to_string(),
            namespace: namespace.to_string(),
        })?;

    let (id_text, tag) = rest.split_once(':').ok_or_else(|| CodecError::MissingTypeTag {
        section: section.to_string(),
    })?;

    let id = id_text
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id <= MAX_HOTKEY_ID)
        .ok_or_else(|| CodecError::InvalidId {
            section: section.to_string(),
            id: id_text.to_string(),
        })?;

    Ok((id, tag))
}

/// Whether a section belongs to `namespace` at all (regardless of validity).
pub fn is_in_namespace(namespace: &str, section: &str) -> bool {
    section
        .strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with('-'))
}

/// Read one hotkey section.
pub fn decode(
    store: &dyn SettingsStore,
    namespace: &str,
    section: &str,
) -> Result<Hotkey, CodecError> {
    let (id, tag) = parse_section_name(namespace, section)?;
    let kind = HotkeyKind::from_tag(tag).ok_or_else(|| CodecError::UnknownType {
        section: section.to_string(),
        tag: tag.to_string(),
    })?;

    let active = store.read_bool(section, KEY_ACTIVE, false);
    let key = Key(read_u32(store, section, KEY_HOTKEY));
    let modifiers = ModifierSet::from_persisted(store.read_long(section, KEY_MODIFIER, 0));

    let action = match kind {
        HotkeyKind::SendChat => HotkeyAction::SendChat {
            message: store.read_string(section, KEY_MSG, ""),
            channel: store
                .read_string(section, KEY_CHANNEL, "")
                .chars()
                .next()
                .unwrap_or('/'),
        },
        HotkeyKind::UseItem => HotkeyAction::UseItem {
            item_id: read_u32(store, section, KEY_ITEM_ID),
            item_name: store.read_string(section, KEY_ITEM_NAME, ""),
        },
        HotkeyKind::DropOrUseBuff => HotkeyAction::DropOrUseBuff {
            skill_id: read_u32(store, section, KEY_SKILL_ID),
        },
        HotkeyKind::ToggleFunction => HotkeyAction::ToggleFunction {
            toggle: ToggleFunction::from_id(read_u32(store, section, KEY_TOGGLE_ID)),
        },
        HotkeyKind::Target => HotkeyAction::Target {
            target_id: read_u32(store, section, KEY_TARGET_ID),
            target_name: store.read_string(section, KEY_TARGET_NAME, ""),
        },
        HotkeyKind::MoveToCoordinate => HotkeyAction::MoveToCoordinate {
            x: store.read_double(section, KEY_X, 0.0) as f32,
            y: store.read_double(section, KEY_Y, 0.0) as f32,
            name: store.read_string(section, KEY_NAME, ""),
        },
        HotkeyKind::Dialog => HotkeyAction::Dialog {
            dialog_id: read_u32(store, section, KEY_DIALOG_ID),
            dialog_name: store.read_string(section, KEY_DIALOG_NAME, ""),
        },
        HotkeyKind::PingBuild => HotkeyAction::PingBuild {
            index: read_u32(store, section, KEY_BUILD_INDEX),
        },
    };

    Ok(Hotkey::new(id, Chord::new(key, modifiers), active, action))
}

/// Write one hotkey into its section.
pub fn encode(store: &mut dyn SettingsStore, namespace: &str, hotkey: &Hotkey) {
    let section = section_name(namespace, hotkey.id, hotkey.kind());
    let section = section.as_str();

    store.write_bool(section, KEY_ACTIVE, hotkey.active);
    store.write_long(section, KEY_HOTKEY, hotkey.key().0 as i64);
    store.write_long(section, KEY_MODIFIER, hotkey.modifiers().to_persisted());

    match &hotkey.action {
        HotkeyAction::SendChat { channel, message } => {
            store.write_string(section, KEY_MSG, message);
            store.write_string(section, KEY_CHANNEL, &channel.to_string());
        }
        HotkeyAction::UseItem { item_id, item_name } => {
            store.write_long(section, KEY_ITEM_ID, *item_id as i64);
            store.write_string(section, KEY_ITEM_NAME, item_name);
        }
        HotkeyAction::DropOrUseBuff { skill_id } => {
            store.write_long(section, KEY_SKILL_ID, *skill_id as i64);
        }
        HotkeyAction::ToggleFunction { toggle } => {
            store.write_long(section, KEY_TOGGLE_ID, toggle.id() as i64);
        }
        HotkeyAction::Target {
            target_id,
            target_name,
        } => {
            store.write_long(section, KEY_TARGET_ID, *target_id as i64);
            store.write_string(section, KEY_TARGET_NAME, target_name);
        }
        HotkeyAction::MoveToCoordinate { x, y, name } => {
            store.write_double(section, KEY_X, *x as f64);
            store.write_double(section, KEY_Y, *y as f64);
            store.write_string(section, KEY_NAME, name);
        }
        HotkeyAction::Dialog {
            dialog_id,
            dialog_name,
        } => {
            store.write_long(section, KEY_DIALOG_ID, *dialog_id as i64);
            store.write_string(section, KEY_DIALOG_NAME, dialog_name);
        }
        HotkeyAction::PingBuild { index } => {
            store.write_long(section, KEY_BUILD_INDEX, *index as i64);
        }
    }
}

/// Out-of-range ids (negative, too large) read as 0.
fn read_u32(store: &dyn SettingsStore, section: &str, key: &str) -> u32 {
    u32::try_from(store.read_long(section, key, 0)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::JsonSettings;

    #[test]
    fn section_names_roundtrip() {
        let name = section_name("hotkey", 7, HotkeyKind::SendChat);
        assert_eq!(name, "hotkey-7:sendchat");
        assert_eq!(parse_section_name("hotkey", &name), Ok((7, "sendchat")));
    }

    #[test]
    fn parse_rejects_bad_sections() {
        assert!(matches!(
            parse_section_name("hotkey", "hotkey-x:sendchat"),
            Err(CodecError::InvalidId { id, .. }) if id == "x"
        ));
        assert!(matches!(
            parse_section_name("hotkey", "hotkey-3"),
            Err(CodecError::MissingTypeTag { .. })
        ));
        assert!(matches!(
            parse_section_name("hotkey", "weaponset-1:x"),
            Err(CodecError::NotInNamespace { .. })
        ));
        assert!(matches!(
            parse_section_name("hotkey", "hotkeys-1:sendchat"),
            Err(CodecError::NotInNamespace { .. })
        ));
    }

    #[test]
    fn namespace_membership_requires_separator() {
        assert!(is_in_namespace("hotkey", "hotkey-x:sendchat"));
        assert!(!is_in_namespace("hotkey", "hotkeyx-1:sendchat"));
        assert!(!is_in_namespace("hotkey", "hotkey"));
    }

    #[test]
    fn decode_unknown_type_is_an_error() {
        let mut store = JsonSettings::new();
        store.write_bool("hotkey-1:teleport", KEY_ACTIVE, true);
        assert!(matches!(
            decode(&store, "hotkey", "hotkey-1:teleport"),
            Err(CodecError::UnknownType { tag, .. }) if tag == "teleport"
        ));
    }

    #[test]
    fn decode_defaults_missing_fields() {
        let mut store = JsonSettings::new();
        store.write_long("hotkey-2:sendchat", KEY_HOTKEY, 0x41);
        let hotkey = decode(&store, "hotkey", "hotkey-2:sendchat").unwrap();
        assert_eq!(hotkey.id, 2);
        assert!(!hotkey.active);
        assert_eq!(hotkey.key(), Key(0x41));
        assert_eq!(hotkey.modifiers(), ModifierSet::empty());
        assert_eq!(
            hotkey.action,
            HotkeyAction::SendChat {
                channel: '/',
                message: String::new()
            }
        );
    }

    #[test]
    fn negative_ids_read_as_zero() {
        let mut store = JsonSettings::new();
        store.write_long("hotkey-3:useitem", KEY_ITEM_ID, -5);
        let hotkey = decode(&store, "hotkey", "hotkey-3:useitem").unwrap();
        assert_eq!(
            hotkey.action,
            HotkeyAction::UseItem {
                item_id: 0,
                item_name: String::new()
            }
        );
    }

    #[test]
    fn encode_writes_flat_section() {
        let mut store = JsonSettings::new();
        let hotkey = Hotkey::new(
            4,
            Chord::new(Key(0x41), ModifierSet::CONTROL),
            true,
            HotkeyAction::SendChat {
                channel: '#',
                message: "age".to_string(),
            },
        );
        encode(&mut store, "hotkey", &hotkey);

        let section = "hotkey-4:sendchat";
        assert_eq!(store.section_names(), vec![section]);
        assert!(store.read_bool(section, KEY_ACTIVE, false));
        assert_eq!(store.read_long(section, KEY_HOTKEY, 0), 0x41);
        assert_eq!(store.read_long(section, KEY_MODIFIER, 0), 0x20000);
        assert_eq!(store.read_string(section, "msg", ""), "age");
        assert_eq!(store.read_string(section, "channel", ""), "#");
    }
}
