//! Hotkey variants and their payloads.

use std::fmt;

/// Skill id of Recall, the default for new drop-or-use-buff hotkeys.
pub const SKILL_RECALL: u32 = 925;

/// Type tag of a hotkey variant.
///
/// The tag is part of the persisted section name, so the strings returned by
/// [`HotkeyKind::tag`] must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HotkeyKind {
    SendChat,
    UseItem,
    DropOrUseBuff,
    ToggleFunction,
    Target,
    MoveToCoordinate,
    Dialog,
    PingBuild,
}

impl HotkeyKind {
    /// All kinds, in the order the create selector lists them.
    pub const ALL: [HotkeyKind; 8] = [
        HotkeyKind::SendChat,
        HotkeyKind::UseItem,
        HotkeyKind::DropOrUseBuff,
        HotkeyKind::ToggleFunction,
        HotkeyKind::Target,
        HotkeyKind::MoveToCoordinate,
        HotkeyKind::Dialog,
        HotkeyKind::PingBuild,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::SendChat => "sendchat",
            Self::UseItem => "useitem",
            Self::DropOrUseBuff => "dropusebuff",
            Self::ToggleFunction => "toggle",
            Self::Target => "target",
            Self::MoveToCoordinate => "move",
            Self::Dialog => "dialog",
            Self::PingBuild => "pingbuild",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Label shown in the create selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::SendChat => "Send Chat",
            Self::UseItem => "Use Item",
            Self::DropOrUseBuff => "Drop or Use Buff",
            Self::ToggleFunction => "Function Toggle",
            Self::Target => "Target",
            Self::MoveToCoordinate => "Move to coordinate",
            Self::Dialog => "Dialog",
            Self::PingBuild => "Ping Build",
        }
    }

    /// Parse a user-typed kind: a tag (`sendchat`) or a label (`send-chat`, `Send Chat`).
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|kind| {
            kind.tag() == normalized
                || kind
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
                    == normalized
        })
    }
}

impl fmt::Display for HotkeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Toolbox functions that a toggle hotkey flips on or off.
///
/// Persisted by numeric id; ids this build doesn't know are kept as `Other`
/// so re-saving a newer settings file doesn't lose them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleFunction {
    Clicker,
    Pcons,
    CoinDrop,
    Other(u32),
}

impl ToggleFunction {
    pub fn from_id(id: u32) -> Self {
        match id {
            1 => Self::Clicker,
            2 => Self::Pcons,
            3 => Self::CoinDrop,
            other => Self::Other(other),
        }
    }

    pub fn id(self) -> u32 {
        match self {
            Self::Clicker => 1,
            Self::Pcons => 2,
            Self::CoinDrop => 3,
            Self::Other(id) => id,
        }
    }

    pub fn name(self) -> String {
        match self {
            Self::Clicker => "Clicker".to_string(),
            Self::Pcons => "Pcons".to_string(),
            Self::CoinDrop => "Coin Drop".to_string(),
            Self::Other(id) => format!("Function {}", id),
        }
    }
}

/// Variant payload of a hotkey.
#[derive(Clone, Debug, PartialEq)]
pub enum HotkeyAction {
    SendChat {
        channel: char,
        message: String,
    },
    UseItem {
        item_id: u32,
        item_name: String,
    },
    DropOrUseBuff {
        skill_id: u32,
    },
    ToggleFunction {
        toggle: ToggleFunction,
    },
    Target {
        target_id: u32,
        target_name: String,
    },
    MoveToCoordinate {
        x: f32,
        y: f32,
        name: String,
    },
    Dialog {
        dialog_id: u32,
        dialog_name: String,
    },
    PingBuild {
        index: u32,
    },
}

impl HotkeyAction {
    /// Payload a freshly created hotkey of `kind` starts with.
    pub fn default_for(kind: HotkeyKind) -> Self {
        match kind {
            HotkeyKind::SendChat => Self::SendChat {
                channel: '/',
                message: String::new(),
            },
            HotkeyKind::UseItem => Self::UseItem {
                item_id: 0,
                item_name: String::new(),
            },
            HotkeyKind::DropOrUseBuff => Self::DropOrUseBuff {
                skill_id: SKILL_RECALL,
            },
            HotkeyKind::ToggleFunction => Self::ToggleFunction {
                toggle: ToggleFunction::Clicker,
            },
            HotkeyKind::Target => Self::Target {
                target_id: 0,
                target_name: String::new(),
            },
            HotkeyKind::MoveToCoordinate => Self::MoveToCoordinate {
                x: 0.0,
                y: 0.0,
                name: String::new(),
            },
            HotkeyKind::Dialog => Self::Dialog {
                dialog_id: 0,
                dialog_name: String::new(),
            },
            HotkeyKind::PingBuild => Self::PingBuild { index: 0 },
        }
    }

    pub fn kind(&self) -> HotkeyKind {
        match self {
            Self::SendChat { .. } => HotkeyKind::SendChat,
            Self::UseItem { .. } => HotkeyKind::UseItem,
            Self::DropOrUseBuff { .. } => HotkeyKind::DropOrUseBuff,
            Self::ToggleFunction { .. } => HotkeyKind::ToggleFunction,
            Self::Target { .. } => HotkeyKind::Target,
            Self::MoveToCoordinate { .. } => HotkeyKind::MoveToCoordinate,
            Self::Dialog { .. } => HotkeyKind::Dialog,
            Self::PingBuild { .. } => HotkeyKind::PingBuild,
        }
    }

    /// Short label of the payload, e.g. `Send /age` or `Use #6369 (Cupcake)`.
    pub fn describe(&self) -> String {
        match self {
            Self::SendChat { channel, message } => format!("Send {}{}", channel, message),
            Self::UseItem { item_id, item_name } => {
                with_name(format!("Use #{}", item_id), item_name)
            }
            Self::DropOrUseBuff { skill_id } => format!("Drop/Use skill #{}", skill_id),
            Self::ToggleFunction { toggle } => format!("Toggle {}", toggle.name()),
            Self::Target {
                target_id,
                target_name,
            } => with_name(format!("Target #{}", target_id), target_name),
            Self::MoveToCoordinate { x, y, name } => {
                with_name(format!("Move to ({:.0}, {:.0})", x, y), name)
            }
            Self::Dialog {
                dialog_id,
                dialog_name,
            } => with_name(format!("Dialog #{}", dialog_id), dialog_name),
            Self::PingBuild { index } => format!("Ping build #{}", index),
        }
    }
}

fn with_name(base: String, name: &str) -> String {
    if name.is_empty() {
        base
    } else {
        format!("{} ({})", base, name)
    }
}
