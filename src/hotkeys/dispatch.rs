//! Marshaling hotkey actions onto the game thread.
//!
//! The input context never calls into the game directly. A matched hotkey is
//! turned into a [`GameAction`] (a plain value holding everything the action
//! needs) and pushed onto an [`ActionQueue`]. The game thread drains its
//! [`GameThread`] once per frame and runs the actions in FIFO order.
//!
//! References that went stale between enqueue and execution (an item that
//! left the inventory, a target that despawned) make the action a no-op.

use tracing::{debug, warn};

use crate::game::{GameApi, ItemHandle};

use super::action::{HotkeyAction, ToggleFunction};
use super::hotkey::Hotkey;

/// A game-thread task with its parameters resolved at arm time.
#[derive(Clone, Debug, PartialEq)]
pub enum GameAction {
    SendChat { channel: char, message: String },
    UseItem { model_id: u32 },
    DropOrUseBuff { skill_id: u32 },
    Toggle { toggle: ToggleFunction },
    Target { agent_id: u32 },
    MoveTo { x: f32, y: f32 },
    Dialog { dialog_id: u32 },
    PingBuild { index: u32 },
    EquipWeaponSet {
        main_hand: Option<ItemHandle>,
        off_hand: Option<ItemHandle>,
    },
}

impl GameAction {
    /// Snapshot a hotkey's payload.
    pub fn from_hotkey(hotkey: &Hotkey) -> Self {
        match &hotkey.action {
            HotkeyAction::SendChat { channel, message } => Self::SendChat {
                channel: *channel,
                message: message.clone(),
            },
            HotkeyAction::UseItem { item_id, .. } => Self::UseItem { model_id: *item_id },
            HotkeyAction::DropOrUseBuff { skill_id } => Self::DropOrUseBuff {
                skill_id: *skill_id,
            },
            HotkeyAction::ToggleFunction { toggle } => Self::Toggle { toggle: *toggle },
            HotkeyAction::Target { target_id, .. } => Self::Target {
                agent_id: *target_id,
            },
            HotkeyAction::MoveToCoordinate { x, y, .. } => Self::MoveTo { x: *x, y: *y },
            HotkeyAction::Dialog { dialog_id, .. } => Self::Dialog {
                dialog_id: *dialog_id,
            },
            HotkeyAction::PingBuild { index } => Self::PingBuild { index: *index },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SendChat { .. } => "send_chat",
            Self::UseItem { .. } => "use_item",
            Self::DropOrUseBuff { .. } => "drop_or_use_buff",
            Self::Toggle { .. } => "toggle",
            Self::Target { .. } => "target",
            Self::MoveTo { .. } => "move_to",
            Self::Dialog { .. } => "dialog",
            Self::PingBuild { .. } => "ping_build",
            Self::EquipWeaponSet { .. } => "equip_weapon_set",
        }
    }
}

/// One-way handoff to the game thread.
///
/// `enqueue` must never block and must be callable reentrantly from inside an
/// input handler.
pub trait ActionQueue {
    fn enqueue(&self, action: GameAction);
}

/// Snapshot `hotkey` and hand it to `queue`.
pub fn dispatch(hotkey: &Hotkey, queue: &dyn ActionQueue) {
    let action = GameAction::from_hotkey(hotkey);
    debug!(
        event_type = "hotkey_dispatch",
        hotkey_id = hotkey.id,
        action = action.name(),
        "Dispatching hotkey action"
    );
    queue.enqueue(action);
}

/// Producer side of the game-thread queue. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ActionSender {
    tx: async_channel::Sender<GameAction>,
}

impl ActionQueue for ActionSender {
    fn enqueue(&self, action: GameAction) {
        // Unbounded, so the only failure is a torn-down consumer
        if let Err(e) = self.tx.try_send(action) {
            warn!(
                action = e.into_inner().name(),
                "Game thread queue closed, dropping action"
            );
        }
    }
}

/// Consumer side of the game-thread queue.
#[derive(Debug)]
pub struct GameThread {
    rx: async_channel::Receiver<GameAction>,
}

impl GameThread {
    pub fn channel() -> (ActionSender, GameThread) {
        let (tx, rx) = async_channel::unbounded();
        (ActionSender { tx }, GameThread { rx })
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Run every queued action, oldest first. Called from the game's frame hook.
    ///
    /// Returns how many actions ran.
    pub fn run_pending(&self, game: &mut dyn GameApi) -> usize {
        let mut ran = 0;
        while let Ok(action) = self.rx.try_recv() {
            execute(action, game);
            ran += 1;
        }
        ran
    }

    /// Take queued actions without running them.
    pub fn drain(&self) -> Vec<GameAction> {
        std::iter::from_fn(|| self.rx.try_recv().ok()).collect()
    }
}

/// Perform one action against the game. Inapplicable actions are a no-op.
pub fn execute(action: GameAction, game: &mut dyn GameApi) {
    match action {
        GameAction::SendChat { channel, message } => {
            if message.is_empty() {
                debug!("Empty chat message, nothing to send");
                return;
            }
            game.send_chat(channel, &message);
        }
        GameAction::UseItem { model_id } => match game.find_item_by_model(model_id) {
            Some(item) => game.use_item(item),
            None => debug!(model_id = model_id, "Item not in inventory"),
        },
        GameAction::DropOrUseBuff { skill_id } => {
            if game.has_buff(skill_id) {
                game.drop_buff(skill_id);
            } else if let Some(slot) = game.skillbar_slot(skill_id) {
                game.use_skill(slot);
            } else {
                debug!(skill_id = skill_id, "Skill neither active nor on skillbar");
            }
        }
        GameAction::Toggle { toggle } => game.toggle_function(toggle),
        GameAction::Target { agent_id } => {
            if game.agent_exists(agent_id) {
                game.change_target(agent_id);
            } else {
                debug!(agent_id = agent_id, "Target no longer valid");
            }
        }
        GameAction::MoveTo { x, y } => game.move_to(x, y),
        GameAction::Dialog { dialog_id } => {
            if dialog_id == 0 {
                debug!("Dialog id unset");
                return;
            }
            game.send_dialog(dialog_id);
        }
        GameAction::PingBuild { index } => {
            if (index as usize) < game.build_count() {
                game.ping_build(index);
            } else {
                debug!(index = index, "Build index out of range");
            }
        }
        GameAction::EquipWeaponSet {
            main_hand,
            off_hand,
        } => {
            for item in [main_hand, off_hand].into_iter().flatten() {
                if game.item_exists(item) {
                    game.equip_item(item);
                } else {
                    debug!(item = item.0, "Weapon no longer in inventory");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::{Effect, RecordingGame};
    use crate::keys::Chord;

    #[test]
    fn queue_runs_in_fifo_order() {
        let (sender, thread) = GameThread::channel();
        sender.enqueue(GameAction::Dialog { dialog_id: 1 });
        sender.enqueue(GameAction::Dialog { dialog_id: 2 });
        sender.enqueue(GameAction::Dialog { dialog_id: 3 });
        assert_eq!(thread.pending(), 3);

        let mut game = RecordingGame::default();
        assert_eq!(thread.run_pending(&mut game), 3);
        assert_eq!(
            game.effects,
            vec![Effect::Dialog(1), Effect::Dialog(2), Effect::Dialog(3)]
        );
        assert_eq!(thread.pending(), 0);
    }

    #[test]
    fn enqueue_after_consumer_dropped_does_not_panic() {
        let (sender, thread) = GameThread::channel();
        drop(thread);
        sender.enqueue(GameAction::MoveTo { x: 1.0, y: 2.0 });
    }

    #[test]
    fn enqueue_from_another_thread() {
        let (sender, thread) = GameThread::channel();
        let handle = std::thread::spawn(move || {
            sender.enqueue(GameAction::PingBuild { index: 0 });
        });
        handle.join().unwrap();
        assert_eq!(thread.drain(), vec![GameAction::PingBuild { index: 0 }]);
    }

    #[test]
    fn dispatch_snapshots_payload() {
        let (sender, thread) = GameThread::channel();
        let mut hotkey = Hotkey::new(
            1,
            Chord::UNBOUND,
            true,
            HotkeyAction::SendChat {
                channel: '#',
                message: "first".to_string(),
            },
        );
        dispatch(&hotkey, &sender);
        hotkey.action = HotkeyAction::SendChat {
            channel: '#',
            message: "edited".to_string(),
        };

        assert_eq!(
            thread.drain(),
            vec![GameAction::SendChat {
                channel: '#',
                message: "first".to_string()
            }]
        );
    }

    #[test]
    fn stale_references_are_noops() {
        let mut game = RecordingGame::default();
        execute(GameAction::UseItem { model_id: 6369 }, &mut game);
        execute(GameAction::Target { agent_id: 9 }, &mut game);
        execute(GameAction::DropOrUseBuff { skill_id: 925 }, &mut game);
        execute(GameAction::PingBuild { index: 2 }, &mut game);
        execute(GameAction::Dialog { dialog_id: 0 }, &mut game);
        execute(
            GameAction::SendChat {
                channel: '/',
                message: String::new(),
            },
            &mut game,
        );
        execute(
            GameAction::EquipWeaponSet {
                main_hand: Some(ItemHandle(7)),
                off_hand: None,
            },
            &mut game,
        );
        assert!(game.effects.is_empty());
    }

    #[test]
    fn live_references_execute() {
        let mut game = RecordingGame::default().with_item(11, 6369);
        game.agents.push(9);
        game.skillbar = vec![0, 925];
        game.builds = 3;

        execute(GameAction::UseItem { model_id: 6369 }, &mut game);
        execute(GameAction::Target { agent_id: 9 }, &mut game);
        execute(GameAction::DropOrUseBuff { skill_id: 925 }, &mut game);
        execute(GameAction::PingBuild { index: 2 }, &mut game);

        assert_eq!(
            game.effects,
            vec![
                Effect::UseItem(ItemHandle(11)),
                Effect::Target(9),
                Effect::UseSkill(1),
                Effect::PingBuild(2),
            ]
        );
    }

    #[test]
    fn active_buff_is_dropped_instead_of_cast() {
        let mut game = RecordingGame::default();
        game.buffs.push(925);
        game.skillbar = vec![925];
        execute(GameAction::DropOrUseBuff { skill_id: 925 }, &mut game);
        assert_eq!(game.effects, vec![Effect::DropBuff(925)]);
    }
}
