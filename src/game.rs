//! Narrow view of the game client used by the hotkey engine.
//!
//! `GameState` is the read-only side, safe to call from the input context when
//! resolving references at arm time. `GameApi` adds the mutating calls and is
//! only ever handed to actions running on the game thread.

/// Opaque handle to an inventory item, valid until the inventory changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemHandle(pub u32);

/// Read-only game queries.
pub trait GameState {
    /// First inventory item with the given model id.
    fn find_item_by_model(&self, model_id: u32) -> Option<ItemHandle>;
    /// First inventory item with the given model id and exact modifier list.
    fn find_item_matching(&self, model_id: u32, _modifiers: &[u32]) -> Option<ItemHandle> {
        self.find_item_by_model(model_id)
    }
    fn item_exists(&self, item: ItemHandle) -> bool;
    fn agent_exists(&self, agent_id: u32) -> bool;
    /// Whether the player currently has the effect granted by `skill_id`.
    fn has_buff(&self, skill_id: u32) -> bool;
    /// Skillbar slot (0-based) holding `skill_id`.
    fn skillbar_slot(&self, skill_id: u32) -> Option<u32>;
    fn build_count(&self) -> usize;
    /// False while chatting, loading, on the world map or not observing an agent.
    fn is_input_ready(&self) -> bool;
}

/// Mutating game calls. Only invoked from the game thread.
pub trait GameApi: GameState {
    fn send_chat(&mut self, channel: char, message: &str);
    fn use_item(&mut self, item: ItemHandle);
    fn equip_item(&mut self, item: ItemHandle);
    fn drop_buff(&mut self, skill_id: u32);
    fn use_skill(&mut self, slot: u32);
    fn change_target(&mut self, agent_id: u32);
    fn move_to(&mut self, x: f32, y: f32);
    fn send_dialog(&mut self, dialog_id: u32);
    fn ping_build(&mut self, index: u32);
    fn toggle_function(&mut self, toggle: crate::hotkeys::ToggleFunction);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory game used by the engine's tests.

    use super::*;
    use crate::hotkeys::ToggleFunction;

    /// One recorded call into `GameApi`.
    #[derive(Clone, Debug, PartialEq)]
    pub enum Effect {
        Chat(char, String),
        UseItem(ItemHandle),
        Equip(ItemHandle),
        DropBuff(u32),
        UseSkill(u32),
        Target(u32),
        Move(f32, f32),
        Dialog(u32),
        PingBuild(u32),
        Toggle(ToggleFunction),
    }

    #[derive(Clone, Debug)]
    pub struct FakeItem {
        pub handle: ItemHandle,
        pub model_id: u32,
        pub modifiers: Vec<u32>,
    }

    #[derive(Debug)]
    pub struct RecordingGame {
        pub items: Vec<FakeItem>,
        pub agents: Vec<u32>,
        pub buffs: Vec<u32>,
        pub skillbar: Vec<u32>,
        pub builds: usize,
        pub input_ready: bool,
        pub effects: Vec<Effect>,
    }

    impl Default for RecordingGame {
        fn default() -> Self {
            Self {
                items: Vec::new(),
                agents: Vec::new(),
                buffs: Vec::new(),
                skillbar: Vec::new(),
                builds: 0,
                input_ready: true,
                effects: Vec::new(),
            }
        }
    }

    impl RecordingGame {
        pub fn with_item(mut self, handle: u32, model_id: u32) -> Self {
            self.items.push(FakeItem {
                handle: ItemHandle(handle),
                model_id,
                modifiers: Vec::new(),
            });
            self
        }
    }

    impl GameState for RecordingGame {
        fn find_item_by_model(&self, model_id: u32) -> Option<ItemHandle> {
            self.items
                .iter()
                .find(|i| i.model_id == model_id)
                .map(|i| i.handle)
        }

        fn find_item_matching(&self, model_id: u32, modifiers: &[u32]) -> Option<ItemHandle> {
            self.items
                .iter()
                .find(|i| i.model_id == model_id && i.modifiers == modifiers)
                .map(|i| i.handle)
        }

        fn item_exists(&self, item: ItemHandle) -> bool {
            self.items.iter().any(|i| i.handle == item)
        }

        fn agent_exists(&self, agent_id: u32) -> bool {
            self.agents.contains(&agent_id)
        }

        fn has_buff(&self, skill_id: u32) -> bool {
            self.buffs.contains(&skill_id)
        }

        fn skillbar_slot(&self, skill_id: u32) -> Option<u32> {
            self.skillbar
                .iter()
                .position(|s| *s == skill_id)
                .map(|slot| slot as u32)
        }

        fn build_count(&self) -> usize {
            self.builds
        }

        fn is_input_ready(&self) -> bool {
            self.input_ready
        }
    }

    impl GameApi for RecordingGame {
        fn send_chat(&mut self, channel: char, message: &str) {
            self.effects.push(Effect::Chat(channel, message.to_string()));
        }
        fn use_item(&mut self, item: ItemHandle) {
            self.effects.push(Effect::UseItem(item));
        }
        fn equip_item(&mut self, item: ItemHandle) {
            self.effects.push(Effect::Equip(item));
        }
        fn drop_buff(&mut self, skill_id: u32) {
            self.effects.push(Effect::DropBuff(skill_id));
        }
        fn use_skill(&mut self, slot: u32) {
            self.effects.push(Effect::UseSkill(slot));
        }
        fn change_target(&mut self, agent_id: u32) {
            self.effects.push(Effect::Target(agent_id));
        }
        fn move_to(&mut self, x: f32, y: f32) {
            self.effects.push(Effect::Move(x, y));
        }
        fn send_dialog(&mut self, dialog_id: u32) {
            self.effects.push(Effect::Dialog(dialog_id));
        }
        fn ping_build(&mut self, index: u32) {
            self.effects.push(Effect::PingBuild(index));
        }
        fn toggle_function(&mut self, toggle: ToggleFunction) {
            self.effects.push(Effect::Toggle(toggle));
        }
    }
}
