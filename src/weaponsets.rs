//! Extra weapon sets.
//!
//! A grid of user-defined main-hand/off-hand pairs, each bound to a chord.
//! Pressing a set's chord makes it the only active set and equips its items
//! on the game thread.

use tracing::{debug, info, instrument};

use crate::game::GameState;
use crate::hotkeys::{ActionQueue, GameAction, InputEvent};
use crate::keys::{Chord, Key, ModifierSet, ModifierSource};
use crate::settings::SettingsStore;

/// Section holding the widget-wide values
pub const SECTION: &str = "weaponsets";

const SET_PREFIX: &str = "weaponset-";

const KEY_SIZE: &str = "size";
const KEY_COLUMNS: &str = "columns";
const KEY_HOTKEY: &str = "hotkey";
const KEY_MODIFIER: &str = "modifier";
const KEY_MAIN_HAND: &str = "mainhand";
const KEY_MAIN_HAND_MODS: &str = "mainhand_mods";
const KEY_OFF_HAND: &str = "offhand";
const KEY_OFF_HAND_MODS: &str = "offhand_mods";

pub const MIN_SIZE: u32 = 1;
pub const MAX_SIZE: u32 = 400;
pub const MIN_COLUMNS: u32 = 1;
pub const MAX_COLUMNS: u32 = 16;

/// Horizontal nudge of the weapon icons inside a cell, relative to its size
pub const WEAPON_OFFSET_FACTOR: f32 = 0.075;

/// An inventory item picked by model id and modifier list.
///
/// A model id of 0 means no item was chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventoryItem {
    pub model_id: u32,
    pub modifiers: Vec<u32>,
}

impl InventoryItem {
    pub fn new(model_id: u32) -> Self {
        Self {
            model_id,
            modifiers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.model_id == 0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeaponSet {
    pub main_hand: InventoryItem,
    pub off_hand: InventoryItem,
    pub chord: Chord,
    /// Transient; never persisted.
    pub is_active: bool,
}

/// Screen cell of one weapon set in the widget grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSetCell {
    pub index: usize,
    pub column: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Horizontal inset of the weapon icons, `size * WEAPON_OFFSET_FACTOR`
    pub weapon_offset: f32,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct WeaponSetsWidget {
    size: u32,
    columns: u32,
    visible: bool,
    sets: Vec<WeaponSet>,
}

impl WeaponSetsWidget {
    pub fn new(size: u32, columns: u32) -> Self {
        Self {
            size: size.clamp(MIN_SIZE, MAX_SIZE),
            columns: columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
            visible: true,
            sets: Vec::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(MIN_SIZE, MAX_SIZE);
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn set_columns(&mut self, columns: u32) {
        self.columns = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn sets(&self) -> &[WeaponSet] {
        &self.sets
    }

    pub fn sets_mut(&mut self) -> &mut [WeaponSet] {
        &mut self.sets
    }

    pub fn push(&mut self, set: WeaponSet) -> usize {
        self.sets.push(set);
        self.sets.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<WeaponSet> {
        (index < self.sets.len()).then(|| self.sets.remove(index))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.sets.iter().position(|set| set.is_active)
    }

    /// Whether input should be looked at at all.
    pub fn is_armed(&self, game: &dyn GameState) -> bool {
        self.visible && !self.sets.is_empty() && game.is_input_ready()
    }

    /// Switch sets on a matching key-down. Returns whether the event was consumed.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        modifiers: &dyn ModifierSource,
        game: &dyn GameState,
        queue: &dyn ActionQueue,
    ) -> bool {
        if !self.is_armed(game) || !event.kind.is_down() || event.repeat {
            return false;
        }
        self.activate(event.key, ModifierSet::sample(modifiers), game, queue)
    }

    /// Make the first set bound to `key` + `modifiers` the active one.
    pub fn activate(
        &mut self,
        key: Key,
        modifiers: ModifierSet,
        game: &dyn GameState,
        queue: &dyn ActionQueue,
    ) -> bool {
        if key.is_none() {
            return false;
        }
        let pressed = Chord::new(key, modifiers);
        let Some(index) = self.sets.iter().position(|set| set.chord == pressed) else {
            return false;
        };

        for (i, set) in self.sets.iter_mut().enumerate() {
            set.is_active = i == index;
        }

        let set = &self.sets[index];
        let main_hand = resolve(&set.main_hand, game);
        let off_hand = resolve(&set.off_hand, game);
        info!(
            event_type = "weaponset_equip",
            index = index,
            chord = %pressed,
            main_hand = main_hand.is_some(),
            off_hand = off_hand.is_some(),
            "Switching weapon set"
        );
        queue.enqueue(GameAction::EquipWeaponSet {
            main_hand,
            off_hand,
        });
        true
    }

    /// Grid cells, row-major, `min(columns, len)` per row.
    pub fn layout(&self) -> Vec<WeaponSetCell> {
        let columns = self.effective_columns();
        let size = self.size as f32;
        self.sets
            .iter()
            .enumerate()
            .map(|(index, set)| {
                let column = index % columns;
                let row = index / columns;
                WeaponSetCell {
                    index,
                    column,
                    row,
                    x: column as f32 * size,
                    y: row as f32 * size,
                    size,
                    weapon_offset: size * WEAPON_OFFSET_FACTOR,
                    is_active: set.is_active,
                }
            })
            .collect()
    }

    /// Width and height of the grid window.
    pub fn window_size(&self) -> (f32, f32) {
        if self.sets.is_empty() {
            return (0.0, 0.0);
        }
        let columns = self.effective_columns();
        let rows = self.sets.len().div_ceil(columns);
        let size = self.size as f32;
        (columns as f32 * size, rows as f32 * size)
    }

    fn effective_columns(&self) -> usize {
        (self.columns as usize).min(self.sets.len()).max(1)
    }

    #[instrument(name = "load_weaponsets", skip_all)]
    pub fn load(&mut self, store: &dyn SettingsStore) {
        self.set_size(read_u32(store, SECTION, KEY_SIZE, self.size));
        self.set_columns(read_u32(store, SECTION, KEY_COLUMNS, self.columns));

        let mut indexed: Vec<(usize, String)> = store
            .section_names()
            .into_iter()
            .filter_map(|section| {
                let index = section.strip_prefix(SET_PREFIX)?.parse::<usize>().ok()?;
                Some((index, section))
            })
            .collect();
        indexed.sort_by_key(|(index, _)| *index);

        self.sets = indexed
            .iter()
            .map(|(_, section)| read_set(store, section))
            .collect();
        debug!(count = self.sets.len(), "Loaded weapon sets");
    }

    /// Persist the widget. Stale `weaponset-*` sections are removed first so
    /// deleted sets do not come back.
    pub fn save(&self, store: &mut dyn SettingsStore) {
        store.write_long(SECTION, KEY_SIZE, self.size as i64);
        store.write_long(SECTION, KEY_COLUMNS, self.columns as i64);

        for section in store.section_names() {
            if section.starts_with(SET_PREFIX) {
                store.delete_section(&section);
            }
        }
        for (index, set) in self.sets.iter().enumerate() {
            write_set(store, &format!("{}{}", SET_PREFIX, index), set);
        }
    }
}

fn resolve(item: &InventoryItem, game: &dyn GameState) -> Option<crate::game::ItemHandle> {
    if item.is_empty() {
        return None;
    }
    if item.modifiers.is_empty() {
        game.find_item_by_model(item.model_id)
    } else {
        game.find_item_matching(item.model_id, &item.modifiers)
    }
}

fn read_u32(store: &dyn SettingsStore, section: &str, key: &str, default: u32) -> u32 {
    u32::try_from(store.read_long(section, key, default as i64)).unwrap_or(default)
}

fn read_set(store: &dyn SettingsStore, section: &str) -> WeaponSet {
    let key = Key(read_u32(store, section, KEY_HOTKEY, 0));
    let modifiers = ModifierSet::from_persisted(store.read_long(section, KEY_MODIFIER, 0));
    WeaponSet {
        main_hand: read_item(store, section, KEY_MAIN_HAND, KEY_MAIN_HAND_MODS),
        off_hand: read_item(store, section, KEY_OFF_HAND, KEY_OFF_HAND_MODS),
        chord: Chord::new(key, modifiers),
        is_active: false,
    }
}

fn read_item(store: &dyn SettingsStore, section: &str, id_key: &str, mods_key: &str) -> InventoryItem {
    InventoryItem {
        model_id: read_u32(store, section, id_key, 0),
        modifiers: store
            .read_string(section, mods_key, "")
            .split(',')
            .filter_map(|m| m.trim().parse().ok())
            .collect(),
    }
}

fn write_set(store: &mut dyn SettingsStore, section: &str, set: &WeaponSet) {
    store.write_long(section, KEY_HOTKEY, set.chord.key.0 as i64);
    store.write_long(section, KEY_MODIFIER, set.chord.modifiers.to_persisted());
    write_item(store, section, KEY_MAIN_HAND, KEY_MAIN_HAND_MODS, &set.main_hand);
    write_item(store, section, KEY_OFF_HAND, KEY_OFF_HAND_MODS, &set.off_hand);
}

fn write_item(
    store: &mut dyn SettingsStore,
    section: &str,
    id_key: &str,
    mods_key: &str,
    item: &InventoryItem,
) {
    store.write_long(section, id_key, item.model_id as i64);
    let mods: Vec<String> = item.modifiers.iter().map(u32::to_string).collect();
    store.write_string(section, mods_key, &mods.join(","));
}
