use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use toolbox_hotkeys::config::{self, ToolboxConfig};
use toolbox_hotkeys::error::ToolboxError;
use toolbox_hotkeys::game::{GameApi, GameState, ItemHandle};
use toolbox_hotkeys::hotkeys::{GameThread, HotkeyKind, HotkeyPanel, InputEvent, ToggleFunction};
use toolbox_hotkeys::keys::{Key, ModifierSet};
use toolbox_hotkeys::logging;
use toolbox_hotkeys::settings::JsonSettings;
use toolbox_hotkeys::weaponsets::WeaponSetsWidget;

#[derive(Parser)]
#[command(name = "toolbox-hotkeys")]
#[command(about = "Inspect and edit overlay hotkeys")]
struct Cli {
    /// Settings file (overrides settingsPath from the config)
    #[arg(long, short = 's')]
    settings: Option<PathBuf>,

    /// Path to JSON config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured hotkeys in display order
    List,

    /// Create a hotkey with default values
    Add {
        /// Hotkey type, e.g. sendchat, "Use Item", ping-build
        kind: String,
    },

    /// Delete the hotkey at a list position
    Delete {
        /// Zero-based position as shown by `list`
        index: usize,
    },

    /// Simulate a key press and print what would run on the game thread
    Press {
        /// Key name, e.g. F1, A, Space, 0x70
        key: String,
        #[arg(long)]
        ctrl: bool,
        #[arg(long)]
        shift: bool,
        #[arg(long)]
        alt: bool,
    },

    /// Show configured weapon sets and their grid layout
    Weaponsets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let _guard = logging::init(&config.logging());

    let result = run(cli, &config);
    if let Err(error) = &result {
        logging::log_error("cli", &format!("{:#}", error), None);
    }
    result
}

fn run(cli: Cli, config: &ToolboxConfig) -> Result<()> {
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| config.get_settings_path());
    let mut store = JsonSettings::load(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    let mut panel = HotkeyPanel::new(config.get_visible_rows());
    for error in panel.load(&store) {
        eprintln!("warning: {}", ToolboxError::from(error).user_message());
    }

    match cli.command {
        Commands::List => print_hotkeys(&panel),
        Commands::Add { kind } => {
            let kind = HotkeyKind::parse(&kind).ok_or(ToolboxError::UnknownHotkeyKind(kind))?;
            let index = panel.create(kind);
            panel.save(&mut store);
            save_store(&store, &settings_path)?;
            if let Some(hotkey) = panel.registry().get(index) {
                println!("Created {}: {}", index, hotkey.description());
            }
        }
        Commands::Delete { index } => {
            let len = panel.registry().len();
            let removed = panel
                .delete(index, &mut store)
                .ok_or(ToolboxError::IndexOutOfRange { index, len })?;
            save_store(&store, &settings_path)?;
            println!("Deleted {}", removed.description());
        }
        Commands::Press {
            key,
            ctrl,
            shift,
            alt,
        } => {
            let key = Key::parse(&key).ok_or(ToolboxError::UnknownKey(key))?;
            let mut modifiers = ModifierSet::empty();
            modifiers.set(ModifierSet::CONTROL, ctrl);
            modifiers.set(ModifierSet::SHIFT, shift);
            modifiers.set(ModifierSet::ALT, alt);
            let mut weapon_sets = load_weapon_sets(config, &store);
            simulate_press(&mut panel, &mut weapon_sets, key, modifiers);
        }
        Commands::Weaponsets => print_weapon_sets(&load_weapon_sets(config, &store)),
    }

    Ok(())
}

fn save_store(store: &JsonSettings, path: &Path) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("Failed to save settings to {}", path.display()))?;
    info!(path = %path.display(), "Settings saved");
    Ok(())
}

fn load_weapon_sets(config: &ToolboxConfig, store: &JsonSettings) -> WeaponSetsWidget {
    let defaults = config.get_weapon_sets();
    let mut widget = WeaponSetsWidget::new(defaults.size, defaults.columns);
    widget.set_visible(defaults.visible);
    widget.load(store);
    widget
}

fn print_hotkeys(panel: &HotkeyPanel) {
    if panel.registry().is_empty() {
        println!("No hotkeys configured");
        return;
    }
    for (index, hotkey) in panel.registry().iter().enumerate() {
        println!(
            "{:>3}  #{:<4} {:<8} {}",
            index,
            hotkey.id,
            if hotkey.active { "active" } else { "off" },
            hotkey.description()
        );
    }
}

fn print_weapon_sets(widget: &WeaponSetsWidget) {
    if widget.sets().is_empty() {
        println!("No weapon sets configured");
        return;
    }
    let (width, height) = widget.window_size();
    println!(
        "{} sets, {} columns, {}px cells ({}x{})",
        widget.sets().len(),
        widget.columns(),
        widget.size(),
        width,
        height
    );
    for cell in widget.layout() {
        let set = &widget.sets()[cell.index];
        println!(
            "{:>3}  [{}] main #{} off #{} at ({}, {})",
            cell.index, set.chord, set.main_hand.model_id, set.off_hand.model_id, cell.x, cell.y
        );
    }
}

fn simulate_press(
    panel: &mut HotkeyPanel,
    weapon_sets: &mut WeaponSetsWidget,
    key: Key,
    modifiers: ModifierSet,
) {
    logging::log_key_event(&key.name(), &format!("{:?}", modifiers), "press");

    let (sender, game_thread) = GameThread::channel();
    let mut game = DryRunGame;

    let down = InputEvent::key_down(key);
    let by_hotkey = panel.handle_input(down, &modifiers, &sender);
    let by_weapon_set = weapon_sets.handle_input(down, &modifiers, &game, &sender);
    panel.handle_input(InputEvent::key_up(key), &modifiers, &sender);

    if !by_hotkey && !by_weapon_set {
        println!("Nothing bound to that key");
        return;
    }
    let ran = game_thread.run_pending(&mut game);
    println!("{} action(s) would run", ran);
}

/// Game stand-in that reports what would happen. Every reference is
/// treated as live.
struct DryRunGame;

impl GameState for DryRunGame {
    fn find_item_by_model(&self, model_id: u32) -> Option<ItemHandle> {
        Some(ItemHandle(model_id))
    }
    fn item_exists(&self, _item: ItemHandle) -> bool {
        true
    }
    fn agent_exists(&self, _agent_id: u32) -> bool {
        true
    }
    fn has_buff(&self, _skill_id: u32) -> bool {
        false
    }
    fn skillbar_slot(&self, _skill_id: u32) -> Option<u32> {
        Some(0)
    }
    fn build_count(&self) -> usize {
        usize::MAX
    }
    fn is_input_ready(&self) -> bool {
        true
    }
}

impl GameApi for DryRunGame {
    fn send_chat(&mut self, channel: char, message: &str) {
        println!("chat: {}{}", channel, message);
    }
    fn use_item(&mut self, item: ItemHandle) {
        println!("use item model #{}", item.0);
    }
    fn equip_item(&mut self, item: ItemHandle) {
        println!("equip item model #{}", item.0);
    }
    fn drop_buff(&mut self, skill_id: u32) {
        println!("drop buff #{}", skill_id);
    }
    fn use_skill(&mut self, slot: u32) {
        println!("use skill in slot {}", slot + 1);
    }
    fn change_target(&mut self, agent_id: u32) {
        println!("target agent #{}", agent_id);
    }
    fn move_to(&mut self, x: f32, y: f32) {
        println!("move to ({}, {})", x, y);
    }
    fn send_dialog(&mut self, dialog_id: u32) {
        println!("dialog 0x{:X}", dialog_id);
    }
    fn ping_build(&mut self, index: u32) {
        println!("ping build #{}", index);
    }
    fn toggle_function(&mut self, toggle: ToggleFunction) {
        println!("toggle {}", toggle.name());
    }
}
