use super::*;
use crate::hotkeys::action::HotkeyAction;
use crate::hotkeys::codec;
use crate::hotkeys::dispatch::{GameAction, GameThread};
use crate::keys::{Chord, Key, ModifierSet};
use crate::settings::JsonSettings;
use std::collections::HashSet;

fn panel_with(count: usize, visible: usize) -> HotkeyPanel {
    let mut panel = HotkeyPanel::new(visible);
    for _ in 0..count {
        panel.create(HotkeyKind::SendChat);
    }
    panel
}

fn assert_clamped(panel: &HotkeyPanel) {
    let count = panel.registry().len();
    let visible = panel.paging().visible_count();
    assert!(panel.paging().first_shown() <= count.saturating_sub(visible));
}

#[test]
fn test_create_scrolls_to_new_hotkey() {
    let panel = panel_with(11, 8);
    assert_eq!(panel.paging().first_shown(), 3);
    let last = panel.visible_rows().last().unwrap();
    assert_eq!(last.index, 10);
}

#[test]
fn test_ids_unique_across_add_and_delete() {
    let mut store = JsonSettings::new();
    let mut panel = panel_with(5, 8);
    panel.delete(4, &mut store);
    panel.delete(0, &mut store);
    panel.create(HotkeyKind::Dialog);
    panel.create(HotkeyKind::Target);

    let ids: Vec<i64> = panel.registry().iter().map(|h| h.id).collect();
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    // 5 was handed out before it was deleted
    assert_eq!(ids, vec![2, 3, 4, 6, 7]);
}

#[test]
fn test_first_shown_stays_clamped_through_mutations() {
    let mut store = JsonSettings::new();
    let mut panel = panel_with(12, 4);
    assert_clamped(&panel);

    panel.set_first_shown(8);
    for _ in 0..10 {
        panel.delete(0, &mut store);
        assert_clamped(&panel);
    }
    assert_eq!(panel.paging().first_shown(), 0);

    for _ in 0..3 {
        panel.on_scroll(-120);
        assert_clamped(&panel);
    }
    panel.create(HotkeyKind::Dialog);
    panel.on_scroll(120);
    assert_clamped(&panel);
}

#[test]
fn test_delete_keeps_relative_order() {
    let mut store = JsonSettings::new();
    let mut panel = panel_with(4, 8);
    let before: Vec<i64> = panel.registry().iter().map(|h| h.id).collect();

    let removed = panel.delete(1, &mut store).unwrap();
    assert_eq!(removed.id, before[1]);

    let after: Vec<i64> = panel.registry().iter().map(|h| h.id).collect();
    assert_eq!(after, vec![before[0], before[2], before[3]]);
}

#[test]
fn test_delete_out_of_range_is_noop() {
    let mut store = JsonSettings::new();
    let mut panel = panel_with(3, 8);
    assert!(panel.delete(3, &mut store).is_none());
    assert!(panel.delete(usize::MAX, &mut store).is_none());
    assert_eq!(panel.registry().len(), 3);
    assert_eq!(panel.delete_options().len(), 4);
}

#[test]
fn test_selectors() {
    let mut store = JsonSettings::new();
    let mut panel = HotkeyPanel::new(8);

    let options = panel.create_options();
    assert_eq!(options[0], CREATE_PLACEHOLDER);
    assert_eq!(options[1], "Send Chat");
    assert_eq!(options.len(), HotkeyKind::ALL.len() + 1);

    // Placeholder picks do nothing
    assert!(panel.select_create(0).is_none());
    assert!(panel.select_create(99).is_none());
    assert!(panel.select_delete(0, &mut store).is_none());

    let index = panel.select_create(3).unwrap();
    assert_eq!(panel.registry().get(index).unwrap().kind(), HotkeyKind::DropOrUseBuff);
    assert_eq!(
        panel.delete_options(),
        &[
            DELETE_PLACEHOLDER.to_string(),
            "[None] Drop/Use skill #925".to_string()
        ]
    );

    let removed = panel.select_delete(1, &mut store).unwrap();
    assert_eq!(removed.kind(), HotkeyKind::DropOrUseBuff);
    assert_eq!(panel.delete_options(), &[DELETE_PLACEHOLDER.to_string()]);
}

#[test]
fn test_edit_refreshes_delete_labels() {
    let mut panel = panel_with(1, 8);
    panel.edit(0, |hotkey| {
        hotkey.chord = Chord::new(Key::letter('a').unwrap(), ModifierSet::CONTROL);
        hotkey.action = HotkeyAction::SendChat {
            channel: '/',
            message: "age".to_string(),
        };
    });
    assert_eq!(panel.delete_options()[1], "[Ctrl + A] Send /age");
    assert!(panel.edit(5, |_| ()).is_none());
}

#[test]
fn test_delete_removes_persisted_section() {
    let mut store = JsonSettings::new();
    let mut panel = panel_with(2, 8);
    panel.save(&mut store);
    assert!(store.has_section("hotkey-1:sendchat"));

    panel.delete(0, &mut store);
    assert!(!store.has_section("hotkey-1:sendchat"));
    assert!(store.has_section("hotkey-2:sendchat"));
}

#[test]
fn test_edit_changing_kind_survives_reload() {
    let mut store = JsonSettings::new();
    let mut panel = panel_with(1, 8);
    panel.save(&mut store);

    panel.edit(0, |hotkey| {
        hotkey.action = HotkeyAction::Dialog {
            dialog_id: 0x84,
            dialog_name: "Quest reward".to_string(),
        };
    });
    panel.save(&mut store);

    let mut reloaded = HotkeyPanel::new(8);
    assert!(reloaded.load(&store).is_empty());
    assert_eq!(reloaded.registry().len(), 1);
    assert_eq!(reloaded.registry().get(0).unwrap().kind(), HotkeyKind::Dialog);

    reloaded.delete(0, &mut store);
    let mut empty = HotkeyPanel::new(8);
    assert!(empty.load(&store).is_empty());
    assert!(empty.registry().is_empty());
}

#[test]
fn test_load_shows_top_of_list() {
    let mut store = JsonSettings::new();
    let source = panel_with(10, 4);
    source.save(&mut store);

    let mut panel = HotkeyPanel::new(4);
    let errors = panel.load(&store);
    assert!(errors.is_empty());
    assert_eq!(panel.registry().len(), 10);
    assert_eq!(panel.paging().first_shown(), 0);
    assert_eq!(panel.visible_rows().len(), 4);
    assert_eq!(panel.delete_options().len(), 11);
    assert_eq!(panel.registry().next_id(), 11);
}

#[test]
fn test_visible_hotkeys_follow_scroll() {
    let mut panel = panel_with(6, 2);
    panel.set_first_shown(1);
    let ids: Vec<i64> = panel.visible_hotkeys().map(|(_, h)| h.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn test_handle_input_dispatches_to_queue() {
    let mut panel = HotkeyPanel::new(8);
    let id = panel.registry().next_id();
    panel.add(Hotkey::new(
        id,
        Chord::new(Key::F1, ModifierSet::empty()),
        true,
        HotkeyAction::Dialog {
            dialog_id: 0x84,
            dialog_name: String::new(),
        },
    ));
    let (sender, thread) = GameThread::channel();
    let none = ModifierSet::empty();

    assert!(panel.handle_input(InputEvent::key_down(Key::F1), &none, &sender));
    assert!(!panel.handle_input(InputEvent::key_down(Key::F1), &none, &sender));
    assert!(!panel.handle_input(InputEvent::key_up(Key::F1), &none, &sender));
    assert_eq!(thread.drain(), vec![GameAction::Dialog { dialog_id: 0x84 }]);
}

#[test]
fn test_custom_namespace_sections() {
    let mut store = JsonSettings::new();
    let mut panel = HotkeyPanel::with_registry(HotkeyRegistry::with_namespace("hk"), 8);
    panel.create(HotkeyKind::PingBuild);
    panel.save(&mut store);
    assert!(store.has_section(&codec::section_name("hk", 1, HotkeyKind::PingBuild)));
}
