/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::harness::TestRegistry;
use euclid::default::Point2D;
use keyboard_types::{Code, Key, KeyState, KeyboardEvent, Location, Modifiers, NamedKey};
use mindmap::GraphIntent;
use mindmap_canvas::{PointerButton, PointerEvent, WheelEvent};

fn key_down(key: Key, modifiers: Modifiers) -> KeyboardEvent {
    KeyboardEvent {
        state: KeyState::Down,
        key,
        code: Code::Unidentified,
        location: Location::Standard,
        modifiers,
        repeat: false,
        is_composing: false,
    }
}

fn key_up(key: Key) -> KeyboardEvent {
    KeyboardEvent {
        state: KeyState::Up,
        ..key_down(key, Modifiers::empty())
    }
}

#[test]
fn test_zoom_over_node_keeps_node_fixed_on_screen() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    let cursor = Point2D::new(75.0, 30.0);
    let anchor_canvas = harness.app.camera().screen_to_canvas(cursor);
    assert_eq!(harness.app.node_at_screen(cursor), Some(root));

    for delta_y in [-120.0, -120.0, 120.0, -120.0] {
        harness.wheel(WheelEvent {
            position: cursor,
            delta_y,
        });
        let screen = harness.app.camera().canvas_to_screen(anchor_canvas);
        assert!((screen - cursor).length() < 1e-3);
        assert_eq!(harness.app.node_at_screen(cursor), Some(root));
    }
    assert!((harness.app.camera().zoom - 1.2).abs() < 1e-4);
}

#[test]
fn test_wheel_zoom_respects_bounds() {
    let mut harness = TestRegistry::new();
    for _ in 0..40 {
        harness.wheel(WheelEvent {
            position: Point2D::new(10.0, 10.0),
            delta_y: 120.0,
        });
    }
    assert_eq!(harness.app.camera().zoom, 0.5);
    assert!(!harness.app.can_undo());
}

#[test]
fn test_keyboard_builds_and_prunes_tree() {
    let mut harness = TestRegistry::new();
    let root = harness.root();

    harness.key(key_down(Key::Named(NamedKey::Tab), Modifiers::empty()));
    let child = harness.app.selected().unwrap();
    assert_eq!(harness.app.graph().parent(child), Some(root));

    harness.key(key_down(Key::Named(NamedKey::Tab), Modifiers::empty()));
    let grandchild = harness.app.selected().unwrap();
    assert_eq!(harness.app.graph().parent(grandchild), Some(child));

    harness.apply([GraphIntent::SelectNode { key: child }]);
    harness.key(key_down(Key::Named(NamedKey::Delete), Modifiers::empty()));
    assert_eq!(harness.app.graph().node_count(), 1);

    harness.key(key_down(Key::Character("z".into()), Modifiers::CONTROL));
    assert_eq!(harness.app.graph().node_count(), 3);
    harness.key(key_down(Key::Character("Z".into()), Modifiers::META | Modifiers::SHIFT));
    assert_eq!(harness.app.graph().node_count(), 1);
}

#[test]
fn test_root_cannot_be_deleted_from_keyboard() {
    let mut harness = TestRegistry::new();
    assert_eq!(harness.app.selected(), Some(harness.root()));
    harness.key(key_down(Key::Named(NamedKey::Backspace), Modifiers::empty()));
    assert_eq!(harness.app.graph().node_count(), 1);
    assert!(!harness.app.can_undo());
}

#[test]
fn test_focused_text_input_suppresses_shortcuts() {
    let mut harness = TestRegistry::new();
    harness.controller.set_text_input_focused(true);
    let intents = harness.key(key_down(Key::Named(NamedKey::Tab), Modifiers::empty()));
    assert!(intents.is_empty());
    assert_eq!(harness.app.graph().node_count(), 1);

    harness.controller.set_text_input_focused(false);
    harness.key(key_down(Key::Named(NamedKey::Tab), Modifiers::empty()));
    assert_eq!(harness.app.graph().node_count(), 2);
}

#[test]
fn test_space_drag_pans_canvas() {
    let mut harness = TestRegistry::new();
    harness.key(key_down(Key::Character(" ".into()), Modifiers::empty()));
    harness.pointer(PointerEvent::down(600.0, 600.0, PointerButton::Primary));
    harness.pointer(PointerEvent::moved(640.0, 630.0));
    harness.pointer(PointerEvent::up(640.0, 630.0, PointerButton::Primary));
    harness.key(key_up(Key::Character(" ".into())));

    assert_eq!(harness.app.camera().pan.x, 40.0);
    assert_eq!(harness.app.camera().pan.y, 30.0);
    assert!(!harness.controller.is_space_held());
    // A plain left click on the canvas now clears the selection again.
    harness.pointer(PointerEvent::down(600.0, 600.0, PointerButton::Primary));
    let intents = harness.pointer(PointerEvent::up(600.0, 600.0, PointerButton::Primary));
    assert_eq!(intents, vec![GraphIntent::ClearSelection]);
}

#[test]
fn test_double_click_edit_then_enter_renames_node() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    harness.pointer(PointerEvent::double_click(20.0, 20.0));
    assert!(harness.controller.is_editing());

    harness
        .controller
        .text_edit_mut()
        .unwrap()
        .set_text("Thesis");
    harness.key(key_down(Key::Named(NamedKey::Enter), Modifiers::empty()));

    assert_eq!(harness.node(root).text, "Thesis");
    assert!(harness.app.can_undo());
}

#[test]
fn test_dragged_child_is_undone_as_one_step() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    let child = harness.add_child(root);
    let start = harness.node(child).position;
    let grab = harness.app.camera().canvas_to_screen(start) + euclid::default::Vector2D::new(5.0, 5.0);

    harness.pointer(PointerEvent::down(grab.x, grab.y, PointerButton::Primary));
    for step in 1..=5 {
        harness.pointer(PointerEvent::moved(grab.x + step as f32 * 10.0, grab.y));
    }
    harness.pointer(PointerEvent::up(grab.x + 50.0, grab.y, PointerButton::Primary));
    assert_eq!(harness.node(child).position, start + euclid::default::Vector2D::new(50.0, 0.0));

    harness.apply([GraphIntent::Undo]);
    assert_eq!(harness.node(child).position, start);
    assert!(harness.app.graph().contains(child));
}
