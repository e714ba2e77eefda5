/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::harness::TestRegistry;
use mindmap::GraphIntent;
use mindmap::prefs::MindMapPrefs;

#[test]
fn test_add_two_children_then_delete_first() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    let first = harness.add_child(root);
    let second = harness.add_child(root);
    assert_eq!(harness.app.graph().children(root), vec![first, second]);

    harness.apply([GraphIntent::DeleteNode { key: first }]);

    assert_eq!(harness.app.graph().children(root), vec![second]);
    assert!(!harness.app.graph().contains(first));
    assert_eq!(harness.app.graph().node_count(), 2);
    assert_eq!(harness.app.graph().connection_count(), 1);
    assert!(harness.app.selected().is_none());
}

#[test]
fn test_undo_after_each_edit_restores_previous_outline() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    let mut outlines = vec![harness.app.outline_text()];

    let child = harness.add_child(root);
    outlines.push(harness.app.outline_text());
    harness.apply([GraphIntent::SetNodeText {
        key: child,
        text: "Budget".into(),
    }]);
    outlines.push(harness.app.outline_text());
    harness.apply([GraphIntent::ToggleWithdrawn { key: child }]);
    outlines.push(harness.app.outline_text());
    harness.apply([GraphIntent::SetNodeColor {
        key: child,
        color: Some("#14B8A6".into()),
    }]);
    outlines.push(harness.app.outline_text());

    assert_eq!(outlines[2], "Central Idea\n  Budget");
    assert_eq!(outlines[3], "Central Idea");

    for expected in outlines.iter().rev().skip(1) {
        harness.apply([GraphIntent::Undo]);
        assert_eq!(&harness.app.outline_text(), expected);
    }
    assert!(!harness.app.can_undo());

    // Undo at the oldest entry is a no-op.
    harness.apply([GraphIntent::Undo]);
    assert_eq!(harness.app.outline_text(), outlines[0]);

    for expected in outlines.iter().skip(1) {
        harness.apply([GraphIntent::Redo]);
        assert_eq!(&harness.app.outline_text(), expected);
    }
    assert!(!harness.app.can_redo());
    assert_eq!(
        harness.node(child).color.as_deref(),
        Some("#14B8A6")
    );
}

#[test]
fn test_new_edit_after_undo_discards_redo() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    harness.add_child(root);
    harness.apply([GraphIntent::Undo]);
    assert!(harness.app.can_redo());

    harness.apply([GraphIntent::AutoLayout]);
    assert!(!harness.app.can_redo());
}

#[test]
fn test_history_depth_is_bounded() {
    let prefs = MindMapPrefs {
        history_depth: 5,
        ..MindMapPrefs::default()
    };
    let mut harness = TestRegistry::with_prefs(prefs);
    let root = harness.root();
    for _ in 0..12 {
        harness.add_child(root);
    }
    assert_eq!(harness.app.history_len(), 5);

    let mut undos = 0;
    while harness.app.can_undo() {
        harness.apply([GraphIntent::Undo]);
        undos += 1;
    }
    assert_eq!(undos, 4);
    assert_eq!(harness.app.graph().children(root).len(), 8);
}

#[test]
fn test_undo_drops_selection_of_vanished_node() {
    let mut harness = TestRegistry::new();
    let root = harness.root();
    let child = harness.add_child(root);
    assert_eq!(harness.app.selected(), Some(child));

    harness.apply([GraphIntent::Undo]);
    assert_eq!(harness.app.selected(), Some(root));
    assert!(!harness.app.graph().contains(child));
}
