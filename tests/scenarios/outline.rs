/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::harness::TestRegistry;
use mindmap::GraphIntent;
use mindmap::notify::ToastKind;
use mindmap::outline::DEFAULT_PALETTE;

const OUTLINE: &str = "Root\n  Child A\n  Child B\n    Grandchild";

#[test]
fn test_outline_replaces_map() {
    let mut harness = TestRegistry::new();
    harness.apply([GraphIntent::ReplaceFromOutline {
        text: OUTLINE.into(),
    }]);

    let graph = harness.app.graph();
    assert_eq!(graph.node_count(), 4);
    let grandchild = harness.find("Grandchild");
    assert_eq!(harness.node(grandchild).level, 2);
    assert_eq!(graph.parent(grandchild), Some(harness.find("Child B")));
    assert_eq!(harness.node(grandchild).color.as_deref(), Some(DEFAULT_PALETTE[2]));
    assert_eq!(harness.app.outline_text(), OUTLINE);
    assert_eq!(harness.toasts.last().map(|t| t.kind), Some(ToastKind::Success));
}

#[test]
fn test_withdrawn_nodes_leave_outline_but_stay_in_tree() {
    let mut harness = TestRegistry::new();
    harness.apply([GraphIntent::ReplaceFromOutline {
        text: OUTLINE.into(),
    }]);
    let child_b = harness.find("Child B");
    harness.apply([GraphIntent::ToggleWithdrawn { key: child_b }]);

    assert_eq!(harness.app.outline_text(), "Root\n  Child A");
    assert_eq!(harness.app.graph().node_count(), 4);

    harness.apply([GraphIntent::ToggleWithdrawn { key: child_b }]);
    assert_eq!(harness.app.outline_text(), OUTLINE);
}

#[test]
fn test_blank_outline_is_rejected() {
    let mut harness = TestRegistry::new();
    let before = harness.app.outline_text();
    harness.apply([GraphIntent::ReplaceFromOutline { text: "   \n".into() }]);
    assert_eq!(harness.app.outline_text(), before);
    assert_eq!(harness.toasts.last().map(|t| t.kind), Some(ToastKind::Warning));
}
