/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::harness::TestRegistry;
use euclid::default::Point2D;
use mindmap::GraphIntent;

fn positions(harness: &TestRegistry) -> Vec<Point2D<f32>> {
    harness
        .app
        .graph()
        .preorder()
        .into_iter()
        .map(|key| harness.node(key).position)
        .collect()
}

#[test]
fn test_auto_layout_is_repeatable_and_undoable() {
    let mut harness = TestRegistry::new();
    harness.apply([GraphIntent::ReplaceFromOutline {
        text: "Trip\n  Flights\n  Hotels\n    Paris\n    Rome\n  Food".into(),
    }]);
    let laid_out = positions(&harness);
    assert_eq!(laid_out[0], Point2D::origin());

    let hotels = harness.find("Hotels");
    harness.apply([
        GraphIntent::SetNodePosition {
            key: hotels,
            position: Point2D::new(999.0, -999.0),
        },
        GraphIntent::FinishNodeDrag { key: hotels },
    ]);
    assert_ne!(positions(&harness), laid_out);

    harness.apply([GraphIntent::AutoLayout]);
    assert_eq!(positions(&harness), laid_out);

    harness.apply([GraphIntent::Undo]);
    assert_eq!(harness.node(hotels).position, Point2D::new(999.0, -999.0));
}

#[test]
fn test_children_fan_around_parent_at_level_radius() {
    let mut harness = TestRegistry::new();
    harness.apply([GraphIntent::ReplaceFromOutline {
        text: "Root\n  A\n  B\n  C".into(),
    }]);
    let root = harness.node(harness.root()).position;
    for text in ["A", "B", "C"] {
        let child = harness.node(harness.find(text)).position;
        assert!(((child - root).length() - 220.0).abs() < 1e-3);
        assert!(child.y > root.y);
    }
    let b = harness.node(harness.find("B")).position;
    assert!(b.x.abs() < 1e-3);
}
