/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Radial tree layout.
//!
//! Breadth-first from the root, which is pinned at `LayoutConfig::origin`.
//! Each child sits at `radius = level * spacing` from its parent, with
//! siblings fanned symmetrically around the parent's outward direction
//! (away from the grandparent; straight down for children of the root).
//! Stored positions are never read, so the result depends on tree shape only.

use euclid::default::Point2D;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::graph::{Graph, NodeKey};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub origin: Point2D<f32>,
    /// Radius per tree level.
    pub spacing: f32,
    /// Preferred angle between adjacent siblings, in radians.
    pub angle_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Point2D::origin(),
            spacing: 220.0,
            angle_step: 0.5,
        }
    }
}

/// Compute positions for every node reachable from the root, in BFS order.
///
/// Returns an empty list when the graph has no root.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Vec<(NodeKey, Point2D<f32>)> {
    let Some(root) = graph.root() else {
        return Vec::new();
    };

    let mut placed: HashMap<NodeKey, (Point2D<f32>, f32)> = HashMap::new();
    let mut order = vec![(root, config.origin)];
    placed.insert(root, (config.origin, FRAC_PI_2));

    let mut queue = VecDeque::from([(root, 0usize)]);
    while let Some((parent, depth)) = queue.pop_front() {
        let Some(&(parent_pos, outward)) = placed.get(&parent) else {
            continue;
        };
        let children = graph.children(parent);
        let count = children.len();
        let step = sibling_step(count, config.angle_step);
        let radius = (depth + 1) as f32 * config.spacing;

        for (index, child) in children.into_iter().enumerate() {
            if placed.contains_key(&child) {
                continue;
            }
            let offset = index as f32 - (count as f32 - 1.0) / 2.0;
            let angle = outward + offset * step;
            let position = Point2D::new(
                parent_pos.x + radius * angle.cos(),
                parent_pos.y + radius * angle.sin(),
            );
            placed.insert(child, (position, angle));
            order.push((child, position));
            queue.push_back((child, depth + 1));
        }
    }
    order
}

/// Lay out the graph in place. Returns false if there was nothing to do.
pub fn apply_layout(graph: &mut Graph, config: &LayoutConfig) -> bool {
    let positions = compute_layout(graph, config);
    if positions.is_empty() {
        return false;
    }
    for (key, position) in positions {
        graph.set_position(key, position);
    }
    true
}

// Keep a fan inside a half turn however many siblings there are.
fn sibling_step(count: usize, preferred: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    preferred.min(PI / (count - 1) as f32)
}
