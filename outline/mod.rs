/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Indented plain-text outline ⇄ tree.
//!
//! The first non-blank line is the root. Every later line nests by its
//! indentation: `leading_spaces / 2 + 1`, with a tab counted as two spaces.
//! A line hangs under the nearest preceding line with a strictly smaller
//! indentation, or under the root when there is none.

use euclid::default::Point2D;
use log::debug;

use crate::graph::{Graph, NodeKey};

pub const DEFAULT_PALETTE: [&str; 6] = [
    "#3B82F6", "#8B5CF6", "#14B8A6", "#F97316", "#EF4444", "#EC4899",
];

const INDENT: &str = "  ";

/// Palette entry for a tree level (cyclic).
pub fn palette_color<S: AsRef<str>>(palette: &[S], level: usize) -> Option<&str> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[level % palette.len()].as_ref())
}

/// Parse an outline with the default palette.
pub fn parse(text: &str) -> Graph {
    parse_with_palette(text, &DEFAULT_PALETTE)
}

/// Parse an outline into a fresh tree. Blank input yields an empty graph.
///
/// Every node lands at the canvas origin; callers lay the tree out
/// afterwards. Node colours come from `palette` by tree level.
pub fn parse_with_palette<S: AsRef<str>>(text: &str, palette: &[S]) -> Graph {
    let mut graph = Graph::new();
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let Some(first) = lines.next() else {
        return graph;
    };
    let Some(root) = graph.add_root(first.trim(), Point2D::origin()) else {
        return graph;
    };

    let mut stack: Vec<(NodeKey, usize)> = vec![(root, 0)];
    for line in lines {
        let indent = indentation(line);
        while stack.last().is_some_and(|(_, level)| *level >= indent) {
            stack.pop();
        }
        let parent = stack.last().map(|(key, _)| *key).unwrap_or(root);
        if let Some(key) = graph.add_child(parent, line.trim(), Point2D::origin()) {
            stack.push((key, indent));
        }
    }

    let colored: Vec<(NodeKey, Option<String>)> = graph
        .nodes()
        .map(|(key, node)| (key, palette_color(palette, node.level).map(str::to_string)))
        .collect();
    for (key, color) in colored {
        graph.set_color(key, color);
    }

    debug!("parsed outline into {} nodes", graph.node_count());
    graph
}

/// Regenerate the outline: pre-order, two spaces per level, withdrawn
/// nodes and everything below them left out.
pub fn serialize(graph: &Graph) -> String {
    let Some(root) = graph.root() else {
        return String::new();
    };
    let mut lines = Vec::with_capacity(graph.node_count());
    let mut stack = vec![(root, 0usize)];
    while let Some((key, depth)) = stack.pop() {
        let Some(node) = graph.get_node(key) else {
            continue;
        };
        if node.withdrawn {
            continue;
        }
        lines.push(format!("{}{}", INDENT.repeat(depth), node.text));
        for child in graph.children(key).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines.join("\n")
}

fn indentation(line: &str) -> usize {
    let width: usize = line
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum();
    width / 2 + 1
}
