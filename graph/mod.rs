/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Node store for a single mind map.
//!
//! Core structures:
//! - `Graph`: tree container backed by petgraph::StableGraph
//! - `Node`: one mind-map entry with text, position, and display attributes
//! - `Connection`: read-only parent→child edge view
//!
//! The parent link of a node *is* its incoming edge, so the connection set
//! can never drift from the parent links. Every structural edit keeps the
//! tree invariants: one root, no dangling parents, no cycles.

use euclid::default::{Point2D, Vector2D};
use log::debug;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use uuid::Uuid;

use crate::persistence::types::{
    DocumentError, MindMapDocument, PersistedConnection, PersistedNode,
};

/// Stable node handle (petgraph NodeIndex — survives other deletions)
pub type NodeKey = NodeIndex;

/// A mind-map entry
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Opaque node identity. Fresh nodes get a v4 UUID string; loaded
    /// documents keep whatever ids they were written with.
    pub id: String,

    /// User-editable label
    pub text: String,

    /// Distance from the root (root is 0)
    pub level: usize,

    /// Box origin in canvas space
    pub position: Point2D<f32>,

    pub color: Option<String>,

    pub text_color: Option<String>,

    /// Soft-hidden: kept in the tree but dimmed and left out of outline text.
    pub withdrawn: bool,

    /// Embedded image payload, usually a base64 data URL.
    pub image: Option<String>,
}

impl Node {
    fn new(id: String, text: String, level: usize, position: Point2D<f32>) -> Self {
        Self {
            id,
            text,
            level,
            position,
            color: None,
            text_color: None,
            withdrawn: false,
            image: None,
        }
    }
}

/// Read-only view of a parent→child edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeKey,
    pub target: NodeKey,
}

/// Placement of a freshly added child relative to its parent.
///
/// The child lands `base_dx` to the right and `base_dy` above or below the
/// parent, with both offsets nudged by the same random amount in
/// `[-jitter, jitter)` so repeated adds do not stack exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildPlacement {
    pub base_dx: f32,
    pub base_dy: f32,
    pub jitter: f32,
}

impl ChildPlacement {
    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2D<f32> {
        let nudge = if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..self.jitter).floor()
        } else {
            0.0
        };
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        Vector2D::new(self.base_dx + nudge, sign * (self.base_dy + nudge))
    }
}

impl Default for ChildPlacement {
    fn default() -> Self {
        Self {
            base_dx: 180.0,
            base_dy: 80.0,
            jitter: 30.0,
        }
    }
}

/// Tree container backed by petgraph::StableGraph
#[derive(Clone, Debug)]
pub struct Graph {
    /// Nodes plus parent→child edges
    pub(crate) inner: StableGraph<Node, (), Directed>,

    /// Node id to key mapping.
    id_to_node: HashMap<String, NodeKey>,

    root: Option<NodeKey>,
}

impl Graph {
    /// Create a new empty graph (no root yet)
    pub fn new() -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            root: None,
        }
    }

    /// Create a graph holding a single root node.
    pub fn with_root(text: impl Into<String>, position: Point2D<f32>) -> Self {
        let mut graph = Self::new();
        let _ = graph.add_root(text, position);
        graph
    }

    /// Add the root node. Refused if a root already exists.
    pub fn add_root(&mut self, text: impl Into<String>, position: Point2D<f32>) -> Option<NodeKey> {
        self.add_root_with_id(Uuid::new_v4().to_string(), text, position)
    }

    /// Add the root node with a pre-existing id.
    pub fn add_root_with_id(
        &mut self,
        id: impl Into<String>,
        text: impl Into<String>,
        position: Point2D<f32>,
    ) -> Option<NodeKey> {
        let id = id.into();
        if self.root.is_some() || self.id_to_node.contains_key(&id) {
            return None;
        }
        let key = self.inner.add_node(Node::new(id.clone(), text.into(), 0, position));
        self.id_to_node.insert(id, key);
        self.root = Some(key);
        Some(key)
    }

    /// Add a child under `parent`. Returns `None` if the parent does not exist.
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        text: impl Into<String>,
        position: Point2D<f32>,
    ) -> Option<NodeKey> {
        self.add_child_with_id(Uuid::new_v4().to_string(), parent, text, position)
    }

    /// Add a child with a pre-existing id.
    pub fn add_child_with_id(
        &mut self,
        id: impl Into<String>,
        parent: NodeKey,
        text: impl Into<String>,
        position: Point2D<f32>,
    ) -> Option<NodeKey> {
        let Some(parent_node) = self.inner.node_weight(parent) else {
            debug!("add_child refused: parent {parent:?} does not exist");
            return None;
        };
        let id = id.into();
        if self.id_to_node.contains_key(&id) {
            return None;
        }
        let level = parent_node.level + 1;
        let key = self.inner.add_node(Node::new(id.clone(), text.into(), level, position));
        self.inner.add_edge(parent, key, ());
        self.id_to_node.insert(id, key);
        Some(key)
    }

    /// Add a child placed near its parent using `placement`.
    pub fn add_child_near_parent<R: Rng + ?Sized>(
        &mut self,
        parent: NodeKey,
        text: impl Into<String>,
        placement: &ChildPlacement,
        rng: &mut R,
    ) -> Option<NodeKey> {
        let parent_position = self.inner.node_weight(parent)?.position;
        let position = parent_position + placement.offset(rng);
        self.add_child(parent, text, position)
    }

    /// Remove a node and every descendant in one step.
    ///
    /// The root cannot be removed; removing it (or a missing key) returns an
    /// empty list and leaves the graph untouched. Returns removed keys.
    pub fn remove_subtree(&mut self, key: NodeKey) -> Vec<NodeKey> {
        if !self.inner.contains_node(key) {
            return Vec::new();
        }
        if self.root == Some(key) {
            debug!("remove_subtree refused: {key:?} is the root");
            return Vec::new();
        }
        let doomed = self.subtree(key);
        for doomed_key in &doomed {
            if let Some(node) = self.inner.remove_node(*doomed_key) {
                self.id_to_node.remove(&node.id);
            }
        }
        doomed
    }

    /// Replace a node's label. Returns false if the node is missing or the
    /// text is unchanged.
    pub fn set_text(&mut self, key: NodeKey, text: impl Into<String>) -> bool {
        let text = text.into();
        match self.inner.node_weight_mut(key) {
            Some(node) if node.text != text => {
                node.text = text;
                true
            },
            _ => false,
        }
    }

    pub fn set_position(&mut self, key: NodeKey, position: Point2D<f32>) -> bool {
        match self.inner.node_weight_mut(key) {
            Some(node) if node.position != position => {
                node.position = position;
                true
            },
            _ => false,
        }
    }

    pub fn set_color(&mut self, key: NodeKey, color: Option<String>) -> bool {
        match self.inner.node_weight_mut(key) {
            Some(node) if node.color != color => {
                node.color = color;
                true
            },
            _ => false,
        }
    }

    pub fn set_text_color(&mut self, key: NodeKey, color: Option<String>) -> bool {
        match self.inner.node_weight_mut(key) {
            Some(node) if node.text_color != color => {
                node.text_color = color;
                true
            },
            _ => false,
        }
    }

    /// Flip the soft-hide flag. Returns the new value.
    pub fn toggle_withdrawn(&mut self, key: NodeKey) -> Option<bool> {
        let node = self.inner.node_weight_mut(key)?;
        node.withdrawn = !node.withdrawn;
        Some(node.withdrawn)
    }

    pub fn set_image(&mut self, key: NodeKey, image: Option<String>) -> bool {
        match self.inner.node_weight_mut(key) {
            Some(node) if node.image != image => {
                node.image = image;
                true
            },
            _ => false,
        }
    }

    /// Get a node by key
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.inner.node_weight(key)
    }

    /// Get a node by its id.
    pub fn get_node_by_id(&self, id: &str) -> Option<(NodeKey, &Node)> {
        let key = *self.id_to_node.get(id)?;
        Some((key, self.inner.node_weight(key)?))
    }

    pub fn get_node_key_by_id(&self, id: &str) -> Option<NodeKey> {
        self.id_to_node.get(id).copied()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.inner.contains_node(key)
    }

    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn is_root(&self, key: NodeKey) -> bool {
        self.root == Some(key)
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.inner
            .neighbors_directed(key, Direction::Incoming)
            .next()
    }

    pub fn parent_id(&self, key: NodeKey) -> Option<&str> {
        self.parent(key)
            .and_then(|parent| self.get_node(parent))
            .map(|node| node.id.as_str())
    }

    /// Children of `key` in insertion order.
    pub fn children(&self, key: NodeKey) -> Vec<NodeKey> {
        // petgraph links new edges at the head of the adjacency list.
        let mut children: Vec<NodeKey> = self
            .inner
            .edges_directed(key, Direction::Outgoing)
            .map(|edge| edge.target())
            .collect();
        children.reverse();
        children
    }

    /// `key` followed by all of its descendants, breadth first.
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        if !self.inner.contains_node(key) {
            return Vec::new();
        }
        let mut seen = HashSet::from([key]);
        let mut order = vec![key];
        let mut queue = VecDeque::from([key]);
        while let Some(current) = queue.pop_front() {
            for child in self.children(current) {
                if seen.insert(child) {
                    order.push(child);
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// Depth-first pre-order from the root, siblings in insertion order.
    pub fn preorder(&self) -> Vec<NodeKey> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let mut order = Vec::with_capacity(self.node_count());
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).into_iter().rev());
        }
        order
    }

    /// Iterate over all nodes as (key, node) pairs
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.inner
            .node_indices()
            .map(move |idx| (idx, &self.inner[idx]))
    }

    /// Iterate over all parent→child connections
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.inner.edge_references().map(|e| Connection {
            source: e.source(),
            target: e.target(),
        })
    }

    /// Count of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Count of connections in the graph
    pub fn connection_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Serialize the tree to a persistable document, nodes in pre-order.
    pub fn to_document(&self, id: &str, name: &str) -> MindMapDocument {
        let order = self.preorder();
        let nodes = order
            .iter()
            .filter_map(|key| {
                let node = self.get_node(*key)?;
                Some(PersistedNode {
                    id: node.id.clone(),
                    text: node.text.clone(),
                    parent_id: self.parent_id(*key).map(str::to_string),
                    level: node.level,
                    x: node.position.x,
                    y: node.position.y,
                    color: node.color.clone(),
                    text_color: node.text_color.clone(),
                    withdrawn: node.withdrawn,
                    image: node.image.clone(),
                })
            })
            .collect();
        let connections = order
            .iter()
            .filter_map(|key| {
                let parent = self.parent_id(*key)?;
                let node = self.get_node(*key)?;
                Some(PersistedConnection {
                    source: parent.to_string(),
                    target: node.id.clone(),
                })
            })
            .collect();

        MindMapDocument {
            id: id.to_string(),
            name: name.to_string(),
            nodes: Some(nodes),
            connections,
        }
    }

    /// Rebuild a tree from a document.
    ///
    /// Ids are opaque strings and only need to be non-blank and unique.
    /// `parentId` links are authoritative; the document's connection list is
    /// not consulted. Levels are recomputed from the rebuilt tree.
    pub fn from_document(document: &MindMapDocument) -> Result<Self, DocumentError> {
        let nodes = document.nodes.as_ref().ok_or(DocumentError::MissingNodes)?;

        let mut by_parent: HashMap<Option<&str>, Vec<(&str, &PersistedNode)>> = HashMap::new();
        let mut ids = HashSet::new();
        for pnode in nodes {
            let id = pnode.id.as_str();
            if id.trim().is_empty() {
                return Err(DocumentError::InvalidId(pnode.id.clone()));
            }
            if !ids.insert(id) {
                return Err(DocumentError::DuplicateId(pnode.id.clone()));
            }
            by_parent
                .entry(pnode.parent_id.as_deref())
                .or_default()
                .push((id, pnode));
        }

        let roots = by_parent.remove(&None).unwrap_or_default();
        let (root_id, root_node) = match roots.as_slice() {
            [root] => *root,
            [] => return Err(DocumentError::MissingRoot),
            _ => return Err(DocumentError::MultipleRoots(roots.len())),
        };
        for parent in by_parent.keys().flatten() {
            if !ids.contains(parent) {
                return Err(DocumentError::DanglingParent(parent.to_string()));
            }
        }

        let mut graph = Graph::new();
        let root_key = graph
            .add_root_with_id(root_id, root_node.text.clone(), Point2D::new(root_node.x, root_node.y))
            .ok_or(DocumentError::MissingRoot)?;
        graph.restore_attributes(root_key, root_node);

        let mut queue = VecDeque::from([(root_id, root_key)]);
        while let Some((parent_id, parent_key)) = queue.pop_front() {
            for (child_id, pnode) in by_parent.remove(&Some(parent_id)).unwrap_or_default() {
                let key = graph
                    .add_child_with_id(
                        child_id,
                        parent_key,
                        pnode.text.clone(),
                        Point2D::new(pnode.x, pnode.y),
                    )
                    .ok_or_else(|| DocumentError::DuplicateId(pnode.id.clone()))?;
                graph.restore_attributes(key, pnode);
                queue.push_back((child_id, key));
            }
        }

        // Anything left over hangs off a cycle that never reaches the root.
        if graph.node_count() != nodes.len() {
            return Err(DocumentError::Cycle);
        }
        Ok(graph)
    }

    fn restore_attributes(&mut self, key: NodeKey, pnode: &PersistedNode) {
        if let Some(node) = self.inner.node_weight_mut(key) {
            node.color = pnode.color.clone();
            node.text_color = pnode.text_color.clone();
            node.withdrawn = pnode.withdrawn;
            node.image = pnode.image.clone();
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
