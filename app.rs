/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application state for one open mind map.
//!
//! All user-visible mutation goes through `GraphIntent` values applied with
//! `MindMapApp::apply_intents`. Completed edits push a snapshot onto the
//! undo history; live drag motion and camera changes do not.

use euclid::default::{Point2D, Size2D, Vector2D};
use log::{debug, info, warn};
use mindmap_canvas::Camera;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::graph::{Graph, NodeKey};
use crate::history::History;
use crate::layout::apply_layout;
use crate::notify::Toast;
use crate::outline;
use crate::persistence::types::{DocumentError, MindMapDocument};
use crate::persistence::{MindMapStore, export_json, import_json};
use crate::prefs::MindMapPrefs;

/// Single-node selection with a change counter for renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    primary: Option<NodeKey>,
    revision: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic revision incremented whenever the selection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn primary(&self) -> Option<NodeKey> {
        self.primary
    }

    pub fn select(&mut self, key: NodeKey) {
        if self.primary == Some(key) {
            return;
        }
        self.primary = Some(key);
        self.revision = self.revision.saturating_add(1);
    }

    pub fn clear(&mut self) {
        if self.primary.is_none() {
            return;
        }
        self.primary = None;
        self.revision = self.revision.saturating_add(1);
    }

    fn restore(&mut self, key: Option<NodeKey>) {
        match key {
            Some(key) => self.select(key),
            None => self.clear(),
        }
    }
}

#[derive(Debug, Clone)]
struct HistorySnapshot {
    graph: Graph,
    selected: Option<NodeKey>,
}

/// Live drag bookkeeping: where the node started.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingDrag {
    key: NodeKey,
    origin: Point2D<f32>,
}

/// Deterministic mutation boundary for mind-map state.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphIntent {
    SelectNode {
        key: NodeKey,
    },
    ClearSelection,
    AddChild {
        parent: NodeKey,
    },
    AddChildToSelected,
    DeleteNode {
        key: NodeKey,
    },
    DeleteSelected,
    SetNodeText {
        key: NodeKey,
        text: String,
    },
    SetNodeColor {
        key: NodeKey,
        color: Option<String>,
    },
    SetNodeTextColor {
        key: NodeKey,
        color: Option<String>,
    },
    ToggleWithdrawn {
        key: NodeKey,
    },
    SetNodeImage {
        key: NodeKey,
        image: Option<String>,
    },
    /// Live position update while dragging; not recorded in history.
    SetNodePosition {
        key: NodeKey,
        position: Point2D<f32>,
    },
    /// End of a drag; records one history entry if the node moved.
    FinishNodeDrag {
        key: NodeKey,
    },
    AutoLayout,
    ReplaceFromOutline {
        text: String,
    },
    Rename {
        name: String,
    },
    Undo,
    Redo,
    PanBy {
        delta: Vector2D<f32>,
    },
    ZoomAt {
        anchor: Point2D<f32>,
        zoom: f32,
    },
    ZoomIn,
    ZoomOut,
    ZoomReset,
    NewMindMap,
    RequestSave,
}

/// Owned state container for one mind map.
pub struct MindMapApp {
    id: String,
    name: String,
    graph: Graph,
    selection: SelectionState,
    history: History<HistorySnapshot>,
    camera: Camera,
    prefs: MindMapPrefs,
    viewport: Size2D<f32>,
    pending_drag: Option<PendingDrag>,
    pending_toasts: Vec<Toast>,
    pending_save_request: bool,
    rng: StdRng,
}

impl MindMapApp {
    /// Fresh single-root mind map.
    pub fn new(prefs: MindMapPrefs) -> Self {
        let graph = Graph::with_root(prefs.root_text.clone(), Point2D::origin());
        let selected = graph.root();
        let history = History::new(
            HistorySnapshot {
                graph: graph.clone(),
                selected,
            },
            prefs.history_depth,
        );
        let mut selection = SelectionState::new();
        selection.restore(selected);

        Self {
            id: Uuid::new_v4().to_string(),
            name: prefs.untitled_name.clone(),
            graph,
            selection,
            history,
            camera: prefs.camera(),
            viewport: Size2D::zero(),
            pending_drag: None,
            pending_toasts: Vec::new(),
            pending_save_request: false,
            rng: StdRng::from_entropy(),
            prefs,
        }
    }

    /// Open an existing document. History starts at the loaded state.
    pub fn from_document(
        document: &MindMapDocument,
        prefs: MindMapPrefs,
    ) -> Result<Self, DocumentError> {
        let mut app = Self::new(prefs);
        app.replace_document(document)?;
        Ok(app)
    }

    /// Make child placement reproducible.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected(&self) -> Option<NodeKey> {
        self.selection.primary()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn prefs(&self) -> &MindMapPrefs {
        &self.prefs
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Keyboard zoom anchors at the centre of this viewport.
    pub fn set_viewport_size(&mut self, size: Size2D<f32>) {
        self.viewport = size;
    }

    pub fn viewport_center(&self) -> Point2D<f32> {
        Point2D::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Node under a screen-space point, if any.
    ///
    /// Nodes are offered in pre-order (paint order), so where boxes overlap
    /// the one drawn on top wins.
    pub fn node_at_screen(&self, point: Point2D<f32>) -> Option<NodeKey> {
        let canvas = self.camera.screen_to_canvas(point);
        mindmap_canvas::hit_test(
            self.graph.preorder().into_iter().filter_map(|key| {
                self.graph.get_node(key).map(|node| (key, node.position))
            }),
            canvas,
            self.prefs.node_size(),
        )
    }

    /// Indented outline of the current tree.
    pub fn outline_text(&self) -> String {
        outline::serialize(&self.graph)
    }

    pub fn document(&self) -> MindMapDocument {
        self.graph.to_document(&self.id, &self.name)
    }

    pub fn take_pending_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending_toasts)
    }

    pub fn take_pending_save_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_save_request)
    }

    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = GraphIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: GraphIntent) {
        match intent {
            GraphIntent::SelectNode { key } => {
                if self.graph.contains(key) {
                    self.selection.select(key);
                }
            },
            GraphIntent::ClearSelection => self.selection.clear(),
            GraphIntent::AddChild { parent } => self.add_child(parent),
            GraphIntent::AddChildToSelected => {
                if let Some(parent) = self.selection.primary() {
                    self.add_child(parent);
                }
            },
            GraphIntent::DeleteNode { key } => self.delete_node(key),
            GraphIntent::DeleteSelected => {
                if let Some(key) = self.selection.primary() {
                    self.delete_node(key);
                }
            },
            GraphIntent::SetNodeText { key, text } => {
                if text.trim().is_empty() {
                    debug!("Refusing blank text for {key:?}");
                    return;
                }
                if self.graph.set_text(key, text) {
                    self.push_history();
                }
            },
            GraphIntent::SetNodeColor { key, color } => {
                if self.graph.set_color(key, color) {
                    self.push_history();
                }
            },
            GraphIntent::SetNodeTextColor { key, color } => {
                if self.graph.set_text_color(key, color) {
                    self.push_history();
                }
            },
            GraphIntent::ToggleWithdrawn { key } => {
                if self.graph.toggle_withdrawn(key).is_some() {
                    self.push_history();
                }
            },
            GraphIntent::SetNodeImage { key, image } => {
                if self.graph.set_image(key, image) {
                    self.push_history();
                }
            },
            GraphIntent::SetNodePosition { key, position } => self.move_node(key, position),
            GraphIntent::FinishNodeDrag { key } => self.finish_drag(key),
            GraphIntent::AutoLayout => {
                if apply_layout(&mut self.graph, &self.prefs.layout) {
                    self.push_history();
                }
            },
            GraphIntent::ReplaceFromOutline { text } => self.replace_from_outline(&text),
            GraphIntent::Rename { name } => {
                let name = name.trim();
                if !name.is_empty() {
                    self.name = name.to_string();
                }
            },
            GraphIntent::Undo => self.undo(),
            GraphIntent::Redo => self.redo(),
            GraphIntent::PanBy { delta } => self.camera.pan_by(delta),
            GraphIntent::ZoomAt { anchor, zoom } => {
                self.camera.zoom_at(anchor, zoom);
            },
            GraphIntent::ZoomIn => {
                let anchor = self.viewport_center();
                let zoom = self.camera.zoom + self.prefs.zoom_step;
                self.camera.zoom_at(anchor, zoom);
            },
            GraphIntent::ZoomOut => {
                let anchor = self.viewport_center();
                let zoom = self.camera.zoom - self.prefs.zoom_step;
                self.camera.zoom_at(anchor, zoom);
            },
            GraphIntent::ZoomReset => self.camera.reset(),
            GraphIntent::NewMindMap => self.new_mind_map(),
            GraphIntent::RequestSave => self.pending_save_request = true,
        }
    }

    fn add_child(&mut self, parent: NodeKey) {
        let placement = self.prefs.child_placement;
        let text = self.prefs.child_text.clone();
        let Some(key) = self
            .graph
            .add_child_near_parent(parent, text, &placement, &mut self.rng)
        else {
            return;
        };
        self.selection.select(key);
        self.push_history();
    }

    fn delete_node(&mut self, key: NodeKey) {
        if self.graph.remove_subtree(key).is_empty() {
            return;
        }
        self.selection.clear();
        if self
            .pending_drag
            .is_some_and(|drag| !self.graph.contains(drag.key))
        {
            self.pending_drag = None;
        }
        self.push_history();
    }

    fn move_node(&mut self, key: NodeKey, position: Point2D<f32>) {
        let Some(node) = self.graph.get_node(key) else {
            return;
        };
        if self.pending_drag.is_none_or(|drag| drag.key != key) {
            self.pending_drag = Some(PendingDrag {
                key,
                origin: node.position,
            });
        }
        self.graph.set_position(key, position);
    }

    fn finish_drag(&mut self, key: NodeKey) {
        let Some(drag) = self.pending_drag.take() else {
            return;
        };
        if drag.key != key {
            self.pending_drag = Some(drag);
            return;
        }
        let moved = self
            .graph
            .get_node(key)
            .is_some_and(|node| node.position != drag.origin);
        if moved {
            self.push_history();
        }
    }

    fn replace_from_outline(&mut self, text: &str) {
        let mut graph = outline::parse_with_palette(text, &self.prefs.palette);
        if graph.root().is_none() {
            self.pending_toasts
                .push(Toast::warning("Outline is empty; nothing to generate"));
            return;
        }
        apply_layout(&mut graph, &self.prefs.layout);
        self.graph = graph;
        self.pending_drag = None;
        self.selection.clear();
        self.push_history();
        self.pending_toasts
            .push(Toast::success("Mind map generated from outline"));
    }

    fn undo(&mut self) {
        let Some(snapshot) = self.history.undo().cloned() else {
            return;
        };
        self.restore(snapshot);
    }

    fn redo(&mut self) {
        let Some(snapshot) = self.history.redo().cloned() else {
            return;
        };
        self.restore(snapshot);
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.graph = snapshot.graph;
        self.pending_drag = None;
        let selected = snapshot.selected.filter(|key| self.graph.contains(*key));
        self.selection.restore(selected);
    }

    fn push_history(&mut self) {
        self.history.push(HistorySnapshot {
            graph: self.graph.clone(),
            selected: self.selection.primary(),
        });
    }

    fn reset_history(&mut self) {
        self.history.reset(HistorySnapshot {
            graph: self.graph.clone(),
            selected: self.selection.primary(),
        });
    }

    fn default_root_position(&self) -> Point2D<f32> {
        let size = self.prefs.node_size();
        let center = self.viewport_center();
        if self.viewport.is_empty() {
            return Point2D::origin();
        }
        Point2D::new(center.x - size.width / 2.0, center.y - size.height / 2.0)
    }

    fn new_mind_map(&mut self) {
        self.graph = Graph::with_root(self.prefs.root_text.clone(), self.default_root_position());
        self.id = Uuid::new_v4().to_string();
        self.name = self.prefs.untitled_name.clone();
        self.pending_drag = None;
        self.selection.restore(self.graph.root());
        self.reset_history();
        self.pending_toasts.push(Toast::success("Created new mind map"));
    }

    fn replace_document(&mut self, document: &MindMapDocument) -> Result<(), DocumentError> {
        let graph = Graph::from_document(document)?;
        self.graph = graph;
        self.id = if document.id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            document.id.clone()
        };
        self.name = if document.name.trim().is_empty() {
            self.prefs.untitled_name.clone()
        } else {
            document.name.clone()
        };
        self.pending_drag = None;
        self.selection.clear();
        self.reset_history();
        Ok(())
    }

    /// Replace state with a stored mind map.
    ///
    /// A missing or invalid document falls back to a fresh map.
    pub fn load_from_store(&mut self, store: &MindMapStore, id: &str) -> bool {
        let outcome = store
            .load(id)
            .map_err(|e| e.to_string())
            .and_then(|doc| doc.ok_or_else(|| format!("no mind map stored under '{id}'")))
            .and_then(|doc| self.replace_document(&doc).map_err(|e| e.to_string()));
        match outcome {
            Ok(()) => {
                info!("Loaded mind map {id}");
                self.pending_toasts
                    .push(Toast::success("Mind map loaded successfully"));
                true
            },
            Err(e) => {
                warn!("Failed to load mind map {id}: {e}");
                self.new_mind_map();
                // Drop the "created" toast; the failure is what matters here.
                self.pending_toasts.pop();
                self.pending_toasts
                    .push(Toast::error("Failed to load mind map"));
                false
            },
        }
    }

    pub fn save_to_store(&mut self, store: &mut MindMapStore) -> bool {
        match store.save(&self.document()) {
            Ok(()) => {
                self.pending_toasts
                    .push(Toast::success("Mind map saved successfully"));
                true
            },
            Err(e) => {
                warn!("Failed to save mind map {}: {e}", self.id);
                self.pending_toasts
                    .push(Toast::error("Failed to save mind map"));
                false
            },
        }
    }

    /// Replace state from a `.json` file. State is untouched on failure.
    pub fn import_from_path(&mut self, path: &Path) -> bool {
        let outcome = import_json(path)
            .map_err(|e| e.to_string())
            .and_then(|doc| self.replace_document(&doc).map_err(|e| e.to_string()));
        match outcome {
            Ok(()) => {
                self.pending_toasts
                    .push(Toast::success("Mind map imported successfully"));
                true
            },
            Err(e) => {
                warn!("Rejected import from {}: {e}", path.display());
                self.pending_toasts
                    .push(Toast::error("Failed to import mind map"));
                false
            },
        }
    }

    pub fn export_to_dir(&mut self, dir: &Path, date: OffsetDateTime) -> Option<PathBuf> {
        match export_json(&self.document(), dir, date) {
            Ok(path) => {
                self.pending_toasts
                    .push(Toast::success("Mind map exported successfully"));
                Some(path)
            },
            Err(e) => {
                warn!("Failed to export mind map {}: {e}", self.id);
                self.pending_toasts
                    .push(Toast::error("Failed to export mind map"));
                None
            },
        }
    }
}
