/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Input handling for the mind-map canvas.
//!
//! Keyboard shortcuts are handled here. Pointer and wheel input lives in
//! `pointer`, label editing in `text_edit`. Everything is translated into
//! `GraphIntent`s; nothing here mutates the app directly.

pub mod pointer;
pub mod text_edit;

use keyboard_types::{Key, KeyState, KeyboardEvent, Modifiers, NamedKey};
use mindmap_canvas::GestureTracker;

use crate::app::{GraphIntent, MindMapApp};
use crate::graph::NodeKey;
use text_edit::{EditKeyOutcome, TextEditSession};

/// Keyboard actions collected from one key event.
///
/// This struct decouples input detection from action application (pure
/// state mutation), making actions testable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyboardActions {
    pub delete_selected: bool,
    pub add_child: bool,
    pub undo: bool,
    pub redo: bool,
    pub save: bool,
    pub new_mind_map: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub zoom_reset: bool,
}

fn is_command(modifiers: Modifiers) -> bool {
    modifiers.intersects(Modifiers::CONTROL | Modifiers::META)
}

fn is_char(key: &Key, expected: &str) -> bool {
    matches!(key, Key::Character(text) if text.eq_ignore_ascii_case(expected))
}

/// Collect shortcut actions from a key event (input detection only).
///
/// Returns no actions while a text input has keyboard focus.
pub fn collect_actions(event: &KeyboardEvent, text_input_focused: bool) -> KeyboardActions {
    let mut actions = KeyboardActions::default();
    if event.state != KeyState::Down || text_input_focused {
        return actions;
    }
    let key = &event.key;
    let command = is_command(event.modifiers);
    let shift = event.modifiers.contains(Modifiers::SHIFT);

    if matches!(
        key,
        Key::Named(NamedKey::Delete) | Key::Named(NamedKey::Backspace)
    ) {
        actions.delete_selected = true;
    }

    if matches!(key, Key::Named(NamedKey::Tab)) && !command {
        actions.add_child = true;
    }

    if !command {
        return actions;
    }

    if is_char(key, "z") {
        if shift {
            actions.redo = true;
        } else {
            actions.undo = true;
        }
    }
    if is_char(key, "y") {
        actions.redo = true;
    }
    if is_char(key, "s") {
        actions.save = true;
    }
    if is_char(key, "n") {
        actions.new_mind_map = true;
    }
    if is_char(key, "+") || is_char(key, "=") {
        actions.zoom_in = true;
    }
    if is_char(key, "-") {
        actions.zoom_out = true;
    }
    if is_char(key, "0") {
        actions.zoom_reset = true;
    }

    actions
}

/// Convert keyboard actions to graph intents without applying them.
pub fn intents_from_actions(actions: &KeyboardActions) -> Vec<GraphIntent> {
    let mut intents = Vec::new();
    if actions.delete_selected {
        intents.push(GraphIntent::DeleteSelected);
    }
    if actions.add_child {
        intents.push(GraphIntent::AddChildToSelected);
    }
    if actions.undo {
        intents.push(GraphIntent::Undo);
    }
    if actions.redo {
        intents.push(GraphIntent::Redo);
    }
    if actions.save {
        intents.push(GraphIntent::RequestSave);
    }
    if actions.new_mind_map {
        intents.push(GraphIntent::NewMindMap);
    }
    if actions.zoom_in {
        intents.push(GraphIntent::ZoomIn);
    }
    if actions.zoom_out {
        intents.push(GraphIntent::ZoomOut);
    }
    if actions.zoom_reset {
        intents.push(GraphIntent::ZoomReset);
    }
    intents
}

/// Turns raw host input into intents for one `MindMapApp`.
///
/// Holds only transient interaction state: the pointer gesture in flight,
/// whether the pan key is held, and any open label edit.
#[derive(Debug, Default)]
pub struct InteractionController {
    gestures: GestureTracker<NodeKey>,
    space_held: bool,
    text_input_focused: bool,
    text_edit: Option<TextEditSession>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure from the app's preferences.
    pub fn for_app(app: &MindMapApp) -> Self {
        let mut controller = Self::new();
        controller.gestures.drag_threshold = app.prefs().drag_threshold;
        controller
    }

    /// Host-side text widgets (outline box, rename field) report focus here.
    pub fn set_text_input_focused(&mut self, focused: bool) {
        self.text_input_focused = focused;
    }

    pub fn is_space_held(&self) -> bool {
        self.space_held
    }

    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    pub fn text_edit_mut(&mut self) -> Option<&mut TextEditSession> {
        self.text_edit.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.text_edit.is_some()
    }

    /// Open a label edit on `key`, committing any edit already open.
    pub fn begin_edit(&mut self, app: &MindMapApp, key: NodeKey) -> Vec<GraphIntent> {
        let mut intents = self.commit_edit();
        if let Some(node) = app.graph().get_node(key) {
            self.text_edit = Some(TextEditSession::new(key, node.text.clone()));
        }
        intents.push(GraphIntent::SelectNode { key });
        intents
    }

    pub fn commit_edit(&mut self) -> Vec<GraphIntent> {
        self.text_edit
            .take()
            .and_then(|edit| edit.finish(true))
            .into_iter()
            .collect()
    }

    pub fn cancel_edit(&mut self) {
        self.text_edit = None;
    }

    /// Focus left the label editor: same as Enter.
    pub fn blur(&mut self) -> Vec<GraphIntent> {
        self.commit_edit()
    }

    pub fn on_key(&mut self, event: &KeyboardEvent) -> Vec<GraphIntent> {
        if let Some(edit) = self.text_edit.as_mut() {
            return match edit.handle_key(event) {
                EditKeyOutcome::Editing => Vec::new(),
                EditKeyOutcome::Commit => self.commit_edit(),
                EditKeyOutcome::Cancel => {
                    self.cancel_edit();
                    Vec::new()
                },
            };
        }

        if matches!(&event.key, Key::Character(text) if text == " ") {
            self.space_held = event.state == KeyState::Down;
            return Vec::new();
        }

        intents_from_actions(&collect_actions(event, self.text_input_focused))
    }
}
