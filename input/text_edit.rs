/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! In-place label editing for a single node.

use keyboard_types::{Key, KeyState, KeyboardEvent, Modifiers, NamedKey};

use crate::app::GraphIntent;
use crate::graph::NodeKey;

/// What a key press did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKeyOutcome {
    /// Still editing (the key may have changed the buffer).
    Editing,
    Commit,
    Cancel,
}

/// Buffer for one label edit. Nothing reaches the graph until `finish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditSession {
    key: NodeKey,
    original: String,
    buffer: String,
}

impl TextEditSession {
    pub fn new(key: NodeKey, original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            key,
            buffer: original.clone(),
            original,
        }
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Replace the buffer wholesale (hosts with their own text widget).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Enter commits and Shift+Enter inserts a line break. Escape cancels.
    /// Printable characters and Backspace edit the buffer.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> EditKeyOutcome {
        if event.state != KeyState::Down {
            return EditKeyOutcome::Editing;
        }
        match &event.key {
            Key::Named(NamedKey::Enter) if event.modifiers.contains(Modifiers::SHIFT) => {
                self.buffer.push('\n');
                EditKeyOutcome::Editing
            },
            Key::Named(NamedKey::Enter) => EditKeyOutcome::Commit,
            Key::Named(NamedKey::Escape) => EditKeyOutcome::Cancel,
            Key::Named(NamedKey::Backspace) => {
                self.buffer.pop();
                EditKeyOutcome::Editing
            },
            Key::Character(text)
                if !event
                    .modifiers
                    .intersects(Modifiers::CONTROL | Modifiers::META) =>
            {
                self.buffer.push_str(text);
                EditKeyOutcome::Editing
            },
            _ => EditKeyOutcome::Editing,
        }
    }

    /// End the session. A blank or unchanged buffer reverts, producing no intent.
    pub fn finish(self, commit: bool) -> Option<GraphIntent> {
        if !commit || self.buffer.trim().is_empty() || self.buffer == self.original {
            return None;
        }
        Some(GraphIntent::SetNodeText {
            key: self.key,
            text: self.buffer,
        })
    }
}
