/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pointer and wheel input → intents.

use mindmap_canvas::{GestureOutcome, PointerEvent, PointerPhase, WheelEvent};

use super::InteractionController;
use crate::app::{GraphIntent, MindMapApp};

impl InteractionController {
    pub fn on_pointer(&mut self, app: &MindMapApp, event: &PointerEvent) -> Vec<GraphIntent> {
        let mut intents = Vec::new();
        if event.phase == PointerPhase::Down && self.text_edit.is_some() {
            intents.extend(self.blur());
        }

        let hit = match event.phase {
            PointerPhase::Down | PointerPhase::DoubleClick => app
                .node_at_screen(event.position)
                .and_then(|key| app.graph().get_node(key).map(|node| (key, node.position))),
            PointerPhase::Move | PointerPhase::Up => None,
        };

        let outcome = self
            .gestures
            .on_pointer(event, hit, app.camera().zoom, self.space_held);
        match outcome {
            Some(GestureOutcome::NodePressed(key)) => {
                intents.push(GraphIntent::SelectNode { key });
            },
            Some(GestureOutcome::NodeDragged { key, position }) => {
                intents.push(GraphIntent::SetNodePosition { key, position });
            },
            Some(GestureOutcome::NodeReleased { key, moved: true }) => {
                intents.push(GraphIntent::FinishNodeDrag { key });
            },
            Some(GestureOutcome::NodeReleased { moved: false, .. }) => {},
            Some(GestureOutcome::Panned(delta)) => {
                intents.push(GraphIntent::PanBy { delta });
            },
            Some(GestureOutcome::CanvasClicked) => {
                intents.push(GraphIntent::ClearSelection);
            },
            Some(GestureOutcome::NodeDoubleClicked(key)) => {
                intents.extend(self.begin_edit(app, key));
            },
            None => {},
        }
        intents
    }

    /// One wheel notch zooms one step toward the cursor.
    pub fn on_wheel(&mut self, app: &MindMapApp, event: &WheelEvent) -> Vec<GraphIntent> {
        let Some(zoom) = app.camera().wheel_zoom(event.delta_y, app.prefs().zoom_step) else {
            return Vec::new();
        };
        vec![GraphIntent::ZoomAt {
            anchor: event.position,
            zoom,
        }]
    }

    /// Abandon an in-flight gesture (pointer capture lost, window blur).
    pub fn cancel_gesture(&mut self) {
        self.gestures.cancel();
    }
}
