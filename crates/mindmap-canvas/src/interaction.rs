/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Platform-neutral pointer input and the gesture state machine.
//!
//! The host adapts native mouse/touch events into [`PointerEvent`] and
//! [`WheelEvent`]. [`GestureTracker`] consumes pointer events together with
//! the hit-test result for the pointer position and reports what the user did
//! as a [`GestureOutcome`]. It holds no node data; the node's canvas position
//! at press time is supplied by the caller.

use euclid::default::{Point2D, Vector2D};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    DoubleClick,
}

/// A pointer sample in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point2D<f32>,
    /// Button that changed state. `None` for plain moves.
    pub button: Option<PointerButton>,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32, button: PointerButton) -> Self {
        Self {
            position: Point2D::new(x, y),
            button: Some(button),
            phase: PointerPhase::Down,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            position: Point2D::new(x, y),
            button: None,
            phase: PointerPhase::Move,
        }
    }

    pub fn up(x: f32, y: f32, button: PointerButton) -> Self {
        Self {
            position: Point2D::new(x, y),
            button: Some(button),
            phase: PointerPhase::Up,
        }
    }

    pub fn double_click(x: f32, y: f32) -> Self {
        Self {
            position: Point2D::new(x, y),
            button: Some(PointerButton::Primary),
            phase: PointerPhase::DoubleClick,
        }
    }
}

/// Wheel notch in screen space. Positive `delta_y` scrolls down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: Point2D<f32>,
    pub delta_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome<K> {
    /// Primary press landed on a node.
    NodePressed(K),
    /// Live drag update; `position` is the node's new canvas position.
    NodeDragged { key: K, position: Point2D<f32> },
    /// Press on a node ended. `moved` is false for a plain click.
    NodeReleased { key: K, moved: bool },
    /// Screen-space pan delta since the previous sample.
    Panned(Vector2D<f32>),
    /// Press and release on empty canvas without movement.
    CanvasClicked,
    NodeDoubleClicked(K),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture<K> {
    Idle,
    NodePress {
        key: K,
        origin: Point2D<f32>,
        node_origin: Point2D<f32>,
        dragging: bool,
    },
    Pan {
        last: Point2D<f32>,
        button: PointerButton,
    },
    CanvasPress {
        origin: Point2D<f32>,
        moved: bool,
    },
}

/// Pointer gesture state machine, generic over the node key type.
#[derive(Debug, Clone)]
pub struct GestureTracker<K> {
    state: Gesture<K>,
    /// Screen-space distance a press must travel before it becomes a drag.
    pub drag_threshold: f32,
}

impl<K: Copy + PartialEq> GestureTracker<K> {
    pub fn new() -> Self {
        Self {
            state: Gesture::Idle,
            drag_threshold: 0.0,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, Gesture::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, Gesture::Pan { .. })
    }

    /// Node currently being dragged (past the threshold), if any.
    pub fn dragging_node(&self) -> Option<K> {
        match self.state {
            Gesture::NodePress {
                key, dragging: true, ..
            } => Some(key),
            _ => None,
        }
    }

    /// Drop any in-flight gesture without reporting an outcome.
    pub fn cancel(&mut self) {
        self.state = Gesture::Idle;
    }

    /// Feed one pointer sample.
    ///
    /// `hit` is the node under the pointer with its current canvas position.
    /// `zoom` converts screen deltas into canvas units while dragging.
    /// `pan_modifier` is true while the host's pan key (space) is held.
    pub fn on_pointer(
        &mut self,
        event: &PointerEvent,
        hit: Option<(K, Point2D<f32>)>,
        zoom: f32,
        pan_modifier: bool,
    ) -> Option<GestureOutcome<K>> {
        match event.phase {
            PointerPhase::Down => self.on_down(event, hit, pan_modifier),
            PointerPhase::Move => self.on_move(event, zoom),
            PointerPhase::Up => self.on_up(event),
            PointerPhase::DoubleClick => {
                self.state = Gesture::Idle;
                hit.map(|(key, _)| GestureOutcome::NodeDoubleClicked(key))
            },
        }
    }

    fn on_down(
        &mut self,
        event: &PointerEvent,
        hit: Option<(K, Point2D<f32>)>,
        pan_modifier: bool,
    ) -> Option<GestureOutcome<K>> {
        if !self.is_idle() {
            return None;
        }
        match (event.button, hit) {
            (Some(PointerButton::Middle), None) => {
                self.state = Gesture::Pan {
                    last: event.position,
                    button: PointerButton::Middle,
                };
                None
            },
            (Some(PointerButton::Primary), None) if pan_modifier => {
                self.state = Gesture::Pan {
                    last: event.position,
                    button: PointerButton::Primary,
                };
                None
            },
            (Some(PointerButton::Primary), None) => {
                self.state = Gesture::CanvasPress {
                    origin: event.position,
                    moved: false,
                };
                None
            },
            (Some(PointerButton::Primary), Some((key, node_origin))) => {
                self.state = Gesture::NodePress {
                    key,
                    origin: event.position,
                    node_origin,
                    dragging: false,
                };
                Some(GestureOutcome::NodePressed(key))
            },
            _ => None,
        }
    }

    fn on_move(&mut self, event: &PointerEvent, zoom: f32) -> Option<GestureOutcome<K>> {
        let threshold = self.drag_threshold;
        match &mut self.state {
            Gesture::Idle => None,
            Gesture::NodePress {
                key,
                origin,
                node_origin,
                dragging,
            } => {
                let screen_delta = event.position - *origin;
                if !*dragging && screen_delta.length() <= threshold {
                    return None;
                }
                *dragging = true;
                let zoom = if zoom > 0.0 { zoom } else { 1.0 };
                Some(GestureOutcome::NodeDragged {
                    key: *key,
                    position: *node_origin + screen_delta / zoom,
                })
            },
            Gesture::Pan { last, .. } => {
                let delta = event.position - *last;
                *last = event.position;
                Some(GestureOutcome::Panned(delta))
            },
            Gesture::CanvasPress { origin, moved } => {
                if (event.position - *origin).length() > threshold {
                    *moved = true;
                }
                None
            },
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> Option<GestureOutcome<K>> {
        let outcome = match self.state {
            Gesture::Idle => None,
            Gesture::NodePress { key, dragging, .. } => {
                if event.button != Some(PointerButton::Primary) {
                    return None;
                }
                Some(GestureOutcome::NodeReleased {
                    key,
                    moved: dragging,
                })
            },
            Gesture::Pan { button, .. } => {
                if event.button != Some(button) {
                    return None;
                }
                None
            },
            Gesture::CanvasPress { moved, .. } => {
                if event.button != Some(PointerButton::Primary) {
                    return None;
                }
                (!moved).then_some(GestureOutcome::CanvasClicked)
            },
        };
        self.state = Gesture::Idle;
        outcome
    }
}

impl<K: Copy + PartialEq> Default for GestureTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
