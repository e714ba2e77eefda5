/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! View transform for the canvas.
//!
//! Screen space is `canvas * zoom + pan`. The camera never touches node data;
//! it is pure view state and is not part of undo history.

use euclid::default::{Point2D, Vector2D};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZOOM_MIN: f32 = 0.5;
pub const DEFAULT_ZOOM_MAX: f32 = 2.0;
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;

/// Pan/zoom camera with zoom bounds enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan: Vector2D<f32>,
    pub zoom: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_bounds(DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_MAX)
    }

    /// Camera at identity transform with custom zoom bounds.
    ///
    /// Inverted bounds are swapped rather than rejected.
    pub fn with_bounds(zoom_min: f32, zoom_max: f32) -> Self {
        let (zoom_min, zoom_max) = if zoom_min <= zoom_max {
            (zoom_min, zoom_max)
        } else {
            (zoom_max, zoom_min)
        };
        Self {
            pan: Vector2D::zero(),
            zoom: 1.0_f32.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
        }
    }

    /// Clamp a zoom value to the allowed range
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }

    pub fn canvas_to_screen(&self, point: Point2D<f32>) -> Point2D<f32> {
        Point2D::new(
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }

    pub fn screen_to_canvas(&self, point: Point2D<f32>) -> Point2D<f32> {
        Point2D::new(
            (point.x - self.pan.x) / self.zoom,
            (point.y - self.pan.y) / self.zoom,
        )
    }

    /// Convert a screen-space movement into canvas units.
    pub fn screen_delta_to_canvas(&self, delta: Vector2D<f32>) -> Vector2D<f32> {
        delta / self.zoom
    }

    pub fn pan_by(&mut self, delta: Vector2D<f32>) {
        self.pan += delta;
    }

    /// Set the zoom while keeping the canvas point under `anchor` (screen
    /// space) fixed on screen. Returns whether the zoom actually changed.
    pub fn zoom_at(&mut self, anchor: Point2D<f32>, zoom: f32) -> bool {
        let next = self.clamp(zoom);
        if next == self.zoom {
            return false;
        }
        let anchor_canvas = self.screen_to_canvas(anchor);
        self.zoom = next;
        self.pan = Vector2D::new(
            anchor.x - anchor_canvas.x * next,
            anchor.y - anchor_canvas.y * next,
        );
        true
    }

    /// Target zoom for one wheel notch: scrolling down (positive delta)
    /// zooms out by `step`. `None` for a zero delta.
    pub fn wheel_zoom(&self, delta_y: f32, step: f32) -> Option<f32> {
        if delta_y == 0.0 {
            return None;
        }
        let delta = if delta_y > 0.0 { -step } else { step };
        Some(self.clamp(self.zoom + delta))
    }

    pub fn reset(&mut self) {
        self.pan = Vector2D::zero();
        self.zoom = self.clamp(1.0);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
