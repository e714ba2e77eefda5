/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Framework-agnostic canvas plumbing for the mind-map view.
//!
//! - [`camera`]: pan/zoom view transform and screen↔canvas projection
//! - [`interaction`]: platform-neutral pointer events and the gesture state
//!   machine that turns them into drag/pan/click outcomes
//! - [`hit_test`]: node box hit testing in canvas space
//!
//! Nothing here knows about the node tree. Callers supply node keys and
//! positions; the crate is generic over the key type.

pub mod camera;
pub mod interaction;

pub use camera::Camera;
pub use hit_test::hit_test;
pub use interaction::{
    GestureOutcome, GestureTracker, PointerButton, PointerEvent, PointerPhase, WheelEvent,
};
