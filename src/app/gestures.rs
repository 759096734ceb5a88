// SPDX-License-Identifier: GPL-3.0-only

//! Gesture-to-resize translation
//!
//! Scroll and pinch gestures both resolve to a requested side length that
//! the geometry then clamps. Scroll deltas pass through a momentum filter
//! first so the inertial tail of a flick cannot keep resizing the bubble
//! after the fingers have lifted.

use crate::constants::{timing, ui};
use std::time::Instant;

/// Requested side length for a scroll delta.
pub fn scroll_request(side: f32, delta_y: f32) -> f32 {
    side + delta_y * ui::SCROLL_SENSITIVITY
}

/// Requested side length for a pinch magnification step.
pub fn magnify_request(side: f32, magnification: f32) -> f32 {
    side * (1.0 + magnification)
}

/// Classifier for the inertial tail of a scroll gesture.
///
/// The runtime does not surface the platform's momentum phase, so the
/// filter reconstructs it from the delta train: an event that follows the
/// previous one within [`timing::MOMENTUM_WINDOW`] without growing in
/// magnitude is part of a decaying tail and is dropped. The first event
/// of a train, anything after a pause, and any growing delta count as
/// user input.
#[derive(Debug, Default)]
pub struct ScrollFilter {
    last_event: Option<(Instant, f32)>,
}

impl ScrollFilter {
    /// Observe a scroll delta; returns whether it should be acted on.
    pub fn accept(&mut self, delta_y: f32, at: Instant) -> bool {
        let magnitude = delta_y.abs();

        let accepted = match self.last_event {
            Some((previous_at, previous_magnitude)) => {
                let gap = at.duration_since(previous_at);
                gap >= timing::MOMENTUM_WINDOW || magnitude > previous_magnitude
            }
            None => true,
        };

        self.last_event = Some((at, magnitude));
        accepted
    }
}
