// SPDX-License-Identifier: GPL-3.0-only

//! Bubble window geometry
//!
//! The bubble is always a square. Resizing clamps the side length to the
//! allowed range and recomputes the origin so the center point stays
//! where it was; the window grows and shrinks in place.

use crate::constants::ui;
use cosmic::iced::{Point, Size};

/// Square window frame described by its origin and side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleGeometry {
    /// Top-left corner in screen coordinates
    pub origin: Point,
    /// Side length; width == height always
    pub side: f32,
}

impl BubbleGeometry {
    /// A bubble of the given side length at the origin.
    ///
    /// Initial placement belongs to the compositor; the first reported
    /// move fixes up the origin and the center is preserved from then on.
    pub fn new(side: f32) -> Self {
        Self {
            origin: Point::ORIGIN,
            side: side.clamp(ui::MIN_BUBBLE_SIDE, ui::MAX_BUBBLE_SIDE),
        }
    }

    /// The frame's center point.
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.side / 2.0,
            self.origin.y + self.side / 2.0,
        )
    }

    /// The frame's size.
    pub fn size(&self) -> Size {
        Size::new(self.side, self.side)
    }

    /// The frame after a resize request.
    ///
    /// The requested side is clamped to the allowed range and the origin
    /// recomputed so the center point is unchanged.
    pub fn resized(&self, requested: f32) -> Self {
        let side = requested.clamp(ui::MIN_BUBBLE_SIDE, ui::MAX_BUBBLE_SIDE);
        let center = self.center();
        Self {
            origin: Point::new(center.x - side / 2.0, center.y - side / 2.0),
            side,
        }
    }

    /// Record the position the windowing system reports.
    pub fn record_moved(&mut self, position: Point) {
        self.origin = position;
    }

    /// Record the size the windowing system reports.
    pub fn record_resized(&mut self, size: Size) {
        self.side = size.width;
    }
}

impl Default for BubbleGeometry {
    fn default() -> Self {
        Self::new(ui::DEFAULT_BUBBLE_SIDE)
    }
}
