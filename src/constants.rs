// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// UI layout and gesture constants
pub mod ui {
    /// Smallest allowed bubble side length in logical pixels
    pub const MIN_BUBBLE_SIDE: f32 = 100.0;

    /// Largest allowed bubble side length in logical pixels
    pub const MAX_BUBBLE_SIDE: f32 = 400.0;

    /// Side length of the bubble at startup
    pub const DEFAULT_BUBBLE_SIDE: f32 = 200.0;

    /// Multiplier applied to scroll deltas when resizing the bubble
    pub const SCROLL_SENSITIVITY: f32 = 3.0;

    /// Logical pixels per line for line-based scroll deltas
    pub const SCROLL_LINE_STEP: f32 = 10.0;

    /// Width of the right-click menu panel
    pub const MENU_PANEL_WIDTH: f32 = 220.0;

    /// Background alpha for the menu panel overlay
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.95;
}

/// Capture pipeline constants
pub mod pipeline {
    /// Capacity of the frame channel between the appsink callback and the UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 8;

    /// Maximum buffers queued in the appsink before old frames are dropped
    pub const MAX_BUFFERS: u32 = 2;
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// How long to wait for the pipeline to reach the Null state on teardown
    pub const STOP_TIMEOUT_SECS: u64 = 3;

    /// Scroll events closer together than this are candidates for the
    /// inertial tail of a gesture
    pub const MOMENTUM_WINDOW: Duration = Duration::from_millis(80);
}
