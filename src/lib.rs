// SPDX-License-Identifier: GPL-3.0-only

//! Bubble - a floating camera bubble for the COSMIC desktop
//!
//! Shows a small, circular, always-on-top window with a live webcam feed.
//! The bubble is resized with scroll or pinch gestures and configured
//! through a right-click menu (camera selection, mirroring).
//!
//! # Architecture
//!
//! - [`app`]: Application model, UI, and gesture handling
//! - [`backends`]: Camera capture backend (GStreamer over PipeWire)
//! - [`permissions`]: Camera permission flow via the XDG desktop portal
//! - [`constants`]: Application-wide constants

pub mod app;
pub mod backends;
pub mod constants;
pub mod i18n;
pub mod permissions;

// Re-export commonly used types
pub use app::geometry::BubbleGeometry;
pub use app::{AppModel, Message};
