// SPDX-License-Identifier: GPL-3.0-only

//! Camera capture backend
//!
//! This module provides camera capture over PipeWire via GStreamer:
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//! ┌──────────┴──────────┐
//! │    CameraManager    │  ← device selection, mirror state, start/stop
//! └──────────┬──────────┘
//!            │
//! ┌──────────┴──────────┐
//! │   PreviewPipeline   │  ← pipewiresrc → videoflip → appsink (RGBA)
//! └─────────────────────┘
//! ```
//!
//! Device discovery and hotplug notifications come from a GStreamer
//! [`DeviceMonitor`](gstreamer::DeviceMonitor) filtered to video sources.

pub mod enumeration;
pub mod manager;
pub mod pipeline;
pub mod types;

pub use manager::{CameraManager, HotplugAction, HotplugEvent, plan_hotplug};
pub use types::*;
