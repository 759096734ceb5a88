// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for camera capture
//!
//! The backend layer wraps GStreamer/PipeWire access so the rest of the
//! application only deals with [`camera::CameraDevice`], [`camera::CameraFrame`]
//! and the [`camera::CameraManager`] lifecycle.

pub mod camera;
