// SPDX-License-Identifier: GPL-3.0-only

//! Camera discovery via the GStreamer device monitor
//!
//! Enumeration takes a one-shot snapshot of the video sources PipeWire
//! currently exposes. The list is finite and not live-updating; hotplug
//! is handled separately through a monitor bus watched by the app
//! subscription (see [`monitor_bus`]).

use super::types::{BackendError, BackendResult, CameraDevice};
use gstreamer::prelude::*;
use tracing::{debug, warn};

/// Create a device monitor filtered to video capture sources.
pub fn video_source_monitor() -> BackendResult<gstreamer::DeviceMonitor> {
    gstreamer::init().map_err(|e| BackendError::NotAvailable(e.to_string()))?;

    let monitor = gstreamer::DeviceMonitor::new();
    monitor.add_filter(Some("Video/Source"), None);
    Ok(monitor)
}

/// Enumerate available cameras.
///
/// Returns a snapshot in platform discovery order. Failures are absorbed
/// into an empty list; a blank bubble is the only symptom the user sees.
pub fn enumerate() -> Vec<CameraDevice> {
    let monitor = match video_source_monitor() {
        Ok(monitor) => monitor,
        Err(error) => {
            warn!(%error, "device monitor unavailable");
            return Vec::new();
        }
    };

    if let Err(error) = monitor.start() {
        warn!(%error, "failed to start device monitor");
        return Vec::new();
    }

    let devices: Vec<CameraDevice> = monitor.devices().iter().map(device_from_gst).collect();
    monitor.stop();

    debug!(count = devices.len(), "enumerated cameras");
    devices
}

/// The system default camera: the first device in discovery order.
pub fn default_device() -> Option<CameraDevice> {
    enumerate().into_iter().next()
}

/// Build a [`CameraDevice`] from a monitor-provided GStreamer device.
///
/// The PipeWire device provider publishes the node identity in the device
/// properties; `node.name` is stable across sessions, `object.path` is a
/// fallback for providers that do not set it.
pub fn device_from_gst(device: &gstreamer::Device) -> CameraDevice {
    let name = device.display_name().to_string();

    let target = device
        .properties()
        .and_then(|properties| {
            properties
                .get::<&str>("node.name")
                .or_else(|_| properties.get::<&str>("object.path"))
                .map(ToOwned::to_owned)
                .ok()
        })
        .unwrap_or_default();

    CameraDevice { name, target }
}
