// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use std::sync::Arc;
use std::time::Instant;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Sender side of the frame channel, written to from the appsink callback
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Receiver side of the frame channel, drained by the UI subscription
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

/// Represents a camera device discovered through the device monitor
///
/// The platform's device registry owns the hardware; this is only a
/// reference to it. Two values describe the same physical device when
/// their `target` matches, regardless of the display name.
#[derive(Debug, Clone)]
pub struct CameraDevice {
    /// Human-readable device name shown in the menu
    pub name: String,
    /// PipeWire node identity handed to `pipewiresrc` (empty lets
    /// PipeWire auto-select)
    pub target: String,
}

impl PartialEq for CameraDevice {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for CameraDevice {}

impl std::fmt::Display for CameraDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.target)
    }
}

/// A single decoded RGBA frame from the preview pipeline
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixel data
    pub data: Arc<[u8]>,
    /// When the appsink callback pulled this frame
    pub captured_at: Instant,
}

/// Camera backend errors
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Failed to construct or configure the pipeline
    InitializationFailed(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// Pipeline state change failed
    StateChangeFailed(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::StateChangeFailed(msg) => write!(f, "State change failed: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
