// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::geometry::BubbleGeometry;
use crate::backends::camera::{CameraDevice, CameraFrame, CameraManager, FrameReceiver};
use crate::permissions::PermissionState;
use cosmic::iced::{Point, Size};
use cosmic::widget;
use std::sync::Arc;

/// Right-click menu state.
///
/// The menu is rebuilt on every open from a fresh enumeration rather than
/// maintained incrementally; the device list is small and short-lived.
#[derive(Debug, Default)]
pub struct MenuState {
    /// Whether the menu overlay is shown
    pub visible: bool,
    /// Devices enumerated when the menu was opened
    pub devices: Vec<CameraDevice>,
}

/// The application model stores app-specific state used to describe its
/// interface and drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Camera session manager (device selection, mirror, start/stop)
    pub manager: CameraManager,
    /// Receiver half of the frame channel, drained by the subscription
    pub frame_receiver: Arc<tokio::sync::Mutex<FrameReceiver>>,
    /// Latest decoded preview frame, ready for the image widget
    pub current_frame: Option<widget::image::Handle>,
    /// Bubble window frame (origin + side length)
    pub geometry: BubbleGeometry,
    /// Last known camera permission
    pub permission: PermissionState,
    /// Whether the permission-denied dialog is shown
    pub denial_visible: bool,
    /// Right-click menu state
    pub menu: MenuState,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Permission flow =====
    /// Stored permission read at launch
    PermissionLoaded(PermissionState),
    /// The one-shot permission request was answered
    PermissionRequested(PermissionState),
    /// Open system settings from the denial dialog, then terminate
    OpenSettings,
    /// Terminate the application
    Quit,

    // ===== Camera =====
    /// New preview frame received from the pipeline
    CameraFrame(Arc<CameraFrame>),
    /// A camera was plugged in
    DeviceConnected(CameraDevice),
    /// A camera was unplugged
    DeviceDisconnected(CameraDevice),

    // ===== Content surface =====
    /// Scroll delta over the bubble (momentum already filtered)
    SurfaceScrolled(f32),
    /// Pinch magnification step over the bubble
    SurfaceMagnified(f32),
    /// Begin dragging the window from its background
    BeginDrag,
    /// Open the right-click menu
    OpenContextMenu,
    /// Close the right-click menu
    CloseContextMenu,
    /// A camera was picked from the menu
    SelectDevice(CameraDevice),
    /// The mirror menu item was toggled
    ToggleMirror,

    // ===== Window tracking =====
    /// The windowing system reported a new position
    WindowMoved(Point),
    /// The windowing system reported a new size
    WindowResized(Size),

    /// No-op message for widgets that must swallow an event
    Noop,
}
