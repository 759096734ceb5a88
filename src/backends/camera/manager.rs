// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle manager
//!
//! The manager owns the active capture pipeline and the mirror flag, and
//! provides:
//! - Device selection (remove-then-add under one lock acquisition)
//! - Mirror toggling, reapplied to the live pipeline
//! - Start/stop dispatched to a dedicated session worker thread
//! - Hotplug reaction planning
//!
//! All selection and mirror calls are fast graph mutations and run on the
//! caller's (UI) context; only the blocking start/stop state changes are
//! offloaded to the worker.

use super::enumeration;
use super::pipeline::PreviewPipeline;
use super::types::{CameraDevice, FrameSender};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// A device monitor notification, already marshalled onto the UI context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotplugEvent {
    Connected(CameraDevice),
    Disconnected(CameraDevice),
}

/// What the manager should do in response to a hotplug event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotplugAction {
    /// Nothing to do
    Ignore,
    /// A device appeared while none was selected: select the default
    SelectDefault,
    /// The active device vanished: clear it, then select the default
    ReplaceLost,
}

/// Decide how to react to a hotplug event given the current selection.
pub fn plan_hotplug(current: Option<&CameraDevice>, event: &HotplugEvent) -> HotplugAction {
    match event {
        HotplugEvent::Connected(_) => {
            if current.is_none() {
                HotplugAction::SelectDefault
            } else {
                HotplugAction::Ignore
            }
        }
        HotplugEvent::Disconnected(device) => {
            if current == Some(device) {
                HotplugAction::ReplaceLost
            } else {
                HotplugAction::Ignore
            }
        }
    }
}

/// Internal manager state
struct Inner {
    /// The active pipeline; `None` when no input is attached
    pipeline: Option<PreviewPipeline>,
    /// The device the pipeline was built for
    current: Option<CameraDevice>,
    /// Horizontal mirror flag, in-memory only for the process lifetime
    mirrored: bool,
    /// Whether the session should be live (so a device switch restarts it)
    running: bool,
}

/// Camera session manager
pub struct CameraManager {
    inner: Arc<Mutex<Inner>>,
    worker: SessionWorker,
    frame_sender: FrameSender,
}

impl CameraManager {
    /// Create a manager with no device selected.
    ///
    /// Frames from whichever device is later selected flow into
    /// `frame_sender`.
    pub fn new(frame_sender: FrameSender) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            pipeline: None,
            current: None,
            mirrored: true,
            running: false,
        }));

        let worker = SessionWorker::spawn(Arc::clone(&inner));

        Self {
            inner,
            worker,
            frame_sender,
        }
    }

    /// The currently selected device, if any.
    pub fn current_device(&self) -> Option<CameraDevice> {
        self.inner.lock().unwrap().current.clone()
    }

    /// Whether the preview is horizontally mirrored.
    pub fn is_mirrored(&self) -> bool {
        self.inner.lock().unwrap().mirrored
    }

    /// Select the system default camera; silent no-op when none exists.
    pub fn select_default(&self) {
        match enumeration::default_device() {
            Some(device) => self.select(&device),
            None => debug!("no default camera available"),
        }
    }

    /// Select `device` as the session's input.
    ///
    /// The existing input is removed and the new one attached under a
    /// single lock acquisition. When pipeline construction fails the
    /// session is left with no input and no current device; the bubble
    /// simply stays blank until the next hotplug event or manual
    /// selection.
    pub fn select(&self, device: &CameraDevice) {
        let mut inner = self.inner.lock().unwrap();

        // Remove the existing input first; dropping the pipeline releases
        // the old camera before the new one is opened
        inner.pipeline = None;

        match PreviewPipeline::new(device, inner.mirrored, self.frame_sender.clone()) {
            Ok(pipeline) => {
                info!(device = %device.name, "selected camera");
                inner.pipeline = Some(pipeline);
                inner.current = Some(device.clone());
                if inner.running {
                    self.worker.dispatch(SessionCommand::Start);
                }
            }
            Err(error) => {
                warn!(device = %device.name, %error, "camera selection failed");
                inner.current = None;
            }
        }
    }

    /// Flip the mirror flag and reapply it to the active connection.
    ///
    /// Returns the new flag value. A pipeline without a flip element
    /// ignores the change.
    pub fn toggle_mirror(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.mirrored = !inner.mirrored;

        if let Some(pipeline) = &inner.pipeline {
            if !pipeline.set_mirrored(inner.mirrored) {
                debug!("preview pipeline does not support mirroring");
            }
        }

        info!(mirrored = inner.mirrored, "mirror toggled");
        inner.mirrored
    }

    /// Start capture on the session worker; never blocks the caller.
    pub fn start(&self) {
        self.inner.lock().unwrap().running = true;
        self.worker.dispatch(SessionCommand::Start);
    }

    /// Stop capture on the session worker; never blocks the caller.
    pub fn stop(&self) {
        self.inner.lock().unwrap().running = false;
        self.worker.dispatch(SessionCommand::Stop);
    }

    /// React to a device monitor notification.
    ///
    /// Must be called from the UI context; notifications are marshalled
    /// there by the hotplug subscription before they reach the manager.
    pub fn handle_hotplug(&self, event: &HotplugEvent) {
        let action = plan_hotplug(self.current_device().as_ref(), event);
        debug!(?event, ?action, "hotplug event");

        match action {
            HotplugAction::Ignore => {}
            HotplugAction::SelectDefault => self.select_default(),
            HotplugAction::ReplaceLost => {
                {
                    let mut inner = self.inner.lock().unwrap();
                    inner.pipeline = None;
                    inner.current = None;
                }
                self.select_default();
            }
        }
    }
}

impl std::fmt::Debug for CameraManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap();
        f.debug_struct("CameraManager")
            .field("current", &inner.current)
            .field("mirrored", &inner.mirrored)
            .field("running", &inner.running)
            .finish()
    }
}

/// Commands handled by the session worker thread
enum SessionCommand {
    Start,
    Stop,
}

/// Dedicated background context for the session's blocking state changes.
///
/// A single thread serializes Start/Stop so they can never interleave;
/// dispatch is a channel send and returns immediately.
struct SessionWorker {
    sender: Option<mpsc::Sender<SessionCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl SessionWorker {
    fn spawn(inner: Arc<Mutex<Inner>>) -> Self {
        let (sender, receiver) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            while let Ok(command) = receiver.recv() {
                let guard = inner.lock().unwrap();
                let Some(pipeline) = &guard.pipeline else {
                    debug!("session command with no pipeline attached");
                    continue;
                };

                let result = match command {
                    SessionCommand::Start => pipeline.play(),
                    SessionCommand::Stop => pipeline.halt(),
                };

                if let Err(error) = result {
                    warn!(%error, "session state change failed");
                }
            }
            debug!("session worker exiting");
        });

        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    fn dispatch(&self, command: SessionCommand) {
        if let Some(sender) = &self.sender {
            if sender.send(command).is_err() {
                warn!("session worker is gone");
            }
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
