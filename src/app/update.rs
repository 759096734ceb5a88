// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function dispatches to focused handler methods.
//! All camera configuration (selection, mirror) runs here, on the UI
//! context; hotplug notifications arrive here already marshalled off
//! their originating threads by the subscription.

use crate::app::gestures;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::{CameraDevice, CameraFrame, HotplugEvent, enumeration};
use crate::permissions::{self, PermissionState};
use cosmic::Task;
use cosmic::iced::window;
use cosmic::widget;
use std::sync::Arc;
use tracing::{debug, info};

impl AppModel {
    /// Main message handler.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== Permission flow =====
            Message::PermissionLoaded(state) => self.handle_permission_loaded(state),
            Message::PermissionRequested(state) => self.handle_permission_requested(state),
            Message::OpenSettings => self.handle_open_settings(),
            Message::Quit => self.handle_quit(),

            // ===== Camera =====
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::DeviceConnected(device) => {
                self.handle_hotplug(HotplugEvent::Connected(device))
            }
            Message::DeviceDisconnected(device) => {
                self.handle_hotplug(HotplugEvent::Disconnected(device))
            }

            // ===== Content surface =====
            Message::SurfaceScrolled(delta_y) => self.handle_surface_scrolled(delta_y),
            Message::SurfaceMagnified(magnification) => {
                self.handle_surface_magnified(magnification)
            }
            Message::BeginDrag => self.handle_begin_drag(),
            Message::OpenContextMenu => self.handle_open_context_menu(),
            Message::CloseContextMenu => {
                self.menu.visible = false;
                Task::none()
            }
            Message::SelectDevice(device) => self.handle_select_device(device),
            Message::ToggleMirror => self.handle_toggle_mirror(),

            // ===== Window tracking =====
            Message::WindowMoved(position) => {
                self.geometry.record_moved(position);
                Task::none()
            }
            Message::WindowResized(size) => {
                self.geometry.record_resized(size);
                Task::none()
            }

            Message::Noop => Task::none(),
        }
    }

    // =========================================================================
    // Permission flow
    // =========================================================================

    fn handle_permission_loaded(
        &mut self,
        state: PermissionState,
    ) -> Task<cosmic::Action<Message>> {
        info!(?state, "camera permission at launch");
        self.permission = state;

        match state {
            PermissionState::Authorized => {
                self.manager.select_default();
                self.manager.start();
                Task::none()
            }
            PermissionState::Undetermined => Task::perform(
                async { permissions::request().await },
                |state| cosmic::Action::App(Message::PermissionRequested(state)),
            ),
            PermissionState::Denied => {
                self.denial_visible = true;
                Task::none()
            }
        }
    }

    fn handle_permission_requested(
        &mut self,
        state: PermissionState,
    ) -> Task<cosmic::Action<Message>> {
        self.permission = state;

        match state {
            PermissionState::Authorized => {
                self.manager.select_default();
                self.manager.start();
            }
            _ => {
                self.denial_visible = true;
            }
        }
        Task::none()
    }

    fn handle_open_settings(&mut self) -> Task<cosmic::Action<Message>> {
        permissions::open_privacy_settings();
        std::process::exit(0);
    }

    fn handle_quit(&mut self) -> Task<cosmic::Action<Message>> {
        std::process::exit(0);
    }

    // =========================================================================
    // Camera
    // =========================================================================

    fn handle_camera_frame(&mut self, frame: Arc<CameraFrame>) -> Task<cosmic::Action<Message>> {
        self.current_frame = Some(widget::image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.data.to_vec(),
        ));
        Task::none()
    }

    fn handle_hotplug(&mut self, event: HotplugEvent) -> Task<cosmic::Action<Message>> {
        self.manager.handle_hotplug(&event);

        // Keep an open menu in sync with the new device list
        if self.menu.visible {
            self.menu.devices = enumeration::enumerate();
        }
        Task::none()
    }

    // =========================================================================
    // Content surface
    // =========================================================================

    fn handle_surface_scrolled(&mut self, delta_y: f32) -> Task<cosmic::Action<Message>> {
        let requested = gestures::scroll_request(self.geometry.side, delta_y);
        self.resize_bubble(requested)
    }

    fn handle_surface_magnified(&mut self, magnification: f32) -> Task<cosmic::Action<Message>> {
        let requested = gestures::magnify_request(self.geometry.side, magnification);
        self.resize_bubble(requested)
    }

    /// Clamp the requested side, preserve the center, and apply the new
    /// frame immediately.
    fn resize_bubble(&mut self, requested: f32) -> Task<cosmic::Action<Message>> {
        self.geometry = self.geometry.resized(requested);
        debug!(side = self.geometry.side, "bubble resized");

        let Some(id) = self.core.main_window_id() else {
            return Task::none();
        };

        Task::batch([
            window::resize(id, self.geometry.size()),
            window::move_to(id, self.geometry.origin),
        ])
    }

    fn handle_begin_drag(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(id) = self.core.main_window_id() else {
            return Task::none();
        };
        window::drag(id)
    }

    fn handle_open_context_menu(&mut self) -> Task<cosmic::Action<Message>> {
        // Rebuilt on every open from a live enumeration
        self.menu.devices = enumeration::enumerate();
        self.menu.visible = true;
        Task::none()
    }

    fn handle_select_device(&mut self, device: CameraDevice) -> Task<cosmic::Action<Message>> {
        self.manager.select(&device);
        self.menu.visible = false;
        Task::none()
    }

    fn handle_toggle_mirror(&mut self) -> Task<cosmic::Action<Message>> {
        self.manager.toggle_mirror();
        self.menu.visible = false;
        Task::none()
    }
}
