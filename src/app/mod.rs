// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for Bubble
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message)
//! - `geometry`: Bubble window frame math (clamping, center-preserving resize)
//! - `gestures`: Gesture-to-resize translation and momentum filtering
//! - `surface`: Gesture surface widget wrapping the preview
//! - `view`: Bubble rendering, context menu, denial dialog
//! - `update`: Message handling
//!
//! Startup ordering is deliberate: the bubble window appears immediately
//! and stays blank while permission is resolved and capture spins up.

pub mod geometry;
pub mod gestures;
mod state;
mod surface;
mod update;
mod view;

use crate::backends::camera::{CameraManager, enumeration};
use crate::constants::pipeline;
use crate::permissions::{self, PermissionState};
use cosmic::iced::Subscription;
use cosmic::iced::window::{self, Level};
use cosmic::{Element, Task};
pub use state::{AppModel, MenuState, Message};
use std::sync::Arc;
use tracing::{error, info, warn};

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic-utils.bubble";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        mut core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // The bubble is chrome-free; the window is its content
        core.window.show_headerbar = false;

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        // Frames flow from the appsink callback into the subscription
        // through this channel
        let (frame_sender, frame_receiver) =
            futures::channel::mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);

        let manager = CameraManager::new(frame_sender);

        let app = AppModel {
            core,
            manager,
            frame_receiver: Arc::new(tokio::sync::Mutex::new(frame_receiver)),
            current_frame: None,
            geometry: geometry::BubbleGeometry::default(),
            permission: PermissionState::Undetermined,
            denial_visible: false,
            menu: MenuState::default(),
        };

        // Raise the bubble to the floating level as soon as the window
        // exists; the permission check runs concurrently so the (blank)
        // bubble is visible before capture starts
        let level_task = match app.core.main_window_id() {
            Some(id) => window::change_level(id, Level::AlwaysOnTop),
            None => Task::none(),
        };

        let permission_task = Task::perform(
            async { permissions::query(Self::APP_ID).await },
            |state| cosmic::Action::App(Message::PermissionLoaded(state)),
        );

        (app, Task::batch([level_task, permission_task]))
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Display the permission-denied dialog when the flow requires it.
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        if self.denial_visible {
            Some(self.build_denial_dialog())
        } else {
            None
        }
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        // Forward decoded frames from the pipeline channel to update()
        let frame_rx = Arc::clone(&self.frame_receiver);
        let frame_sub = Subscription::run_with_id(
            "camera-frames",
            cosmic::iced::stream::channel(
                pipeline::FRAME_CHANNEL_CAPACITY,
                move |mut output| async move {
                    let mut receiver = frame_rx.lock().await;
                    while let Some(frame) = receiver.next().await {
                        if output
                            .send(Message::CameraFrame(Arc::new(frame)))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    info!("frame forwarding stopped");
                },
            ),
        );

        // Device monitor notifications originate on GStreamer threads;
        // forwarding them through this channel marshals them onto the
        // update context before any shared state is touched
        let hotplug_sub = Subscription::run_with_id(
            "camera-hotplug",
            cosmic::iced::stream::channel(10, move |mut output| async move {
                let monitor = match enumeration::video_source_monitor() {
                    Ok(monitor) => monitor,
                    Err(error) => {
                        warn!(%error, "hotplug monitoring unavailable");
                        return;
                    }
                };

                if let Err(error) = monitor.start() {
                    warn!(%error, "failed to start hotplug monitor");
                    return;
                }

                info!("camera hotplug monitoring started");

                let bus = monitor.bus();
                let mut messages = bus.stream();
                while let Some(message) = messages.next().await {
                    let forwarded = match message.view() {
                        gstreamer::MessageView::DeviceAdded(added) => Some(
                            Message::DeviceConnected(enumeration::device_from_gst(&added.device())),
                        ),
                        gstreamer::MessageView::DeviceRemoved(removed) => {
                            Some(Message::DeviceDisconnected(enumeration::device_from_gst(
                                &removed.device(),
                            )))
                        }
                        _ => None,
                    };

                    if let Some(message) = forwarded {
                        if output.send(message).await.is_err() {
                            break;
                        }
                    }
                }

                monitor.stop();
                info!("camera hotplug monitoring stopped");
            }),
        );

        // Track the frame the windowing system actually gave us so
        // resizes preserve the real center
        let window_sub = cosmic::iced::event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Window(window::Event::Moved(position)) => {
                Some(Message::WindowMoved(position))
            }
            cosmic::iced::Event::Window(window::Event::Resized(size)) => {
                Some(Message::WindowResized(size))
            }
            _ => None,
        });

        Subscription::batch([frame_sub, hotplug_sub, window_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
