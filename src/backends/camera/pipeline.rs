// SPDX-License-Identifier: GPL-3.0-only

//! Preview pipeline for camera capture
//!
//! Native GStreamer pipeline using `pipewiresrc`, converting to RGBA and
//! delivering frames to the UI through a bounded channel. Mirroring is a
//! `videoflip` element whose method can be flipped while the pipeline is
//! live.

use super::types::{BackendError, BackendResult, CameraDevice, CameraFrame, FrameSender};
use crate::constants::{pipeline, timing};
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Camera preview pipeline
///
/// Holds the session's single input. Constructing the pipeline attaches
/// the device; dropping it detaches and releases the camera.
pub struct PreviewPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl PreviewPipeline {
    /// Create a new preview pipeline for `device`.
    ///
    /// The pipeline is left in the Null state; [`play`](Self::play) starts
    /// capture. Construction fails if GStreamer or any element of the
    /// chain is unavailable, or if the launch description is rejected.
    pub fn new(device: &CameraDevice, mirrored: bool, frame_sender: FrameSender) -> BackendResult<Self> {
        gstreamer::init().map_err(|e| BackendError::NotAvailable(e.to_string()))?;

        let source = if device.target.is_empty() {
            // Empty target lets PipeWire pick its default camera
            "pipewiresrc".to_string()
        } else {
            format!("pipewiresrc target-object=\"{}\"", device.target)
        };

        let description = format!(
            "{source} ! queue max-size-buffers=1 leaky=downstream \
             ! videoconvert ! videoflip name=flip method={method} \
             ! videoconvert ! video/x-raw,format=RGBA ! appsink name=sink",
            method = flip_method(mirrored),
        );

        info!(device = %device.name, target = %device.target, "creating preview pipeline");
        debug!(%description, "pipeline description");

        let pipeline = gstreamer::parse::launch(&description)
            .map_err(|e| BackendError::InitializationFailed(e.to_string()))?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| {
                BackendError::InitializationFailed("parsed element is not a pipeline".to_string())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| BackendError::InitializationFailed("failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| BackendError::InitializationFailed("failed to cast appsink".to_string()))?;

        // Live preview wants the latest frame, not a backlog
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let pulled_at = Instant::now();

                    let sample = appsink
                        .pull_sample()
                        .map_err(|_| gstreamer::FlowError::Eos)?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info =
                        VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
                    let map = buffer
                        .map_readable()
                        .map_err(|_| gstreamer::FlowError::Error)?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        data: Arc::from(map.as_slice()),
                        captured_at: pulled_at,
                    };

                    // Non-blocking send; dropping frames is fine for a live
                    // preview when the UI falls behind
                    let mut sender = frame_sender.clone();
                    if let Err(error) = sender.try_send(frame) {
                        if error.is_disconnected() {
                            debug!("frame channel disconnected");
                            return Err(gstreamer::FlowError::Eos);
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        Ok(Self { pipeline, appsink })
    }

    /// Apply the mirror flag to the live video connection.
    ///
    /// Returns false when the pipeline carries no flip element, in which
    /// case mirroring is silently unsupported.
    pub fn set_mirrored(&self, mirrored: bool) -> bool {
        match self.pipeline.by_name("flip") {
            Some(flip) => {
                flip.set_property_from_str("method", flip_method(mirrored));
                true
            }
            None => false,
        }
    }

    /// Start capture.
    ///
    /// The state change to Playing completes asynchronously inside
    /// GStreamer; this call only kicks it off.
    pub fn play(&self) -> BackendResult<()> {
        self.pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| BackendError::StateChangeFailed(e.to_string()))?;
        info!("preview pipeline playing");
        Ok(())
    }

    /// Stop capture and release the camera.
    pub fn halt(&self) -> BackendResult<()> {
        self.pipeline
            .set_state(gstreamer::State::Null)
            .map_err(|e| BackendError::StateChangeFailed(e.to_string()))?;

        // Wait for the state change so the device is actually released
        let (result, state, _) = self
            .pipeline
            .state(gstreamer::ClockTime::from_seconds(timing::STOP_TIMEOUT_SECS));
        match result {
            Ok(_) => info!(?state, "preview pipeline stopped"),
            Err(error) => warn!(?error, ?state, "pipeline did not reach Null cleanly"),
        }

        Ok(())
    }
}

fn flip_method(mirrored: bool) -> &'static str {
    if mirrored { "horizontal-flip" } else { "none" }
}

impl Drop for PreviewPipeline {
    fn drop(&mut self) {
        // Clear callbacks first so no sample lands after teardown begins
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        debug!("preview pipeline dropped");
    }
}
