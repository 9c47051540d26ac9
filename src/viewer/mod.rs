//! Robot motion viewer interface
//!
//! The viewer is an external collaborator: it owns the robot model, the
//! renderer and the video encoder. This crate only drives it, through the
//! [`MotionViewer`] trait:
//!
//! - construction from [`ViewerOptions`] plus a
//!   [`RenderEnvironment`](crate::render::RenderEnvironment)
//!   (see [`SubprocessViewer::launch`] and [`SubprocessViewer::send_open`])
//! - [`MotionViewer::step`] - show one frame, blocking until it is rendered
//!   (and encoded, when recording)
//! - [`MotionViewer::close`] - release the viewer and flush any video
//!
//! [`ViewerGuard`] ties a viewer's lifetime to a scope so that it is closed
//! on every exit path.

pub mod bridge;
pub mod protocol;

pub use bridge::{KillSwitch, SubprocessViewer};

use crate::error::Result;
use crate::types::{QuatWxyz, RobotType, Vec3};
use serde::Serialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

/// Everything a viewer needs to know at construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerOptions {
    /// Robot model to load
    pub robot_type: RobotType,
    /// Frame rate of the motion being played
    pub motion_fps: f64,
    /// Whether to encode a video of the playback
    pub record_video: bool,
    /// Where to write the video, set when recording
    pub video_path: Option<PathBuf>,
    /// Keep the camera on the robot root
    pub camera_follow: bool,
    /// Run without a window
    pub headless: bool,
}

/// Interface to a robot motion viewer
#[cfg_attr(test, mockall::automock)]
pub trait MotionViewer {
    /// Show one frame
    ///
    /// Blocks until the viewer has processed the frame.
    fn step(
        &mut self,
        root_pos: &Vec3,
        root_rot: &QuatWxyz,
        dof_pos: &[f64],
        follow_camera: bool,
    ) -> Result<()>;

    /// Release the viewer, flushing any pending video
    ///
    /// Calling `close` more than once must be harmless.
    fn close(&mut self) -> Result<()>;
}

/// Scope guard that closes a viewer when dropped
///
/// Call [`ViewerGuard::close`] on the normal path to observe close errors;
/// on early returns and unwinding the drop handler closes the viewer and
/// logs any failure.
pub struct ViewerGuard<V: MotionViewer> {
    viewer: V,
    closed: bool,
}

impl<V: MotionViewer> ViewerGuard<V> {
    /// Take ownership of an open viewer
    pub fn new(viewer: V) -> Self {
        Self {
            viewer,
            closed: false,
        }
    }

    /// Close the viewer and report the outcome
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.viewer.close()
    }
}

impl<V: MotionViewer> Deref for ViewerGuard<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.viewer
    }
}

impl<V: MotionViewer> DerefMut for ViewerGuard<V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.viewer
    }
}

impl<V: MotionViewer> Drop for ViewerGuard<V> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.viewer.close() {
            tracing::warn!("Failed to close viewer: {}", e);
        }
    }
}
