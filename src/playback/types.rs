//! Playback data types

use crate::types::RobotType;
use std::path::{Path, PathBuf};

/// Directory videos are written to
pub const VIDEO_DIR: &str = "videos";

/// State of a playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Frames are being sent to the viewer
    #[default]
    Running,
    /// Playback is over; terminal
    Stopped,
}

impl PlaybackState {
    /// Check if running
    pub fn is_running(&self) -> bool {
        matches!(self, PlaybackState::Running)
    }
}

/// Why playback stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every frame was shown (non-looping playback)
    Completed,
    /// The user interrupted playback
    Interrupted,
}

/// Outcome of a playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Number of frames sent to the viewer
    pub steps: usize,
    pub reason: StopReason,
}

/// Playback flags as requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackOptions {
    pub record_video: bool,
    pub looping: bool,
    pub headless: bool,
}

impl PlaybackOptions {
    /// Apply the flag implications
    ///
    /// Headless runs have no window, so the video is the only output and
    /// recording is switched on.
    pub fn resolve(self) -> Self {
        Self {
            record_video: self.record_video || self.headless,
            ..self
        }
    }
}

/// Where the video of a run is written: `videos/viz_{robot}_{stem}.mp4`
pub fn video_output_path(robot: RobotType, motion_file: &Path) -> PathBuf {
    let stem = motion_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Path::new(VIDEO_DIR).join(format!("viz_{}_{}.mp4", robot, stem))
}
