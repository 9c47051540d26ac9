//! Motion player that steps a viewer through a recorded motion

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ReplayError, Result, ResultExt};
use crate::record::MotionRecord;
use crate::types::{convert_root_rotations, Frame, QuatWxyz};
use crate::viewer::{MotionViewer, ViewerGuard};

use super::types::{PlaybackState, PlaybackSummary, StopReason};

/// Frame to show at a given step, `None` once playback is over
///
/// Looping playback wraps around forever; a motion without frames has
/// nothing to loop over and ends immediately.
pub fn frame_index(step: usize, frame_count: usize, looping: bool) -> Option<usize> {
    if looping {
        (frame_count > 0).then(|| step % frame_count)
    } else {
        (step < frame_count).then_some(step)
    }
}

/// Plays a motion record through a viewer, one frame per step
#[derive(Debug)]
pub struct MotionPlayer<'a> {
    /// The motion being played
    motion: &'a MotionRecord,
    /// Root rotations converted to the viewer's convention
    root_rot: Vec<QuatWxyz>,
    /// Whether to loop playback
    looping: bool,
    /// Ask the viewer to keep the camera on the robot
    follow_camera: bool,
    /// Current playback state
    state: PlaybackState,
    /// Number of frames sent so far
    steps: usize,
}

impl<'a> MotionPlayer<'a> {
    /// Create a player positioned at frame 0
    pub fn new(motion: &'a MotionRecord, looping: bool) -> Self {
        Self {
            motion,
            root_rot: convert_root_rotations(&motion.root_rot),
            looping,
            follow_camera: true,
            state: PlaybackState::Running,
            steps: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of frames sent to the viewer so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Frame the next step will show
    pub fn next_frame(&self) -> Option<usize> {
        if !self.state.is_running() {
            return None;
        }
        frame_index(self.steps, self.motion.frame_count(), self.looping)
    }

    /// Assemble the data for one frame
    pub fn frame(&self, index: usize) -> Result<Frame<'_>> {
        let root_rot = self.root_rot.get(index).ok_or(ReplayError::FrameOutOfRange {
            field: "root_rot",
            index,
            len: self.root_rot.len(),
        })?;

        Ok(Frame {
            root_pos: self.motion.root_pos_at(index)?,
            root_rot,
            dof_pos: self.motion.dof_pos_at(index)?,
        })
    }

    /// Stop playback; no further frames are sent
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Send the next frame to the viewer
    ///
    /// Returns `Ok(false)` without touching the viewer once playback is
    /// over. Any error stops playback.
    pub fn step<V: MotionViewer + ?Sized>(&mut self, viewer: &mut V) -> Result<bool> {
        let Some(index) = self.next_frame() else {
            self.stop();
            return Ok(false);
        };

        let result = self.frame(index).and_then(|frame| {
            viewer.step(
                frame.root_pos,
                frame.root_rot,
                frame.dof_pos,
                self.follow_camera,
            )
        });
        if let Err(e) = result {
            self.stop();
            return Err(e).with_context(|| format!("Failed to show frame {}", index));
        }

        self.steps += 1;
        tracing::trace!("Showed frame {} (step {})", index, self.steps);
        Ok(true)
    }

    /// Play until the motion ends or `running` is cleared
    ///
    /// The viewer is closed on every path out of this function. Clearing
    /// `running` takes effect before the next frame is sent.
    pub fn run<V: MotionViewer>(
        mut self,
        viewer: V,
        running: &AtomicBool,
    ) -> Result<PlaybackSummary> {
        let mut viewer = ViewerGuard::new(viewer);

        let reason = loop {
            if !running.load(Ordering::SeqCst) {
                tracing::info!("Interrupted by user");
                self.stop();
                break StopReason::Interrupted;
            }
            if !self.step(&mut *viewer)? {
                break StopReason::Completed;
            }
        };

        viewer.close().context("Failed to close viewer")?;

        tracing::info!("Playback {:?} after {} steps", reason, self.steps);
        Ok(PlaybackSummary {
            steps: self.steps,
            reason,
        })
    }
}
