//! Typed view of a motion record

use super::Record;
use crate::error::{ReplayError, Result};
use crate::types::{QuatXyzw, Vec3};

/// Frame rate assumed when a record has no `fps` field
pub const DEFAULT_FPS: f64 = 30.0;

/// A recorded robot motion: root pose plus joint angles per frame
///
/// All per-frame arrays are expected to have the same length. That is not
/// checked on load; a short array surfaces as
/// [`ReplayError::FrameOutOfRange`] when its missing frame is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRecord {
    /// Playback rate in frames per second
    pub fps: f64,
    /// Root position per frame
    pub root_pos: Vec<Vec3>,
    /// Root rotation per frame, scalar-last
    pub root_rot: Vec<QuatXyzw>,
    /// Joint angles per frame
    pub dof_pos: Vec<Vec<f64>>,
}

impl MotionRecord {
    /// Extract the motion fields from a loaded record
    pub fn from_record(record: &Record) -> Result<Self> {
        let fps = record.field::<f64>("fps")?.unwrap_or(DEFAULT_FPS);
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ReplayError::invalid_field("fps", format!("must be positive, got {}", fps)));
        }

        Ok(Self {
            fps,
            root_pos: record.required_field("root_pos")?,
            root_rot: record.required_field("root_rot")?,
            dof_pos: record.required_field("dof_pos")?,
        })
    }

    /// Number of frames, taken from the root position track
    pub fn frame_count(&self) -> usize {
        self.root_pos.len()
    }

    /// Check if the motion has no frames
    pub fn is_empty(&self) -> bool {
        self.root_pos.is_empty()
    }

    /// Root position at a frame
    pub fn root_pos_at(&self, index: usize) -> Result<&Vec3> {
        self.root_pos.get(index).ok_or(ReplayError::FrameOutOfRange {
            field: "root_pos",
            index,
            len: self.root_pos.len(),
        })
    }

    /// Joint angles at a frame
    pub fn dof_pos_at(&self, index: usize) -> Result<&[f64]> {
        self.dof_pos
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ReplayError::FrameOutOfRange {
                field: "dof_pos",
                index,
                len: self.dof_pos.len(),
            })
    }

    /// Number of joints in the first frame, if any
    pub fn dof_count(&self) -> Option<usize> {
        self.dof_pos.first().map(Vec::len)
    }
}
