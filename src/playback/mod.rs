//! Motion playback
//!
//! This module turns a loaded [`MotionRecord`](crate::record::MotionRecord)
//! into a sequence of viewer steps.
//!
//! # Features
//!
//! - Root rotations converted once, up front, from scalar-last to scalar-first
//! - Play once, or loop until interrupted
//! - Interrupts handled as an orderly stop, not an error
//! - The viewer is closed on every exit path
//! - Deterministic video paths for recorded runs

pub mod player;
pub mod types;

pub use player::{frame_index, MotionPlayer};
pub use types::{
    video_output_path, PlaybackOptions, PlaybackState, PlaybackSummary, StopReason, VIDEO_DIR,
};
