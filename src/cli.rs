//! CLI argument definitions for both binaries.
//!
//! The `#[derive(Parser)]` types live in the library so the flag surface can
//! be tested without spawning the binaries.

use crate::playback::PlaybackOptions;
use crate::types::RobotType;
use clap::Parser;
use std::path::PathBuf;

/// Visualize robot motion from a .pkl file
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "visualize-motion")]
#[command(version, about, long_about = None)]
pub struct VisualizeArgs {
    /// Path to the .pkl motion file
    #[arg(long = "motion_file")]
    pub motion_file: PathBuf,

    /// Robot type [default: unitree_g1, or `default_robot` from the config]
    #[arg(long, value_enum)]
    pub robot: Option<RobotType>,

    /// Record video
    #[arg(long = "record_video")]
    pub record_video: bool,

    /// Loop the animation
    #[arg(long = "loop")]
    pub looping: bool,

    /// Run in headless mode (no window, output video only)
    #[arg(long)]
    pub headless: bool,

    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl VisualizeArgs {
    /// Playback flags as given, before implications are applied
    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            record_video: self.record_video,
            looping: self.looping,
            headless: self.headless,
        }
    }
}

/// Compare the link_body_list of two motion records
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "compare-bodies")]
#[command(version, about, long_about = None)]
pub struct CompareArgs {
    /// First record (.pkl or .json)
    pub first: PathBuf,

    /// Second record (.pkl or .json)
    pub second: PathBuf,

    /// Path to an alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
