//! # motion-replay: Retargeted Motion Tools
//!
//! Two command-line tools for working with retargeted humanoid motion
//! records, built on this library:
//!
//! - **`visualize-motion`** replays a motion (root position, root rotation
//!   and joint angles per frame) through a robot viewer, optionally
//!   recording a video. `--headless` renders off-screen and always records.
//! - **`compare-bodies`** reports how the `link_body_list` of two records
//!   differ.
//!
//! ## Architecture
//!
//! - **Records**: pickle or JSON key-value files, see [`record`]
//! - **Playback**: a frame-stepping loop over a [`viewer::MotionViewer`],
//!   see [`playback`]
//! - **Viewer**: the renderer is external; [`viewer::SubprocessViewer`]
//!   drives it as a child process over line-delimited JSON
//! - **Rendering backend**: decided before the viewer starts and passed to
//!   it explicitly, see [`render`]
//! - **Interrupts**: Ctrl-C stops after the current frame, a second one
//!   kills an unresponsive viewer, see [`interrupt`]
//!
//! ## Example
//!
//! ```ignore
//! use motion_replay::{app, cli::VisualizeArgs, config::AppConfig, Interrupt};
//!
//! let args = VisualizeArgs::parse();
//! let config = AppConfig::load(args.config.as_deref())?;
//! let plan = app::PlaybackPlan::from_args(&args, &config);
//! let summary = app::visualize_motion(&plan, &config, &Interrupt::new())?;
//! println!("showed {} frames", summary.steps);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod interrupt;
pub mod logging;
pub mod playback;
pub mod record;
pub mod render;
pub mod types;
pub mod viewer;

// Re-export commonly used types
pub use app::PlaybackPlan;
pub use config::AppConfig;
pub use diff::{compare_files, BodyList, BodyListDiff, ComparisonReport};
pub use error::{ReplayError, Result};
pub use interrupt::{Escalation, Interrupt};
pub use playback::{MotionPlayer, PlaybackOptions, PlaybackSummary, StopReason};
pub use record::{MotionRecord, Record};
pub use render::{RenderBackend, RenderEnvironment};
pub use types::{QuatWxyz, QuatXyzw, RobotType};
pub use viewer::{KillSwitch, MotionViewer, SubprocessViewer, ViewerOptions};
