//! visualize-motion - replay a recorded robot motion through the viewer
//!
//! Loads a retargeted motion record and steps the robot viewer through it
//! frame by frame, optionally recording a video. `--headless` renders
//! off-screen and always records.
//!
//! Ctrl-C stops after the current frame and closes the viewer; a second
//! Ctrl-C kills a viewer that stopped responding.

use anyhow::Context;
use clap::Parser;
use motion_replay::{
    app::{self, PlaybackPlan},
    cli::VisualizeArgs,
    config::AppConfig,
    logging,
    playback::StopReason,
    Escalation, Interrupt,
};
use std::sync::Arc;

/// Exit status after a second Ctrl-C with no viewer to kill
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() -> anyhow::Result<()> {
    let args = VisualizeArgs::parse();

    let (config, config_error) = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    let _log_guard = logging::init(&config.logging)?;
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    // The rendering backend is fixed here, before any viewer exists
    let plan = PlaybackPlan::from_args(&args, &config);
    tracing::debug!("Playback plan: {:?}", plan);

    let interrupt = Arc::new(Interrupt::new());
    let handler_interrupt = interrupt.clone();
    ctrlc::set_handler(move || {
        if handler_interrupt.signal() == Escalation::Exit {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
    .context("Failed to install Ctrl-C handler")?;

    let summary = app::visualize_motion(&plan, &config, &interrupt)
        .with_context(|| format!("Failed to visualize {}", plan.motion_file.display()))?;

    match summary.reason {
        StopReason::Completed => tracing::info!("Finished after {} frames", summary.steps),
        StopReason::Interrupted => tracing::info!("Stopped after {} frames", summary.steps),
    }
    if let Some(path) = plan.video_path.as_ref().filter(|_| summary.steps > 0) {
        tracing::info!("Video written to {}", path.display());
    }

    Ok(())
}
