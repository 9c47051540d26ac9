//! Motion visualization workflow
//!
//! [`PlaybackPlan`] captures every decision that has to be made before the
//! viewer exists: which robot, which flags after implications, where the
//! video goes, and which rendering backend the viewer must start with.
//! [`visualize_motion`] then loads the record and plays it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cli::VisualizeArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::playback::{
    video_output_path, MotionPlayer, PlaybackOptions, PlaybackSummary, StopReason,
};
use crate::record::{MotionRecord, Record};
use crate::render::RenderEnvironment;
use crate::types::RobotType;
use crate::viewer::{MotionViewer, SubprocessViewer, ViewerOptions};

/// Resolved settings for one visualization run
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackPlan {
    pub motion_file: PathBuf,
    pub robot: RobotType,
    /// Flags with implications applied
    pub options: PlaybackOptions,
    /// Set when recording
    pub video_path: Option<PathBuf>,
    pub render: RenderEnvironment,
}

impl PlaybackPlan {
    /// Resolve a plan from explicit settings
    pub fn new(
        motion_file: impl Into<PathBuf>,
        robot: RobotType,
        options: PlaybackOptions,
        config: &AppConfig,
    ) -> Self {
        let motion_file = motion_file.into();
        let options = options.resolve();
        let video_path = options
            .record_video
            .then(|| video_output_path(robot, &motion_file));
        let render =
            RenderEnvironment::for_headless(options.headless, config.render.headless_backend);

        Self {
            motion_file,
            robot,
            options,
            video_path,
            render,
        }
    }

    /// Resolve a plan from command-line arguments
    pub fn from_args(args: &VisualizeArgs, config: &AppConfig) -> Self {
        Self::new(
            &args.motion_file,
            args.robot.unwrap_or(config.default_robot),
            args.playback_options(),
            config,
        )
    }

    /// Options handed to the viewer for a motion at `motion_fps`
    pub fn viewer_options(&self, motion_fps: f64) -> ViewerOptions {
        ViewerOptions {
            robot_type: self.robot,
            motion_fps,
            record_video: self.options.record_video,
            video_path: self.video_path.clone(),
            camera_follow: true,
            headless: self.options.headless,
        }
    }
}

/// Load a motion record from disk
pub fn load_motion(path: &Path) -> Result<MotionRecord> {
    tracing::info!("Loading motion from {}", path.display());
    let record = Record::load(path)?;
    let motion = MotionRecord::from_record(&record)?;
    tracing::info!("Loaded {} frames, FPS: {}", motion.frame_count(), motion.fps);
    if motion.is_empty() {
        tracing::warn!("Motion {} has no frames", path.display());
    }
    if let Some(dofs) = motion.dof_count() {
        tracing::debug!("{} joint angles per frame", dofs);
    }
    Ok(motion)
}

/// Load and play a motion through a viewer built by `open_viewer`
///
/// An interrupt that arrives while the record loads ends the run before a
/// viewer is started.
pub fn visualize_motion_with<V, F>(
    plan: &PlaybackPlan,
    running: &AtomicBool,
    open_viewer: F,
) -> Result<PlaybackSummary>
where
    V: MotionViewer,
    F: FnOnce(&ViewerOptions, &RenderEnvironment) -> Result<V>,
{
    let motion = load_motion(&plan.motion_file)?;
    if !running.load(Ordering::SeqCst) {
        tracing::info!("Interrupted by user before playback");
        return Ok(PlaybackSummary {
            steps: 0,
            reason: StopReason::Interrupted,
        });
    }

    if let Some(path) = &plan.video_path {
        tracing::info!("Recording video to {}", path.display());
    }

    let viewer = open_viewer(&plan.viewer_options(motion.fps), &plan.render)?;
    MotionPlayer::new(&motion, plan.options.looping).run(viewer, running)
}

/// Load and play a motion through the configured viewer process
///
/// The viewer is armed on `interrupt` from launch until playback returns, so
/// a repeated interrupt can kill it even while a request is pending.
pub fn visualize_motion(
    plan: &PlaybackPlan,
    config: &AppConfig,
    interrupt: &Interrupt,
) -> Result<PlaybackSummary> {
    let result = visualize_motion_with(plan, interrupt.running(), |options, render| {
        let mut viewer = SubprocessViewer::launch(&config.viewer, render)?;
        interrupt.arm(viewer.kill_switch());
        viewer.send_open(options)?;
        Ok(viewer)
    });
    interrupt.disarm();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderBackend;

    #[test]
    fn test_plan_headless_records_offscreen() {
        let plan = PlaybackPlan::new(
            "foo/bar/walk_01.pkl",
            RobotType::UnitreeG1,
            PlaybackOptions {
                headless: true,
                ..Default::default()
            },
            &AppConfig::default(),
        );

        assert!(plan.options.record_video);
        assert_eq!(
            plan.video_path,
            Some(PathBuf::from("videos/viz_unitree_g1_walk_01.mp4"))
        );
        assert_eq!(plan.render.backend, RenderBackend::Egl);
    }

    #[test]
    fn test_plan_interactive_without_recording() {
        let plan = PlaybackPlan::new(
            "walk.pkl",
            RobotType::FourierN1,
            PlaybackOptions::default(),
            &AppConfig::default(),
        );

        assert_eq!(plan.video_path, None);
        assert_eq!(plan.render, RenderEnvironment::default());

        let options = plan.viewer_options(50.0);
        assert_eq!(options.motion_fps, 50.0);
        assert!(options.camera_follow);
        assert!(!options.record_video);
    }

    #[test]
    fn test_interrupt_during_load_skips_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.json");
        std::fs::write(&path, r#"{"root_pos": [], "root_rot": [], "dof_pos": []}"#).unwrap();
        let plan = PlaybackPlan::new(
            &path,
            RobotType::UnitreeG1,
            PlaybackOptions::default(),
            &AppConfig::default(),
        );

        let summary = visualize_motion_with(
            &plan,
            &AtomicBool::new(false),
            |_, _| -> Result<crate::viewer::MockMotionViewer> {
                panic!("viewer opened after interrupt")
            },
        )
        .unwrap();

        assert_eq!(summary.steps, 0);
        assert_eq!(summary.reason, StopReason::Interrupted);
    }

    #[test]
    fn test_plan_uses_config_defaults() {
        let mut config = AppConfig::default();
        config.default_robot = RobotType::KuavoS45;
        config.render.headless_backend = RenderBackend::Osmesa;

        let args = VisualizeArgs {
            motion_file: PathBuf::from("clips/jump.pkl"),
            robot: None,
            record_video: false,
            looping: false,
            headless: true,
            config: None,
        };
        let plan = PlaybackPlan::from_args(&args, &config);

        assert_eq!(plan.robot, RobotType::KuavoS45);
        assert_eq!(plan.render.backend, RenderBackend::Osmesa);
        assert_eq!(
            plan.video_path,
            Some(PathBuf::from("videos/viz_kuavo_s45_jump.mp4"))
        );
    }

    #[test]
    fn test_cli_robot_beats_config() {
        let mut config = AppConfig::default();
        config.default_robot = RobotType::KuavoS45;

        let args = VisualizeArgs {
            motion_file: PathBuf::from("jump.pkl"),
            robot: Some(RobotType::Openloong),
            record_video: true,
            looping: false,
            headless: false,
            config: None,
        };
        let plan = PlaybackPlan::from_args(&args, &config);

        assert_eq!(plan.robot, RobotType::Openloong);
        assert_eq!(plan.render.backend, RenderBackend::Native);
        assert!(plan.video_path.is_some());
    }
}
