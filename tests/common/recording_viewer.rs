//! In-memory viewer that records what it is asked to show

use motion_replay::types::{QuatWxyz, Vec3};
use motion_replay::{MotionViewer, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One `step` call as seen by the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ShownFrame {
    pub root_pos: Vec3,
    pub root_rot: QuatWxyz,
    pub dof_pos: Vec<f64>,
    pub follow_camera: bool,
}

/// Everything the viewer saw, shared with the test after the viewer is consumed
#[derive(Debug, Default)]
pub struct ViewerLog {
    pub frames: Vec<ShownFrame>,
    pub close_calls: usize,
}

/// Viewer that logs every call and can clear a run flag after N steps
pub struct RecordingViewer {
    log: Arc<Mutex<ViewerLog>>,
    interrupt_after: Option<(usize, Arc<AtomicBool>)>,
}

impl RecordingViewer {
    pub fn new() -> (Self, Arc<Mutex<ViewerLog>>) {
        let log = Arc::new(Mutex::new(ViewerLog::default()));
        (
            Self {
                log: log.clone(),
                interrupt_after: None,
            },
            log,
        )
    }

    /// Simulate Ctrl-C arriving while frame `steps` is being rendered
    pub fn interrupt_after(mut self, steps: usize, running: Arc<AtomicBool>) -> Self {
        self.interrupt_after = Some((steps, running));
        self
    }
}

impl MotionViewer for RecordingViewer {
    fn step(
        &mut self,
        root_pos: &Vec3,
        root_rot: &QuatWxyz,
        dof_pos: &[f64],
        follow_camera: bool,
    ) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.frames.push(ShownFrame {
            root_pos: *root_pos,
            root_rot: *root_rot,
            dof_pos: dof_pos.to_vec(),
            follow_camera,
        });

        if let Some((steps, running)) = &self.interrupt_after {
            if log.frames.len() >= *steps {
                running.store(false, Ordering::SeqCst);
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().close_calls += 1;
        Ok(())
    }
}
