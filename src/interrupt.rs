//! Ctrl-C handling for playback
//!
//! The first interrupt clears the run flag: playback stops after the frame
//! in flight and the viewer is closed in order, so a recording is flushed.
//! A viewer that never answers would hold the player forever, so a second
//! interrupt kills the registered viewer process. With no viewer running
//! yet the caller should exit instead.

use crate::viewer::KillSwitch;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// What a signal led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Playback will stop after the current frame
    Stop,
    /// The viewer process was killed
    KilledViewer,
    /// Nothing left to stop in order; the process should exit
    Exit,
}

/// State shared between the signal handler and the playback loop
#[derive(Debug)]
pub struct Interrupt {
    running: AtomicBool,
    signals: AtomicUsize,
    viewer: Mutex<Option<KillSwitch>>,
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupt {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            signals: AtomicUsize::new(0),
            viewer: Mutex::new(None),
        }
    }

    /// Run flag polled by the player before every frame
    pub fn running(&self) -> &AtomicBool {
        &self.running
    }

    /// Check if an interrupt has arrived
    pub fn is_requested(&self) -> bool {
        !self.running.load(Ordering::SeqCst)
    }

    /// Register the viewer process a second interrupt should kill
    pub fn arm(&self, viewer: KillSwitch) {
        *self.viewer.lock().unwrap_or_else(PoisonError::into_inner) = Some(viewer);
    }

    /// Forget the viewer once it has been closed
    pub fn disarm(&self) {
        self.viewer.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    /// Handle one Ctrl-C
    pub fn signal(&self) -> Escalation {
        self.running.store(false, Ordering::SeqCst);
        if self.signals.fetch_add(1, Ordering::SeqCst) == 0 {
            tracing::info!("Interrupt received, stopping after the current frame");
            return Escalation::Stop;
        }

        match self.viewer.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
            Some(viewer) => {
                tracing::warn!("Second interrupt, killing viewer");
                viewer.kill();
                Escalation::KilledViewer
            }
            None => Escalation::Exit,
        }
    }
}
