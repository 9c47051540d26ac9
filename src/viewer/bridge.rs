//! Viewer running as a child process
//!
//! The robot viewer lives outside this crate, so [`SubprocessViewer`]
//! launches it as a child process and talks to it over stdin/stdout using
//! the [`protocol`](super::protocol) module. The render environment is
//! applied to the child only.
//!
//! On Unix the child gets its own process group. A Ctrl-C in the terminal
//! then reaches only the player, which closes the viewer in order and lets
//! it finish the video. A viewer that stops answering can still be taken
//! down through its [`KillSwitch`].

use super::protocol::{ViewerReply, ViewerRequest};
use super::{MotionViewer, ViewerOptions};
use crate::config::ViewerConfig;
use crate::error::{ReplayError, Result};
use crate::render::RenderEnvironment;
use crate::types::{QuatWxyz, Vec3};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Shared handle that can kill the viewer process from another thread
///
/// Waiting polls `try_wait` so the lock is never held while the child runs.
#[derive(Debug, Clone)]
pub struct KillSwitch(Arc<Mutex<Child>>);

impl KillSwitch {
    pub(crate) fn new(child: Child) -> Self {
        Self(Arc::new(Mutex::new(child)))
    }

    fn lock(&self) -> MutexGuard<'_, Child> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Kill the process, ignoring one that has already exited
    pub fn kill(&self) {
        let mut child = self.lock();
        if let Ok(Some(_)) = child.try_wait() {
            return;
        }
        if let Err(e) = child.kill() {
            tracing::warn!("Failed to kill viewer process {}: {}", child.id(), e);
        }
    }

    /// Wait for the process to exit
    pub fn wait(&self) -> Result<ExitStatus> {
        loop {
            if let Some(status) = self.lock().try_wait()? {
                return Ok(status);
            }
            std::thread::sleep(EXIT_POLL_INTERVAL);
        }
    }
}

/// A viewer process driven over line-delimited JSON
pub struct SubprocessViewer {
    /// Program name, for error messages
    program: String,
    child: KillSwitch,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    closed: bool,
}

impl SubprocessViewer {
    /// Start the viewer process without talking to it yet
    ///
    /// Take the [`kill_switch`](Self::kill_switch) before
    /// [`send_open`](Self::send_open) to be able to stop a viewer that hangs
    /// while loading the robot.
    pub fn launch(config: &ViewerConfig, environment: &RenderEnvironment) -> Result<Self> {
        let mut command = Command::new(&config.program);
        command
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if let Some(dir) = &config.working_dir {
            command.current_dir(dir);
        }
        for (key, value) in environment.env_vars() {
            command.env(key, value);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        tracing::info!(
            "Launching viewer '{}' (backend: {:?})",
            config.program,
            environment.backend
        );

        let mut child = command.spawn().map_err(|source| ReplayError::ViewerLaunch {
            program: config.program.clone(),
            source,
        })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ReplayError::Viewer("viewer pipes unavailable".to_string()));
        };

        Ok(Self {
            program: config.program.clone(),
            child: KillSwitch::new(child),
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
            closed: false,
        })
    }

    /// Send the open request
    ///
    /// On failure the caller drops the viewer, which closes and reaps it.
    pub fn send_open(&mut self, options: &ViewerOptions) -> Result<()> {
        tracing::debug!("Opening viewer for {}", options.robot_type);
        self.request(&ViewerRequest::Open(options))
    }

    /// Handle for killing the viewer from a signal handler
    pub fn kill_switch(&self) -> KillSwitch {
        self.child.clone()
    }

    /// Send one request and wait for its reply
    fn request(&mut self, request: &ViewerRequest<'_>) -> Result<()> {
        let op = request.op();
        let line = request.to_line()?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ReplayError::Viewer(format!("{} after viewer input was closed", op)))?;
        stdin
            .write_all(line.as_bytes())
            .and_then(|_| stdin.flush())
            .map_err(|e| ReplayError::Viewer(format!("failed to send {}: {}", op, e)))?;

        let mut reply = String::new();
        let read = self.stdout.read_line(&mut reply)?;
        if read == 0 {
            return Err(ReplayError::Viewer(format!(
                "viewer '{}' exited before answering {}",
                self.program, op
            )));
        }

        tracing::trace!("viewer {} -> {}", op, reply.trim());
        ViewerReply::parse(&reply)?.into_result(op)
    }
}

impl MotionViewer for SubprocessViewer {
    fn step(
        &mut self,
        root_pos: &Vec3,
        root_rot: &QuatWxyz,
        dof_pos: &[f64],
        follow_camera: bool,
    ) -> Result<()> {
        self.request(&ViewerRequest::Step {
            root_pos,
            root_rot,
            dof_pos,
            follow_camera,
        })
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let farewell = self.request(&ViewerRequest::Close);
        drop(self.stdin.take());
        let status = self.child.wait()?;
        tracing::debug!("Viewer '{}' exited with {}", self.program, status);

        farewell?;
        if !status.success() {
            return Err(ReplayError::Viewer(format!(
                "viewer '{}' exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

impl Drop for SubprocessViewer {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.close() {
            tracing::warn!("Viewer shutdown failed: {}", e);
        }
    }
}
