//! Rendering backend selection
//!
//! The viewer's graphics library reads its backend from the environment the
//! first time it initializes and cannot switch afterwards. The backend is
//! therefore decided up front, from the resolved playback options, and
//! handed to the viewer as a [`RenderEnvironment`] value when it is
//! constructed. Nothing here mutates this process's environment.

use serde::{Deserialize, Serialize};

/// Environment variable the viewer's graphics library consults
pub const MUJOCO_GL_VAR: &str = "MUJOCO_GL";

/// OpenGL backend used by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    /// Whatever the viewer picks by default (an on-screen window)
    #[default]
    Native,
    /// EGL off-screen rendering, preferred for headless runs
    Egl,
    /// OSMesa software rendering, the fallback when EGL is unavailable
    Osmesa,
}

impl RenderBackend {
    /// Value for `MUJOCO_GL`, `None` when the viewer should choose
    pub fn gl_name(&self) -> Option<&'static str> {
        match self {
            RenderBackend::Native => None,
            RenderBackend::Egl => Some("egl"),
            RenderBackend::Osmesa => Some("osmesa"),
        }
    }

    /// Whether this backend renders without a display
    pub fn is_offscreen(&self) -> bool {
        !matches!(self, RenderBackend::Native)
    }
}

/// Process-level rendering configuration handed to a viewer at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderEnvironment {
    pub backend: RenderBackend,
}

impl RenderEnvironment {
    /// Choose the environment for a run
    ///
    /// Interactive runs keep the native backend; headless runs use
    /// `headless_backend`, or EGL if that is set to `Native`.
    pub fn for_headless(headless: bool, headless_backend: RenderBackend) -> Self {
        let backend = match (headless, headless_backend) {
            (false, _) => RenderBackend::Native,
            (true, RenderBackend::Native) => RenderBackend::Egl,
            (true, backend) => backend,
        };
        Self { backend }
    }

    /// Variables a viewer process must be started with
    pub fn env_vars(&self) -> Vec<(&'static str, &'static str)> {
        self.backend
            .gl_name()
            .map(|name| vec![(MUJOCO_GL_VAR, name)])
            .unwrap_or_default()
    }
}
