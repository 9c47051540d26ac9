//! Configuration module for motion-replay
//!
//! Both tools read an optional TOML file that sets the default robot, how to
//! launch the viewer, which off-screen backend headless runs use, and how to
//! log. Every section and key is optional.
//!
//! # Config Location
//!
//! The first of these that is set wins:
//!
//! 1. `--config <path>` on the command line
//! 2. the `MOTION_REPLAY_CONFIG` environment variable
//! 3. `config.toml` in the platform config directory under `dev.motion-replay`:
//!    - **Linux**: `~/.config/dev.motion-replay/`
//!    - **macOS**: `~/Library/Application Support/dev.motion-replay/`
//!    - **Windows**: `%APPDATA%\dev.motion-replay\`
//!
//! A missing file means defaults.
//!
//! # Example
//!
//! ```toml
//! default_robot = "unitree_h1"
//!
//! [viewer]
//! program = "python"
//! args = ["-m", "general_motion_retargeting.viewer_bridge"]
//!
//! [render]
//! headless_backend = "osmesa"
//!
//! [logging]
//! filter = "info,motion_replay=debug"
//! file = "logs/visualize.log"
//! ```

use crate::error::{ReplayError, Result};
use crate::render::RenderBackend;
use crate::types::RobotType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.motion-replay";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable naming an alternate config file
pub const CONFIG_ENV_VAR: &str = "MOTION_REPLAY_CONFIG";

/// Default viewer launcher
pub const DEFAULT_VIEWER_PROGRAM: &str = "python";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Get the platform config directory for this application
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Resolve which config file to read
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    app_config_dir().map(|p| p.join(CONFIG_FILE))
}

/// How to launch the viewer process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Executable to run
    pub program: String,
    /// Arguments passed before anything else
    pub args: Vec<String>,
    /// Working directory, the current one when unset
    pub working_dir: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_VIEWER_PROGRAM.to_string(),
            args: vec![
                "-m".to_string(),
                "general_motion_retargeting.viewer_bridge".to_string(),
            ],
            working_dir: None,
        }
    }
}

/// Rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Off-screen backend used for headless runs
    pub headless_backend: RenderBackend,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            headless_backend: RenderBackend::Egl,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    pub filter: String,
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Robot used when `--robot` is not given
    pub default_robot: RobotType,
    pub viewer: ViewerConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ReplayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load the config from the resolved location
    ///
    /// Returns defaults when no file exists there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = config_path(explicit) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(ReplayError::Config(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load the config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }
}
