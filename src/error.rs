//! Error handling for motion-replay
//!
//! This module defines the error type shared by the record loader, the
//! playback loop and the viewer bridge, plus a Result alias.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for motion-replay operations
#[derive(Error, Debug)]
pub enum ReplayError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors decoding a pickle stream
    #[error("Pickle decode error: {0}")]
    Pickle(#[from] serde_pickle::Error),

    /// Errors decoding or encoding JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record's top level is not a key-value mapping
    #[error("Record {path} is not a mapping")]
    NotAMapping { path: PathBuf },

    /// A required record field is absent
    #[error("Missing record field '{0}'")]
    MissingField(String),

    /// A record field has the wrong shape
    #[error("Invalid record field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A per-frame array is shorter than the frame being requested
    #[error("Frame {index} out of range for '{field}' ({len} frames)")]
    FrameOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// The viewer rejected a request or broke the protocol
    #[error("Viewer error: {0}")]
    Viewer(String),

    /// The viewer process could not be started
    #[error("Failed to launch viewer '{program}': {source}")]
    ViewerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors related to configuration loading
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReplayError>,
    },
}

impl ReplayError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReplayError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReplayError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for motion-replay operations
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
