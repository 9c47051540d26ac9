//! Record loading
//!
//! A record is a key-value mapping deserialized from a binary file. Both
//! tools start by loading one: the body differ reads `link_body_list` out of
//! two of them, the player reads the motion arrays out of one.
//!
//! # Formats
//!
//! The format is picked from the file extension:
//!
//! - `.json` - a JSON object
//! - anything else - a Python pickle stream (the usual `.pkl` output of the
//!   retargeting pipeline)
//!
//! Pickle globals that do not resolve to plain Python containers (numpy
//! array reconstructors, for instance) and raw byte payloads are replaced
//! by `null`, so a record stays readable even when some of its fields are
//! opaque (see [`pickle`]). Fields that are read must hold nested lists.
//!
//! # Example
//!
//! ```ignore
//! use motion_replay::record::{MotionRecord, Record};
//!
//! let record = Record::load("walk_01.pkl")?;
//! let motion = MotionRecord::from_record(&record)?;
//! println!("{} frames at {} fps", motion.frame_count(), motion.fps);
//! ```

pub mod motion;
pub mod pickle;

pub use motion::{MotionRecord, DEFAULT_FPS};

use crate::error::{ReplayError, Result, ResultExt};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Serialization format of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// Python pickle stream
    Pickle,
    /// JSON object
    Json,
}

impl RecordFormat {
    /// Pick the format for a path from its extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RecordFormat::Json,
            _ => RecordFormat::Pickle,
        }
    }
}

/// A loaded key-value record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Where the record was read from
    path: PathBuf,
    /// Top-level fields
    fields: Map<String, Value>,
}

impl Record {
    /// Load a record from disk, picking the format from the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(ReplayError::from)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        Self::from_reader(BufReader::new(file), RecordFormat::from_path(path), path)
    }

    /// Decode a record from any byte source
    pub fn from_reader<R: Read>(reader: R, format: RecordFormat, path: &Path) -> Result<Self> {
        let value: Value = match format {
            RecordFormat::Pickle => pickle::read_value(reader)?,
            RecordFormat::Json => serde_json::from_reader(reader)?,
        };

        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(ReplayError::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Build a record from already-decoded fields
    pub fn from_fields(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Path the record was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether a top-level field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Decode a present field into a typed value
    ///
    /// Returns `Ok(None)` when the field is absent.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| ReplayError::invalid_field(key, e.to_string())),
        }
    }

    /// Decode a field that must be present
    pub fn required_field<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.field(key)?
            .ok_or_else(|| ReplayError::MissingField(key.to_string()))
    }
}
