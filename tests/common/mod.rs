//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod recording_viewer;

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Write a record as a pickle file in `dir`
pub fn write_pickle(dir: &Path, name: &str, record: &Value) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    serde_pickle::to_writer(&mut file, record, serde_pickle::SerOptions::new()).unwrap();
    path
}

/// Write raw record bytes in `dir`
pub fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a record as a JSON file in `dir`
pub fn write_json(dir: &Path, name: &str, record: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(record).unwrap()).unwrap();
    path
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
