//! Body list comparison between two records
//!
//! Retargeted motion records carry a `link_body_list`: the names of the
//! robot bodies whose poses were exported. Records produced by different
//! pipeline versions sometimes disagree on that list, and this module
//! reports how.
//!
//! Comparison is by set membership only. Duplicate names collapse and the
//! original order is lost; the report lists names sorted.

use crate::error::{Result, ResultExt};
use crate::record::Record;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Record field holding the body names
pub const BODY_LIST_FIELD: &str = "link_body_list";

/// Body names read from one record, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyList {
    names: Vec<String>,
}

impl BodyList {
    /// Create a body list from names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Read `link_body_list` from a record, empty when the field is absent
    pub fn from_record(record: &Record) -> Result<Self> {
        if !record.contains_key(BODY_LIST_FIELD) {
            tracing::debug!("{} has no {}", record.path().display(), BODY_LIST_FIELD);
        }
        let names = record
            .field::<Vec<String>>(BODY_LIST_FIELD)?
            .unwrap_or_default();
        Ok(Self { names })
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Distinct names
    pub fn name_set(&self) -> BTreeSet<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

/// Symmetric difference between two body lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyListDiff {
    /// Names in the first list but not the second
    pub only_in_first: BTreeSet<String>,
    /// Names in the second list but not the first
    pub only_in_second: BTreeSet<String>,
}

impl BodyListDiff {
    /// Compare two body lists
    pub fn between(first: &BodyList, second: &BodyList) -> Self {
        let first = first.name_set();
        let second = second.name_set();

        Self {
            only_in_first: first.difference(&second).map(|s| s.to_string()).collect(),
            only_in_second: second.difference(&first).map(|s| s.to_string()).collect(),
        }
    }

    /// True when both lists hold the same set of names
    pub fn is_empty(&self) -> bool {
        self.only_in_first.is_empty() && self.only_in_second.is_empty()
    }
}

/// Result of comparing the body lists of two record files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub first_path: PathBuf,
    pub first_len: usize,
    pub second_path: PathBuf,
    pub second_len: usize,
    pub diff: BodyListDiff,
}

impl ComparisonReport {
    /// Build a report from two already-loaded body lists
    pub fn new(
        first_path: impl Into<PathBuf>,
        first: &BodyList,
        second_path: impl Into<PathBuf>,
        second: &BodyList,
    ) -> Self {
        Self {
            first_path: first_path.into(),
            first_len: first.len(),
            second_path: second_path.into(),
            second_len: second.len(),
            diff: BodyListDiff::between(first, second),
        }
    }
}

fn write_missing(
    f: &mut fmt::Formatter<'_>,
    names: &BTreeSet<String>,
    present_in: usize,
    missing_from: usize,
) -> fmt::Result {
    if names.is_empty() {
        return writeln!(
            f,
            "No items in file {} that are missing from file {}.",
            present_in, missing_from
        );
    }

    writeln!(
        f,
        "Items in file {} but not in file {} ({}):",
        present_in,
        missing_from,
        names.len()
    )?;
    for name in names {
        writeln!(f, "  - {}", name)?;
    }
    Ok(())
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File 1: {}", self.first_path.display())?;
        writeln!(f, "Length of {}: {}", BODY_LIST_FIELD, self.first_len)?;
        writeln!(f, "File 2: {}", self.second_path.display())?;
        writeln!(f, "Length of {}: {}", BODY_LIST_FIELD, self.second_len)?;
        writeln!(f)?;
        writeln!(f, "Differences:")?;
        write_missing(f, &self.diff.only_in_first, 1, 2)?;
        write_missing(f, &self.diff.only_in_second, 2, 1)
    }
}

/// Load two records and compare their body lists
pub fn compare_files(first: &Path, second: &Path) -> Result<ComparisonReport> {
    tracing::debug!("Comparing {} against {}", first.display(), second.display());

    let first_record = Record::load(first)?;
    let second_record = Record::load(second)?;

    let first_list = BodyList::from_record(&first_record)
        .with_context(|| format!("Reading {}", first.display()))?;
    let second_list = BodyList::from_record(&second_record)
        .with_context(|| format!("Reading {}", second.display()))?;

    Ok(ComparisonReport::new(first, &first_list, second, &second_list))
}
