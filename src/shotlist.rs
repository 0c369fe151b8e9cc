//! Shot list types
//!
//! The shot list is operator-supplied ground truth: a dateline header plus
//! an ordered sequence of numbered shots. It is read-only to the pipeline
//! and authoritative over anything the model infers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default dateline values when no shot-level match exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotListHeader {
    pub location: String,
    pub date: String,
    pub source: String,
    pub restrictions: String,
}

/// One numbered shot with its provenance metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Shot {
    /// Unique positive integer within a shot list
    pub number: u32,
    pub location: String,
    pub date: String,
    pub source: String,
    pub restrictions: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotList {
    pub header: ShotListHeader,
    pub shots: Vec<Shot>,
}

impl ShotList {
    /// First shot (in list order) whose number appears in `numbers`.
    /// References to absent numbers are simply skipped. Shot numbers are
    /// assumed unique; duplicates are an upstream configuration error.
    pub fn find_first_match(&self, numbers: &BTreeSet<u32>) -> Option<&Shot> {
        self.shots.iter().find(|shot| numbers.contains(&shot.number))
    }
}
