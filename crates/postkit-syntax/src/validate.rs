//! Marker validation.
//!
//! Scans for markers and summarizes their numbering. Never fails: text with
//! no markers produces the empty report, which counts as sequential.

use crate::marker;
use serde::Serialize;
use std::collections::HashSet;

/// Summary of the markers found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagReport {
    pub has_tags: bool,
    pub total_tags: usize,
    /// Marker numbers in order of appearance.
    pub tag_numbers: Vec<u64>,
    /// Numbers read exactly `1, 2, ..., total_tags`.
    pub is_sequential: bool,
    /// At least one number appears more than once.
    pub duplicates: bool,
}

impl TagReport {
    pub fn is_well_formed(&self) -> bool {
        self.is_sequential && !self.duplicates
    }
}

/// Build a [`TagReport`] for `content`.
pub fn validate(content: &str) -> TagReport {
    let tag_numbers = marker::marker_numbers(content);
    let total_tags = tag_numbers.len();
    let is_sequential = tag_numbers
        .iter()
        .zip(1u64..)
        .all(|(&found, expected)| found == expected);
    let distinct: HashSet<u64> = tag_numbers.iter().copied().collect();

    TagReport {
        has_tags: total_tags > 0,
        total_tags,
        duplicates: distinct.len() < total_tags,
        is_sequential,
        tag_numbers,
    }
}
