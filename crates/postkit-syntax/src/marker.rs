//! Sentence marker format.
//!
//! Markers are written as `<!-- s<N> -->` on their own line. Reading is
//! whitespace-tolerant so hand-edited markers like `<!--s3-->` still count.

use regex::Regex;
use std::sync::LazyLock;

pub static RE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*s(\d+)\s*-->").unwrap());

/// Render the marker line for sentence `n`.
pub fn format_marker(n: usize) -> String {
    format!("<!-- s{} -->", n)
}

/// Returns true if `text` contains at least one marker.
pub fn contains_marker(text: &str) -> bool {
    RE_MARKER.is_match(text)
}

/// Marker numbers in order of appearance.
///
/// A digit run that overflows `u64` saturates to `u64::MAX`; it can never
/// equal its expected position, so the report still flags it.
pub fn marker_numbers(text: &str) -> Vec<u64> {
    RE_MARKER
        .captures_iter(text)
        .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}
