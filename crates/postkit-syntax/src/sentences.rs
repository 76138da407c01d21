//! Marked sentence extraction and bilingual alignment.
//!
//! A sentence is the text between a marker and the next HTML comment (or
//! the end of the document). Two language versions line up by marker id.

use crate::marker::RE_MARKER;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static RE_NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\. ").unwrap());

/// The Markdown block a sentence renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    H1,
    H2,
    H3,
    #[serde(rename = "li")]
    ListItem,
    #[serde(rename = "p")]
    Paragraph,
}

impl Block {
    fn of(text: &str) -> Self {
        if text.starts_with("# ") {
            Block::H1
        } else if text.starts_with("## ") {
            Block::H2
        } else if text.starts_with("### ") {
            Block::H3
        } else if text.starts_with("- ") || text.starts_with("* ") || RE_NUMBERED.is_match(text) {
            Block::ListItem
        } else {
            Block::Paragraph
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// Marker id as written, e.g. `s3`.
    pub id: String,
    pub text: String,
    pub block: Block,
}

/// One row of a side-by-side view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedSentence {
    pub id: String,
    pub left: String,
    /// Empty when the right document has no sentence with this id.
    pub right: String,
    pub left_block: Block,
    pub right_block: Option<Block>,
}

/// Extract every marked sentence in document order.
pub fn extract(markdown: &str) -> Vec<Sentence> {
    RE_MARKER
        .captures_iter(markdown)
        .filter_map(|caps| {
            let rest = &markdown[caps.get(0)?.end()..];
            let end = rest.find("<!--").unwrap_or(rest.len());
            let text = rest[..end].trim().to_string();
            Some(Sentence {
                id: format!("s{}", &caps[1]),
                block: Block::of(&text),
                text,
            })
        })
        .collect()
}

/// Pair each left sentence with the right sentence of the same id.
pub fn align(left: &[Sentence], right: &[Sentence]) -> Vec<AlignedSentence> {
    let by_id: HashMap<&str, &Sentence> = right.iter().map(|s| (s.id.as_str(), s)).collect();
    left.iter()
        .map(|l| {
            let r = by_id.get(l.id.as_str());
            AlignedSentence {
                id: l.id.clone(),
                left: l.text.clone(),
                right: r.map(|s| s.text.clone()).unwrap_or_default(),
                left_block: l.block,
                right_block: r.map(|s| s.block),
            }
        })
        .collect()
}

/// Ids present in `source` but absent from `target`, in source order.
pub fn missing_ids<'a>(source: &'a [Sentence], target: &[Sentence]) -> Vec<&'a str> {
    let present: HashSet<&str> = target.iter().map(|s| s.id.as_str()).collect();
    source
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| !present.contains(id))
        .collect()
}
