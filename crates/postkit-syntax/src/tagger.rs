//! Sentence marker injection.
//!
//! Walks the body line by line and puts a `<!-- sN -->` line in front of
//! every line that [`segment::classify`] claims. Numbering starts at 1 and
//! never resets. Text that already carries any marker is returned as is;
//! inconsistent numbering is reported by [`crate::validate`], not repaired.

use crate::marker;
use crate::segment::{self, LineContext};

/// Result of a tagging pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged {
    pub text: String,
    /// Number of marker lines inserted.
    pub inserted: usize,
    /// The input already contained markers and was left untouched.
    pub already_tagged: bool,
}

/// Insert sentence markers into `content`.
pub fn tag(content: &str) -> String {
    tag_document(content).text
}

/// Insert sentence markers and report what happened.
pub fn tag_document(content: &str) -> Tagged {
    if marker::contains_marker(content) {
        return Tagged {
            text: content.to_string(),
            inserted: 0,
            already_tagged: true,
        };
    }

    // Split on '\n' only so '\r' and a trailing newline survive the rejoin.
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len() * 2);
    let mut counter = 1usize;

    for (index, line) in lines.iter().enumerate() {
        if segment::classify(&LineContext::new(&lines, index)).is_some() {
            out.push(marker::format_marker(counter));
            counter += 1;
        }
        out.push(line.to_string());
    }

    Tagged {
        text: out.join("\n"),
        inserted: counter - 1,
        already_tagged: false,
    }
}
