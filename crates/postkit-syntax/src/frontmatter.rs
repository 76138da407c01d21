//! Front matter handling.
//!
//! Articles open with a `---` delimited header. The tagger must only see
//! the body, so callers split first and rejoin afterwards.

const DELIMITER: &str = "---\n";

/// Keys every article header is expected to carry.
pub const REQUIRED_KEYS: &[&str] = &["title", "excerpt"];

/// Split `text` into `(front_matter, body)`.
///
/// The front matter includes both delimiter lines. Text that does not start
/// with `---\n`, or has no closing delimiter, has no front matter.
pub fn split(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text.strip_prefix(DELIMITER) else {
        return (None, text);
    };
    match rest.find(DELIMITER) {
        Some(pos) => {
            let end = DELIMITER.len() + pos + DELIMITER.len();
            (Some(&text[..end]), &text[end..])
        }
        None => (None, text),
    }
}

/// Reattach a header produced by [`split`].
pub fn join(front_matter: Option<&str>, body: &str) -> String {
    match front_matter {
        Some(front) => format!("{}{}", front, body),
        None => body.to_string(),
    }
}

/// Apply `f` to the body only, keeping the header byte for byte.
pub fn map_body(text: &str, f: impl FnOnce(&str) -> String) -> String {
    let (front, body) = split(text);
    join(front, &f(body))
}

/// Problems found in an article header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    pub missing_open: bool,
    pub missing_close: bool,
    pub missing_keys: Vec<&'static str>,
}

impl HeaderCheck {
    /// The header is present and closed. Missing keys are only warnings.
    pub fn is_valid(&self) -> bool {
        !self.missing_open && !self.missing_close
    }
}

/// Check that `text` opens with a closed header carrying [`REQUIRED_KEYS`].
pub fn check(text: &str) -> HeaderCheck {
    if !text.starts_with("---") {
        return HeaderCheck {
            missing_open: true,
            ..Default::default()
        };
    }
    let Some(end) = text[3..].find("---") else {
        return HeaderCheck {
            missing_close: true,
            ..Default::default()
        };
    };
    let header = &text[3..3 + end];
    let missing_keys = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !header.contains(&format!("{}:", key)))
        .collect();
    HeaderCheck {
        missing_keys,
        ..Default::default()
    }
}
