//! Line classification for sentence tagging.
//!
//! Each rule looks at one line plus the lines just above it and either
//! claims the line as the opening of a segment or passes. Rules run in
//! [`RULES`] order and the first claim wins.
//!
//! Bulleted and numbered list items are only claimed when their text opens
//! with a bold run (`- **Term**: ...`). Plain items stay untagged.

use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})\s+").unwrap());

static RE_BOLD_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+\*\*").unwrap());

static RE_BOLD_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+\*\*").unwrap());

/// Leading characters that mark a line as Markdown structure, not prose.
const STRUCTURAL_PREFIXES: &[char] = &['-', '*', '`', '#', '|', '<', '>', '['];

const FENCE: &str = "```";

/// How many preceding lines are searched for an earlier fence.
pub const FENCE_LOOKBACK: usize = 3;

/// `---` lines this close to the top are treated as front matter.
pub const FRONT_MATTER_WINDOW: usize = 5;

// -- Types --------------------------------------------------------------------

/// What kind of segment a line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Heading { level: u8 },
    Paragraph,
    ListItem { numbered: bool },
    CodeFence,
}

/// One line together with the context the rules are allowed to see.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Zero-based line index within the document.
    pub index: usize,
    pub line: &'a str,
    /// Up to [`FENCE_LOOKBACK`] lines directly above, oldest first.
    pub recent: &'a [&'a str],
}

impl<'a> LineContext<'a> {
    /// Build the context for line `index` of `lines`.
    pub fn new(lines: &'a [&'a str], index: usize) -> Self {
        let start = index.saturating_sub(FENCE_LOOKBACK);
        Self {
            index,
            line: lines[index],
            recent: &lines[start..index],
        }
    }

    pub fn trimmed(&self) -> &'a str {
        self.line.trim()
    }

    pub fn previous(&self) -> Option<&'a str> {
        self.recent.last().copied()
    }
}

// -- Rules --------------------------------------------------------------------

pub type Rule = fn(&LineContext) -> Option<SegmentKind>;

/// Classification rules in evaluation order.
pub const RULES: &[Rule] = &[heading, paragraph_start, bold_bullet, bold_numbered, code_fence];

/// Classify a line, or `None` if it opens no segment.
pub fn classify(ctx: &LineContext) -> Option<SegmentKind> {
    if ctx.trimmed().is_empty() || is_front_matter_delimiter(ctx) {
        return None;
    }
    RULES.iter().find_map(|rule| rule(ctx))
}

/// A bare `---` near the top of the document.
pub fn is_front_matter_delimiter(ctx: &LineContext) -> bool {
    ctx.index < FRONT_MATTER_WINDOW && ctx.trimmed() == "---"
}

/// `#`, `##` or `###` followed by whitespace.
pub fn heading(ctx: &LineContext) -> Option<SegmentKind> {
    heading_level(ctx.trimmed()).map(|level| SegmentKind::Heading { level })
}

fn heading_level(trimmed: &str) -> Option<u8> {
    RE_HEADING
        .captures(trimmed)
        .map(|caps| caps[1].len() as u8)
}

/// First line of a prose paragraph: not structural, and either the first
/// line of the document or directly after a blank line or heading.
pub fn paragraph_start(ctx: &LineContext) -> Option<SegmentKind> {
    let trimmed = ctx.trimmed();
    let prose = trimmed
        .chars()
        .next()
        .is_some_and(|c| !STRUCTURAL_PREFIXES.contains(&c));
    if !prose || trimmed.starts_with(FENCE) {
        return None;
    }
    let opens = match ctx.previous() {
        None => true,
        Some(prev) => {
            let prev = prev.trim();
            prev.is_empty() || heading_level(prev).is_some()
        }
    };
    opens.then_some(SegmentKind::Paragraph)
}

/// `- **...` or `* **...`
pub fn bold_bullet(ctx: &LineContext) -> Option<SegmentKind> {
    RE_BOLD_BULLET
        .is_match(ctx.trimmed())
        .then_some(SegmentKind::ListItem { numbered: false })
}

/// `1. **...`
pub fn bold_numbered(ctx: &LineContext) -> Option<SegmentKind> {
    RE_BOLD_NUMBERED
        .is_match(ctx.trimmed())
        .then_some(SegmentKind::ListItem { numbered: true })
}

/// A fence line with no other fence in the lookback window. Closing fences
/// of blocks longer than the window are claimed too.
pub fn code_fence(ctx: &LineContext) -> Option<SegmentKind> {
    let opens = ctx.trimmed().starts_with(FENCE)
        && !ctx.recent.iter().any(|line| line.contains(FENCE));
    opens.then_some(SegmentKind::CodeFence)
}
