//! Best-effort parsing of a single LLM article reply.
//!
//! The generation prompt asks for one ```` ```markdown ```` block with the
//! article body followed by two ```` ```json ```` blocks: the article
//! metadata (identified by its `"authorId"` key) and the image captions
//! (the first other block with a `"ja":` key). Any part may be missing or
//! malformed; a block that fails to parse is logged and dropped.
//!
//! The article body may contain fenced code of its own, so the markdown
//! block is closed by pairing fences rather than by the first bare one.

use log::warn;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static RE_MARKDOWN_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```markdown[ \t\r]*\n").unwrap());

static RE_JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*\n(.*?)\n\s*```").unwrap());

static RE_CAPTION_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""ja"\s*:"#).unwrap());

/// The parts recovered from a reply.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedReply {
    /// Article body, trimmed. Not yet tagged.
    pub markdown: Option<String>,
    pub meta: Option<Value>,
    pub captions: Option<Value>,
}

impl ParsedReply {
    pub fn is_empty(&self) -> bool {
        self.markdown.is_none() && self.meta.is_none() && self.captions.is_none()
    }
}

pub fn parse(reply: &str) -> ParsedReply {
    let (markdown, rest) = match markdown_block(reply) {
        Some((body, end)) => (Some(body.trim().to_string()), &reply[end..]),
        None => (None, reply),
    };

    let blocks: Vec<&str> = RE_JSON_BLOCK
        .captures_iter(rest)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .filter(|body| body.starts_with('{'))
        .collect();

    let meta_at = blocks.iter().position(|b| b.contains("\"authorId\""));
    let captions_at = blocks
        .iter()
        .enumerate()
        .position(|(i, b)| Some(i) != meta_at && RE_CAPTION_KEY.is_match(b));

    ParsedReply {
        markdown,
        meta: meta_at.and_then(|i| parse_json(blocks[i], "meta.json")),
        captions: captions_at.and_then(|i| parse_json(blocks[i], "captions.json")),
    }
}

/// Locate the markdown block. Returns its body and the byte offset where the
/// rest of the reply starts.
///
/// Inside the block a fence with an info string (```` ```bash ````) opens an
/// inner code block and the next bare fence closes it; the first bare fence
/// at depth zero closes the block. After that close the scan stops at the
/// first top-level ```` ```json ```` fence. When the paired close is not the
/// last bare fence before that point, an inner block probably opened with a
/// bare fence, so the last bare fence wins and a warning is logged.
fn markdown_block(reply: &str) -> Option<(&str, usize)> {
    let start = RE_MARKDOWN_OPEN.find(reply)?.end();

    let mut offset = start;
    let mut inner = false;
    let mut paired: Option<(usize, usize)> = None;
    let mut last_bare: Option<(usize, usize)> = None;
    let mut stop = reply.len();

    for line in reply[start..].split_inclusive('\n') {
        let line_end = offset + line.len();
        if let Some(info) = line.trim().strip_prefix("```") {
            let info = info.trim_start_matches('`').trim();
            if info.is_empty() {
                if inner {
                    inner = false;
                } else {
                    let fence = Some((offset, line_end));
                    if paired.is_none() {
                        paired = fence;
                    }
                    last_bare = fence;
                }
            } else if !inner && paired.is_some() && info == "json" {
                stop = offset;
                break;
            } else if !inner {
                inner = true;
            }
        }
        offset = line_end;
    }

    match last_bare {
        Some(close) => {
            if paired != Some(close) {
                warn!("markdown block has unbalanced code fences; closing at the last bare fence");
            }
            Some((&reply[start..close.0], close.1))
        }
        None => {
            warn!("markdown block is not closed; taking the rest of the reply");
            Some((&reply[start..stop], stop))
        }
    }
}

fn parse_json(body: &str, label: &str) -> Option<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("could not parse {} block: {}", label, e);
            None
        }
    }
}
