//! Plain-text renderer for terminal use.

use super::{FileReport, Renderer};
use anyhow::Result;
use postkit_syntax::keys::KeyReport;
use postkit_syntax::sentences::{AlignedSentence, Block};
use postkit_syntax::TagReport;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn reports(&self, reports: &[FileReport]) -> Result<String> {
        let mut out = String::new();
        for r in reports {
            out.push_str(&format!("{}: {}\n", r.source, summarize(&r.report)));
            if !r.report.is_well_formed() {
                let numbers: Vec<String> =
                    r.report.tag_numbers.iter().map(|n| n.to_string()).collect();
                out.push_str(&format!("  numbers: {}\n", numbers.join(", ")));
            }
        }
        Ok(out)
    }

    fn alignment(&self, rows: &[AlignedSentence]) -> Result<String> {
        let mut out = String::new();
        for row in rows {
            let right_block = row.right_block.map_or("-", block_name);
            out.push_str(&format!(
                "{} [{}|{}]\n",
                row.id,
                block_name(row.left_block),
                right_block
            ));
            push_quoted(&mut out, "<", &row.left);
            push_quoted(&mut out, ">", &row.right);
        }
        Ok(out)
    }

    fn keys(&self, report: &KeyReport) -> Result<String> {
        let mut out = format!(
            "defined: {}, used: {}, matched: {}\n",
            report.defined, report.used, report.matched
        );
        push_list(&mut out, "unused", &report.unused);
        push_list(&mut out, "undefined", &report.undefined);
        Ok(out)
    }
}

fn push_list(out: &mut String, label: &str, items: &[String]) {
    out.push_str(&format!("{} ({}):\n", label, items.len()));
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
}

/// One-line summary: `3 tags, sequential` / `no tags` / `3 tags, out of sequence, duplicates`.
pub fn summarize(report: &TagReport) -> String {
    if !report.has_tags {
        return "no tags".to_string();
    }
    let noun = if report.total_tags == 1 { "tag" } else { "tags" };
    let mut line = format!("{} {}", report.total_tags, noun);
    if report.is_sequential {
        line.push_str(", sequential");
    } else {
        line.push_str(", out of sequence");
    }
    if report.duplicates {
        line.push_str(", duplicates");
    }
    line
}

fn block_name(block: Block) -> &'static str {
    match block {
        Block::H1 => "h1",
        Block::H2 => "h2",
        Block::H3 => "h3",
        Block::ListItem => "li",
        Block::Paragraph => "p",
    }
}

fn push_quoted(out: &mut String, side: &str, text: &str) {
    if text.is_empty() {
        out.push_str(&format!("  {} (missing)\n", side));
        return;
    }
    for line in text.lines() {
        out.push_str(&format!("  {} {}\n", side, line));
    }
}
