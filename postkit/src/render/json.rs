//! JSON renderer: structured output for tooling integration.

use super::{FileReport, Renderer};
use anyhow::Result;
use postkit_syntax::keys::KeyReport;
use postkit_syntax::sentences::AlignedSentence;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn reports(&self, reports: &[FileReport]) -> Result<String> {
        Ok(serde_json::to_string_pretty(reports)? + "\n")
    }

    fn alignment(&self, rows: &[AlignedSentence]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)? + "\n")
    }

    fn keys(&self, report: &KeyReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)? + "\n")
    }
}
