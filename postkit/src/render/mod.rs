//! Report rendering: trait-based format dispatch.

pub mod json;
pub mod text;

use anyhow::{anyhow, Result};
use postkit_syntax::keys::KeyReport;
use postkit_syntax::sentences::AlignedSentence;
use postkit_syntax::TagReport;
use serde::Serialize;

/// A tag report labelled with where the text came from.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub source: String,
    #[serde(flatten)]
    pub report: TagReport,
}

/// Trait for turning command results into printable output.
pub trait Renderer {
    fn reports(&self, reports: &[FileReport]) -> Result<String>;
    fn alignment(&self, rows: &[AlignedSentence]) -> Result<String>;
    fn keys(&self, report: &KeyReport) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text or json", format)),
    }
}
