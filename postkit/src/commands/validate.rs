//! `postkit validate`: report on existing sentence markers.

use crate::inputs;
use crate::render::{self, FileReport};
use anyhow::{Context, Result};
use clap::Args;
use postkit_syntax::{frontmatter, validate, TagReport};
use std::fs;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Markdown files, article directories or glob patterns. If omitted, reads from stdin.
    pub inputs: Vec<String>,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    pub format: String,

    /// Exit with an error when any file has malformed tags
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: &ValidateArgs) -> Result<()> {
    let renderer = render::create_renderer(&args.format)?;

    let reports = if args.inputs.is_empty() {
        vec![report_for("<stdin>".to_string(), &inputs::read_stdin()?)]
    } else {
        let mut reports = Vec::new();
        for path in inputs::expand(&args.inputs)? {
            match fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))
            {
                Ok(text) => reports.push(report_for(path.display().to_string(), &text)),
                Err(e) => log::warn!("skipping {}: {:#}", path.display(), e),
            }
        }
        reports
    };

    print!("{}", renderer.reports(&reports)?);

    let mut malformed = 0usize;
    for r in reports.iter().filter(|r| !r.report.is_well_formed()) {
        log::warn!("{}: sentence tags are not sequential", r.source);
        malformed += 1;
    }
    if args.strict && malformed > 0 {
        anyhow::bail!("{} of {} files have malformed sentence tags", malformed, reports.len());
    }
    Ok(())
}

fn report_for(source: String, text: &str) -> FileReport {
    FileReport {
        source,
        report: body_report(text),
    }
}

/// Markers are only meaningful in the body, so the header is skipped.
pub fn body_report(text: &str) -> TagReport {
    let (_, body) = frontmatter::split(text);
    validate(body)
}
