//! `postkit tag`: insert sentence markers into article bodies.

use crate::commands::validate::body_report;
use crate::inputs;
use anyhow::{Context, Result};
use clap::Args;
use postkit_syntax::{frontmatter, tag_document, Tagged};
use std::fs;
use std::path::Path;

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Markdown files, article directories or glob patterns. If omitted, reads from stdin.
    pub inputs: Vec<String>,

    /// Overwrite files without writing a `.backup` copy first
    #[arg(long)]
    pub no_backup: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Updated { inserted: usize },
    AlreadyTagged,
    Unchanged,
}

pub fn run(args: &TagArgs) -> Result<()> {
    if args.inputs.is_empty() {
        let input = inputs::read_stdin()?;
        let (text, _) = tag_text(&input);
        print!("{}", text);
        return Ok(());
    }

    let files = inputs::expand(&args.inputs)?;
    let mut updated = 0usize;
    for path in &files {
        match process_file(path, args) {
            Ok(Outcome::Updated { inserted }) => {
                updated += 1;
                let verb = if args.dry_run { "would tag" } else { "tagged" };
                println!("{} {} ({} markers)", verb, path.display(), inserted);
            }
            Ok(Outcome::AlreadyTagged) => {
                println!("skipped {} (already tagged)", path.display());
            }
            Ok(Outcome::Unchanged) => {
                println!("unchanged {} (nothing to tag)", path.display());
            }
            Err(e) => {
                log::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    let verb = if args.dry_run { "would update" } else { "updated" };
    println!("{} {} of {} files", verb, updated, files.len());
    Ok(())
}

/// Tag the body of `text`, keeping any front matter byte for byte.
pub fn tag_text(text: &str) -> (String, Tagged) {
    let (front, body) = frontmatter::split(text);
    let tagged = tag_document(body);
    (frontmatter::join(front, &tagged.text), tagged)
}

fn process_file(path: &Path, args: &TagArgs) -> Result<Outcome> {
    let original =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (text, tagged) = tag_text(&original);

    if tagged.already_tagged {
        let report = body_report(&original);
        if !report.is_well_formed() {
            log::warn!(
                "{}: existing sentence tags are not sequential ({:?})",
                path.display(),
                report.tag_numbers
            );
        }
        return Ok(Outcome::AlreadyTagged);
    }
    if text == original {
        return Ok(Outcome::Unchanged);
    }
    if !args.dry_run {
        if !args.no_backup {
            let backup = inputs::backup(path)?;
            log::info!("backup written to {}", backup.display());
        }
        fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(Outcome::Updated {
        inserted: tagged.inserted,
    })
}
