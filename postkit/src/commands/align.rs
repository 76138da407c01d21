//! `postkit align`: pair two language versions by sentence id.

use crate::render;
use anyhow::{Context, Result};
use clap::Args;
use postkit_syntax::{frontmatter, sentences};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Left-hand document (usually the source language)
    pub left: PathBuf,

    /// Right-hand document (usually a translation)
    pub right: PathBuf,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    pub format: String,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let renderer = render::create_renderer(&args.format)?;
    let left = load(&args.left)?;
    let right = load(&args.right)?;

    if left.is_empty() {
        log::warn!("{} has no sentence tags", args.left.display());
    }
    for (from, to, missing) in [
        (&args.left, &args.right, sentences::missing_ids(&left, &right)),
        (&args.right, &args.left, sentences::missing_ids(&right, &left)),
    ] {
        if !missing.is_empty() {
            log::warn!(
                "{} is missing {} sentence(s) from {}: {}",
                to.display(),
                missing.len(),
                from.display(),
                missing.join(", ")
            );
        }
    }

    print!("{}", renderer.alignment(&sentences::align(&left, &right))?);
    Ok(())
}

fn load(path: &Path) -> Result<Vec<sentences::Sentence>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (_, body) = frontmatter::split(&text);
    Ok(sentences::extract(body))
}
