//! `postkit import`: turn a saved LLM reply into article files.

use super::tag::tag_text;
use crate::article::{self, ArticlePaths};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use postkit_syntax::{response, validate};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File holding the raw model reply
    pub reply: PathBuf,

    /// Article id to write to
    #[arg(long)]
    pub article_id: String,

    /// Language of the article body (defaults to the source language)
    #[arg(long)]
    pub lang: Option<String>,

    /// Overwrite an existing article body
    #[arg(long)]
    pub force: bool,
}

/// Files written by one import.
#[derive(Debug, Default)]
pub struct Written {
    pub markdown: Option<(PathBuf, usize)>,
    pub meta: Option<PathBuf>,
    pub captions: Option<PathBuf>,
}

pub fn run(args: &ImportArgs, config: &Config) -> Result<()> {
    let reply = fs::read_to_string(&args.reply)
        .with_context(|| format!("failed to read {}", args.reply.display()))?;
    let paths = ArticlePaths::new(config, &args.article_id)?;
    let lang = args.lang.as_deref().unwrap_or(&config.source_language);

    let written = import_reply(&reply, &paths, lang, args.force)?;

    if let Some((path, tags)) = &written.markdown {
        println!("wrote {} ({} sentence tags)", path.display(), tags);
    }
    if let Some(path) = &written.meta {
        println!("wrote {}", path.display());
    }
    if let Some(path) = &written.captions {
        println!("wrote {}", path.display());
    }
    println!("next: postkit check-article {}", paths.id);
    Ok(())
}

pub fn import_reply(reply: &str, paths: &ArticlePaths, lang: &str, force: bool) -> Result<Written> {
    let parsed = response::parse(reply);
    if parsed.is_empty() {
        anyhow::bail!("no markdown or JSON blocks found in the reply");
    }

    let md_path = paths.markdown(lang);
    if parsed.markdown.is_some() && md_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            md_path.display()
        );
    }

    for dir in [&paths.article_dir, &paths.images_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    }

    let mut written = Written::default();

    match &parsed.markdown {
        Some(markdown) => {
            let (text, _) = tag_text(markdown);
            let report = validate(&text);
            if !report.is_well_formed() {
                log::warn!("sentence tags in the reply are not sequential");
            }
            fs::write(&md_path, &text)
                .with_context(|| format!("failed to write {}", md_path.display()))?;
            written.markdown = Some((md_path, report.total_tags));
        }
        None => log::warn!("reply has no markdown block"),
    }

    match &parsed.meta {
        Some(meta) => {
            let path = paths.meta();
            article::write_json(&path, meta)?;
            written.meta = Some(path);
        }
        None => log::warn!("reply has no usable {} block", article::META_FILE),
    }

    match &parsed.captions {
        Some(captions) => {
            let path = paths.captions();
            article::write_json(&path, captions)?;
            written.captions = Some(path);
        }
        None => log::warn!("reply has no usable {} block", article::CAPTIONS_FILE),
    }

    Ok(written)
}
