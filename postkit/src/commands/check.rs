//! `postkit check-article`: verify an article's file tree.
//!
//! Checks run in a fixed order and record findings at three levels:
//! errors fail the command, warnings and info are reported only. With
//! `--fix`, missing directories are created and missing `meta.json` keys
//! are filled in before the checks run.

use crate::article::{self, ArticlePaths, REQUIRED_META_FIELDS};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use postkit_syntax::{frontmatter, sentences, validate};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Article id (directory name under the posts root)
    pub article_id: String,

    /// Create missing directories and fill missing meta.json fields
    #[arg(long)]
    pub fix: bool,
}

/// Findings collected while checking one article.
#[derive(Debug, Default)]
pub struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl Findings {
    fn error(&mut self, msg: String) {
        println!("error: {}", msg);
        self.errors.push(msg);
    }

    fn warning(&mut self, msg: String) {
        println!("warning: {}", msg);
        self.warnings.push(msg);
    }

    fn info(&mut self, msg: String) {
        println!("info: {}", msg);
        self.info.push(msg);
    }
}

pub fn run(args: &CheckArgs, config: &Config) -> Result<()> {
    let paths = ArticlePaths::new(config, &args.article_id)?;
    println!("checking article '{}'", paths.id);

    let findings = check_article(&paths, config, args.fix)?;

    println!();
    println!(
        "{} error(s), {} warning(s), {} info",
        findings.errors.len(),
        findings.warnings.len(),
        findings.info.len()
    );
    if !findings.errors.is_empty() {
        if !args.fix {
            println!("run with --fix to repair directories and meta.json");
        }
        anyhow::bail!(
            "article '{}' has {} error(s)",
            paths.id,
            findings.errors.len()
        );
    }
    println!("article '{}' is complete", paths.id);
    Ok(())
}

pub fn check_article(paths: &ArticlePaths, config: &Config, fix: bool) -> Result<Findings> {
    let mut f = Findings::default();

    if fix {
        fix_directories(paths, &mut f)?;
        fix_meta(paths, config, &mut f)?;
    }

    if !paths.article_dir.is_dir() {
        f.error(format!(
            "article directory does not exist: {}",
            paths.article_dir.display()
        ));
        return Ok(f);
    }
    if !paths.images_dir.is_dir() {
        f.warning(format!(
            "image directory does not exist: {}",
            paths.images_dir.display()
        ));
    }

    check_markdown(paths, config, &mut f);
    check_meta(paths, config, &mut f);
    let captions = check_captions(paths, config, &mut f);
    check_images(paths, captions.as_ref(), &mut f);
    Ok(f)
}

// -- Markdown -----------------------------------------------------------------

fn check_markdown(paths: &ArticlePaths, config: &Config, f: &mut Findings) {
    let source_lang = config.source_language.as_str();
    let mut bodies: Vec<(&str, String)> = Vec::new();

    for code in config.language_codes() {
        let path = paths.markdown(code);
        let name = format!("{}.md", code);
        if !path.is_file() {
            if code == source_lang {
                f.error(format!("source article {} not found", name));
            }
            continue;
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                f.error(format!("{}: failed to read: {}", name, e));
                continue;
            }
        };
        f.info(format!("{} article present", config.language_name(code)));

        let header = frontmatter::check(&text);
        if header.missing_open {
            f.error(format!("{}: front matter not found", name));
        } else if header.missing_close {
            f.error(format!("{}: front matter is not closed", name));
        }
        for key in &header.missing_keys {
            f.warning(format!("{}: front matter has no '{}' field", name, key));
        }

        let (_, body) = frontmatter::split(&text);
        let report = validate(body);
        if !report.has_tags {
            f.warning(format!("{}: no sentence tags", name));
        } else if !report.is_well_formed() {
            f.warning(format!(
                "{}: sentence tags are not sequential ({:?})",
                name, report.tag_numbers
            ));
        }
        bodies.push((code, body.to_string()));
    }

    check_sentence_ids(source_lang, &bodies, f);
}

/// Every translation should carry exactly the source article's sentence ids.
fn check_sentence_ids(source_lang: &str, bodies: &[(&str, String)], f: &mut Findings) {
    let Some((_, source_body)) = bodies.iter().find(|(code, _)| *code == source_lang) else {
        return;
    };
    let source = sentences::extract(source_body);
    if source.is_empty() {
        return;
    }
    for (code, body) in bodies.iter().filter(|(code, _)| *code != source_lang) {
        let target = sentences::extract(body);
        let missing = sentences::missing_ids(&source, &target);
        if !missing.is_empty() {
            f.warning(format!("{}.md: missing sentence ids {}", code, missing.join(", ")));
        }
        let extra = sentences::missing_ids(&target, &source);
        if !extra.is_empty() {
            f.warning(format!(
                "{}.md: sentence ids not in {}.md: {}",
                code,
                source_lang,
                extra.join(", ")
            ));
        }
    }
}

// -- meta.json ----------------------------------------------------------------

fn read_json(path: &std::path::Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn check_meta(paths: &ArticlePaths, config: &Config, f: &mut Findings) {
    let path = paths.meta();
    if !path.is_file() {
        f.error(format!("{} not found", article::META_FILE));
        return;
    }
    let meta = match read_json(&path) {
        Ok(Value::Object(meta)) => meta,
        Ok(_) => {
            f.error(format!("{}: expected a JSON object", article::META_FILE));
            return;
        }
        Err(e) => {
            f.error(format!("{}: {:#}", article::META_FILE, e));
            return;
        }
    };

    for field in REQUIRED_META_FIELDS {
        if !meta.contains_key(*field) {
            f.error(format!("{}: required field '{}' missing", article::META_FILE, field));
        }
    }
    if let Some(tags) = meta.get("tags") {
        for code in config.language_codes() {
            if tags.get(code).is_none() {
                f.warning(format!(
                    "{}: no tags for {}",
                    article::META_FILE,
                    config.language_name(code)
                ));
            }
        }
    }
    if let Some(hero) = meta.get("heroImage") {
        let prefix = article::hero_prefix(config, &paths.id);
        let ok = hero.as_str().is_some_and(|h| h.starts_with(&prefix));
        if !ok {
            f.warning(format!(
                "{}: heroImage should start with {}, got {}",
                article::META_FILE,
                prefix,
                hero
            ));
        }
    }
}

fn fix_meta(paths: &ArticlePaths, config: &Config, f: &mut Findings) -> Result<()> {
    let path = paths.meta();
    let mut meta = if path.is_file() {
        match read_json(&path) {
            Ok(Value::Object(meta)) => meta,
            Ok(_) | Err(_) => {
                log::warn!("{} is unreadable, rebuilding it", path.display());
                Map::new()
            }
        }
    } else {
        Map::new()
    };

    let defaults = article::default_meta(config, &paths.id, &article::now_iso());
    let added = article::fill_defaults(&mut meta, defaults);
    if added.is_empty() && path.is_file() {
        return Ok(());
    }
    for key in &added {
        f.info(format!("{}: added {}", article::META_FILE, key));
    }
    article::write_json(&path, &meta)?;
    f.info(format!("wrote {}", path.display()));
    Ok(())
}

fn fix_directories(paths: &ArticlePaths, f: &mut Findings) -> Result<()> {
    for dir in [&paths.article_dir, &paths.images_dir] {
        if !dir.is_dir() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory: {}", dir.display()))?;
            f.info(format!("created {}", dir.display()));
        }
    }
    Ok(())
}

// -- captions.json and images ---------------------------------------------------

/// Returns the parsed captions object when it could be read.
fn check_captions(
    paths: &ArticlePaths,
    config: &Config,
    f: &mut Findings,
) -> Option<Map<String, Value>> {
    let path = paths.captions();
    if !path.is_file() {
        f.warning(format!("{} not found", article::CAPTIONS_FILE));
        return None;
    }
    let captions = match read_json(&path) {
        Ok(Value::Object(captions)) => captions,
        Ok(_) => {
            f.error(format!("{}: expected a JSON object", article::CAPTIONS_FILE));
            return None;
        }
        Err(e) => {
            f.error(format!("{}: {:#}", article::CAPTIONS_FILE, e));
            return None;
        }
    };

    for (image, entry) in &captions {
        for field in ["alt", "caption"] {
            match entry.get(field) {
                None => f.warning(format!(
                    "{}: {} has no {}",
                    article::CAPTIONS_FILE,
                    image,
                    field
                )),
                Some(texts) => {
                    for code in config.language_codes() {
                        if texts.get(code).is_none() {
                            f.info(format!(
                                "{}: {}.{} has no {} text",
                                article::CAPTIONS_FILE,
                                image,
                                field,
                                config.language_name(code)
                            ));
                        }
                    }
                }
            }
        }
    }
    Some(captions)
}

fn check_images(paths: &ArticlePaths, captions: Option<&Map<String, Value>>, f: &mut Findings) {
    let Ok(entries) = fs::read_dir(&paths.images_dir) else {
        return;
    };
    let existing: BTreeSet<String> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e))
        })
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    let required: BTreeSet<String> = captions
        .map(|c| c.keys().cloned().collect())
        .unwrap_or_default();

    let mut missing = 0usize;
    for image in required.difference(&existing) {
        f.warning(format!("image file not found: {}", image));
        missing += 1;
    }
    for image in existing.difference(&required) {
        f.info(format!("image not listed in {}: {}", article::CAPTIONS_FILE, image));
    }
    if missing == 0 {
        f.info("all captioned images are present".to_string());
    }
}
