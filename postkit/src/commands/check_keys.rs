//! `postkit check-keys`: compare the UI message dictionary with the
//! translation keys the site sources look up.

use crate::article;
use crate::config::Config;
use crate::inputs;
use crate::render;
use anyhow::{Context, Result};
use clap::Args;
use postkit_syntax::keys::{self, KeyReport, KeyUsage};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckKeysArgs {
    /// Message dictionary. Defaults to `<base>/messages/<source_language>.json`
    pub messages: Option<PathBuf>,

    /// Source tree to scan. Defaults to `<base>/src`
    pub src_dir: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    pub format: String,

    /// Also write a dictionary reduced to the keys in use
    #[arg(long, value_name = "PATH")]
    pub write_minimal: Option<PathBuf>,

    /// Exit with an error when a used key is not defined
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: &CheckKeysArgs, config: &Config) -> Result<()> {
    let renderer = render::create_renderer(&args.format)?;
    let messages = args.messages.clone().unwrap_or_else(|| config.messages_file());
    let src_dir = args.src_dir.clone().unwrap_or_else(|| config.sources_root());

    let dictionary = load_dictionary(&messages)?;
    let usage = scan_tree(&src_dir)?;
    let report = check_keys(&dictionary, &usage);
    print!("{}", renderer.keys(&report)?);

    if let Some(path) = &args.write_minimal {
        let minimal = keys::minimal_dictionary(&dictionary, &usage.keys);
        article::write_json(path, &minimal)?;
        log::info!(
            "wrote {} ({} of {} keys kept)",
            path.display(),
            keys::flatten_keys(&minimal).len(),
            report.defined
        );
    }

    if args.strict && !report.undefined.is_empty() {
        anyhow::bail!(
            "{} translation key(s) used but not defined in {}",
            report.undefined.len(),
            messages.display()
        );
    }
    Ok(())
}

pub fn check_keys(dictionary: &Value, usage: &KeyUsage) -> KeyReport {
    keys::compare(&keys::flatten_keys(dictionary), &usage.all())
}

fn load_dictionary(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let dictionary: Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    if !dictionary.is_object() {
        anyhow::bail!("{} is not a JSON object", path.display());
    }
    Ok(dictionary)
}

/// Merge the lookups of every source file under `dir`. Unreadable files are
/// logged and skipped.
fn scan_tree(dir: &Path) -> Result<KeyUsage> {
    let files = inputs::source_files(dir, keys::SOURCE_EXTENSIONS)?;
    let mut usage = KeyUsage::default();
    for path in &files {
        match fs::read_to_string(path) {
            Ok(content) => {
                let found = keys::scan_source(&content);
                if !found.is_empty() {
                    log::debug!(
                        "{}: {} namespace(s), {} key(s)",
                        path.display(),
                        found.namespaces.len(),
                        found.keys.len()
                    );
                }
                usage.merge(found);
            }
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }
    log::debug!("scanned {} source files under {}", files.len(), dir.display());
    Ok(usage)
}
