//! Article tree layout and `meta.json` defaults.
//!
//! An article `<id>` lives in two places:
//!
//! - `<posts>/<id>/<lang>.md` and `<posts>/<id>/meta.json`
//! - `<images>/<id>/captions.json` plus the image files it describes

use crate::config::Config;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const META_FILE: &str = "meta.json";
pub const CAPTIONS_FILE: &str = "captions.json";

/// Keys `meta.json` must carry.
pub const REQUIRED_META_FIELDS: &[&str] = &["authorId", "tags", "publishDate", "heroImage"];

#[derive(Debug, Clone)]
pub struct ArticlePaths {
    pub id: String,
    pub article_dir: PathBuf,
    pub images_dir: PathBuf,
}

impl ArticlePaths {
    pub fn new(config: &Config, id: &str) -> Result<Self> {
        check_id(id)?;
        Ok(Self {
            id: id.to_string(),
            article_dir: config.posts_root().join(id),
            images_dir: config.images_root().join(id),
        })
    }

    pub fn markdown(&self, lang: &str) -> PathBuf {
        self.article_dir.join(format!("{}.md", lang))
    }

    pub fn meta(&self) -> PathBuf {
        self.article_dir.join(META_FILE)
    }

    pub fn captions(&self) -> PathBuf {
        self.images_dir.join(CAPTIONS_FILE)
    }
}

/// Article ids become directory names, so they must be a single plain component.
fn check_id(id: &str) -> Result<()> {
    let plain = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\']);
    if !plain {
        anyhow::bail!("invalid article id: {:?}", id);
    }
    Ok(())
}

/// `/images/blog/<id>/`
pub fn hero_prefix(config: &Config, id: &str) -> String {
    format!("{}/{}/", config.images_url.trim_end_matches('/'), id)
}

/// Default `meta.json` contents, in the order they are written.
pub fn default_meta(config: &Config, id: &str, publish_date: &str) -> Map<String, Value> {
    let tags: Map<String, Value> = config
        .language_codes()
        .map(|code| (code.to_string(), json!([])))
        .collect();

    let mut meta = Map::new();
    meta.insert("authorId".into(), json!(config.default_author));
    meta.insert("tags".into(), Value::Object(tags));
    meta.insert("publishDate".into(), json!(publish_date));
    meta.insert(
        "heroImage".into(),
        json!(format!("{}hero.jpg", hero_prefix(config, id))),
    );
    meta.insert("featured".into(), json!(false));
    meta.insert("relatedPosts".into(), json!([]));
    meta
}

/// Copy absent keys from `defaults` into `meta`; returns the keys added.
pub fn fill_defaults(meta: &mut Map<String, Value>, defaults: Map<String, Value>) -> Vec<String> {
    let mut added = Vec::new();
    for (key, value) in defaults {
        if !meta.contains_key(&key) {
            meta.insert(key.clone(), value);
            added.push(key);
        }
    }
    added
}

/// Local time in the `2025-01-31T09:30:00.123456` form the blog expects.
pub fn now_iso() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Write pretty-printed JSON with a trailing newline, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    fs::write(path, text + "\n").with_context(|| format!("failed to write {}", path.display()))
}
