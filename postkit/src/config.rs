//! Project configuration.
//!
//! Built once in `main` and passed by reference to the commands that touch
//! the article tree. Values come from `--config`, else `./postkit.toml` if
//! present, else the defaults below.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "postkit.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Project root. Relative values resolve against the config file's directory.
    pub base_dir: PathBuf,
    /// Article markdown and `meta.json`, one directory per article id.
    pub posts_dir: PathBuf,
    /// Images and `captions.json`, one directory per article id.
    pub images_dir: PathBuf,
    /// URL prefix the `heroImage` field must start with (article id appended).
    pub images_url: String,
    pub default_author: String,
    /// Language every article is written in first.
    pub source_language: String,
    pub languages: Vec<Language>,
    /// UI message dictionaries, one `<lang>.json` per language.
    pub messages_dir: PathBuf,
    /// Site sources scanned for translation lookups.
    pub source_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        let languages = [
            ("ja", "日本語"),
            ("en", "English"),
            ("zh-CN", "中文(简体)"),
            ("zh-TW", "中文(繁體)"),
        ]
        .into_iter()
        .map(|(code, name)| Language {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();

        Self {
            base_dir: PathBuf::from("."),
            posts_dir: PathBuf::from("src/content/blog/posts"),
            images_dir: PathBuf::from("public/images/blog"),
            images_url: "/images/blog".to_string(),
            default_author: "nihongo-ai".to_string(),
            source_language: "ja".to_string(),
            languages,
            messages_dir: PathBuf::from("messages"),
            source_dir: PathBuf::from("src"),
        }
    }
}

impl Config {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] in the working
    /// directory, falling back to defaults when neither exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let candidate = Path::new(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(candidate)
                } else {
                    log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&text)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        if config.base_dir.is_relative() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            config.base_dir = dir.join(&config.base_dir);
        }
        config.check()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !self.languages.iter().any(|l| l.code == self.source_language) {
            anyhow::bail!(
                "source_language '{}' is not listed in languages",
                self.source_language
            );
        }
        Ok(())
    }

    pub fn posts_root(&self) -> PathBuf {
        self.base_dir.join(&self.posts_dir)
    }

    pub fn images_root(&self) -> PathBuf {
        self.base_dir.join(&self.images_dir)
    }

    /// Dictionary for the source language, the one every other is derived from.
    pub fn messages_file(&self) -> PathBuf {
        self.base_dir
            .join(&self.messages_dir)
            .join(format!("{}.json", self.source_language))
    }

    pub fn sources_root(&self) -> PathBuf {
        self.base_dir.join(&self.source_dir)
    }

    /// Display name for a language code, or the code itself if unknown.
    pub fn language_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.languages
            .iter()
            .find(|l| l.code == code)
            .map_or(code, |l| l.name.as_str())
    }

    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|l| l.code.as_str())
    }
}
