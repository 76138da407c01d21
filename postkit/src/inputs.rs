//! Input resolution for the batch commands.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSION: &str = "md";

/// Expand files, directories and glob patterns into a sorted list of
/// markdown files.
///
/// A directory contributes its own `*.md` files plus those one level down,
/// which covers both a single article directory and the posts root
/// (`posts/<id>/<lang>.md`).
pub fn expand(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            scan_dir(path, 1, &mut files)?;
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            log::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn scan_dir(dir: &Path, depth: usize, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries.flatten() {
        let p = entry.path();
        if p.is_file() && is_markdown(&p) {
            files.push(p);
        } else if p.is_dir() && depth > 0 {
            scan_dir(&p, depth - 1, files)?;
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXTENSION)
}

/// Every file under `dir` (recursively) with one of `extensions`, sorted.
pub fn source_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();
    for ext in extensions {
        let pattern = format!("{}/**/*.{}", root, ext);
        let matches = glob::glob(&pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?;
        files.extend(matches.filter_map(|r| r.ok()).filter(|p| p.is_file()));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

pub fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

/// `ja.md` → `ja.md.backup`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// Copy `path` next to itself with a `.backup` suffix.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let target = backup_path(path);
    fs::copy(path, &target)
        .with_context(|| format!("failed to back up {} to {}", path.display(), target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn backup_keeps_extension() {
        assert_eq!(
            backup_path(Path::new("posts/006/ja.md")),
            PathBuf::from("posts/006/ja.md.backup")
        );
    }

    #[test]
    fn directory_scans_one_level_of_articles() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("001/ja.md"));
        touch(&dir.path().join("001/en.md"));
        touch(&dir.path().join("001/ja.md.backup"));
        touch(&dir.path().join("001/meta.json"));
        touch(&dir.path().join("002/deep/skip.md"));
        touch(&dir.path().join("top.md"));

        let files = expand(&[dir.path().to_string_lossy().to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["001/en.md", "001/ja.md", "top.md"]);
    }

    #[test]
    fn glob_and_duplicates() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a/ja.md"));
        touch(&dir.path().join("b/ja.md"));
        let pattern = format!("{}/*/ja.md", dir.path().display());
        let explicit = dir.path().join("a/ja.md").to_string_lossy().to_string();
        let files = expand(&[pattern, explicit]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn source_files_recurse_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("app/page.tsx"));
        touch(&dir.path().join("app/blog/[slug]/page.tsx"));
        touch(&dir.path().join("lib/i18n.ts"));
        touch(&dir.path().join("styles/site.css"));

        let files = source_files(dir.path(), &["ts", "tsx"]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["app/blog/[slug]/page.tsx", "app/page.tsx", "lib/i18n.ts"]);
    }

    #[test]
    fn source_files_need_a_directory() {
        assert!(source_files(Path::new("/no/such/src"), &["ts"]).is_err());
    }

    #[test]
    fn unmatched_pattern_is_empty() {
        let files = expand(&["/no/such/dir/*.md".to_string()]).unwrap();
        assert!(files.is_empty());
    }
}
