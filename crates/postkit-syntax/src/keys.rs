//! UI translation-key analysis.
//!
//! The site's message dictionary (`messages/<lang>.json`) is a nested JSON
//! object addressed by dotted keys. Components pick a namespace with
//! `useTranslations("Ns")` or `getTranslations(...)` and then look up
//! `t("key")` inside it. Scanning is a static approximation: every `t()`
//! key in a file is combined with every namespace opened in that file, and
//! template literals with `${...}` are skipped.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::LazyLock;

static RE_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:useTranslations|getTranslations)\(\s*["']([^"']+)["']\s*\)"#).unwrap()
});

static RE_NAMESPACE_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bgetTranslations\(\s*\{[^}]*\bnamespace\s*:\s*["']([^"']+)["']"#).unwrap()
});

static RE_T_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bt\(\s*["'`]([^"'`]+)["'`]\s*[,)]"#).unwrap());

/// Source file extensions that are scanned for lookups.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Translation lookups found in one source file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub namespaces: BTreeSet<String>,
    /// Fully qualified keys (namespace applied).
    pub keys: BTreeSet<String>,
}

impl KeyUsage {
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.keys.is_empty()
    }

    pub fn merge(&mut self, other: KeyUsage) {
        self.namespaces.extend(other.namespaces);
        self.keys.extend(other.keys);
    }

    /// Namespaces and keys together.
    pub fn all(&self) -> BTreeSet<String> {
        self.namespaces.union(&self.keys).cloned().collect()
    }
}

/// Collect the translation lookups in one source file.
pub fn scan_source(content: &str) -> KeyUsage {
    let namespaces: BTreeSet<String> = RE_NAMESPACE
        .captures_iter(content)
        .chain(RE_NAMESPACE_OPTION.captures_iter(content))
        .map(|caps| caps[1].to_string())
        .collect();

    let lookups: BTreeSet<&str> = RE_T_CALL
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|key| !key.contains("${"))
        .collect();

    let keys = if namespaces.is_empty() {
        lookups.iter().map(|k| k.to_string()).collect()
    } else {
        let mut keys = BTreeSet::new();
        for ns in &namespaces {
            keys.extend(lookups.iter().map(|k| format!("{}.{}", ns, k)));
        }
        keys
    };

    KeyUsage { namespaces, keys }
}

/// Every dotted key in a dictionary, intermediate objects included.
pub fn flatten_keys(dictionary: &Value) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    if let Value::Object(map) = dictionary {
        collect_keys(map, "", &mut keys);
    }
    keys
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut BTreeSet<String>) {
    for (key, value) in map {
        let full = join_key(prefix, key);
        if let Value::Object(child) = value {
            collect_keys(child, &full, keys);
        }
        keys.insert(full);
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Defined keys checked against the keys the sources use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    pub defined: usize,
    pub used: usize,
    /// Used keys that are defined.
    pub matched: usize,
    /// Defined keys that nothing uses, directly or through a descendant.
    pub unused: Vec<String>,
    /// Used keys missing from the dictionary.
    pub undefined: Vec<String>,
}

impl KeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty() && self.undefined.is_empty()
    }
}

pub fn compare(defined: &BTreeSet<String>, used: &BTreeSet<String>) -> KeyReport {
    // `a.b.c` in use keeps `a` and `a.b` from being reported as unused.
    let mut covered = used.clone();
    for key in used {
        let mut end = key.len();
        while let Some(dot) = key[..end].rfind('.') {
            covered.insert(key[..dot].to_string());
            end = dot;
        }
    }

    KeyReport {
        defined: defined.len(),
        used: used.len(),
        matched: defined.intersection(used).count(),
        unused: defined.difference(&covered).cloned().collect(),
        undefined: used.difference(defined).cloned().collect(),
    }
}

/// Reduce `dictionary` to the entries reachable from `keys`.
///
/// A key that names an object keeps the whole subtree. Entry order follows
/// the original dictionary.
pub fn minimal_dictionary(dictionary: &Value, keys: &BTreeSet<String>) -> Value {
    match dictionary {
        Value::Object(map) => Value::Object(retain(map, "", keys)),
        _ => Value::Object(Map::new()),
    }
}

fn retain(map: &Map<String, Value>, prefix: &str, keys: &BTreeSet<String>) -> Map<String, Value> {
    let mut kept = Map::new();
    for (key, value) in map {
        let full = join_key(prefix, key);
        if keys.contains(&full) {
            kept.insert(key.clone(), value.clone());
        } else if let Value::Object(child) = value {
            let inner = retain(child, &full, keys);
            if !inner.is_empty() {
                kept.insert(key.clone(), Value::Object(inner));
            }
        }
    }
    kept
}
