use crate::patterns::configs::is_config_like;
use crate::utils::{dotted_extension, read_text, relative_path, walk_files};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Probable hardcoded credentials found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretFinding {
    /// File the values were found in, relative to the scanned root.
    pub file: String,
    /// Captured credential values, in order of appearance.
    pub values: Vec<String>,
}

lazy_static::lazy_static! {
    /// `key: value` / `key = value` assignments of a credential-like key.
    /// Case-sensitive on purpose: `password` matches, `PASSWORD` does not.
    pub static ref PASSWORD_PATTERN: Regex = Regex::new(
        r#"(?P<key>password|secret|token|apikey|access_key|client_secret)\s*[:=]\s*['"]?(?P<value>[a-zA-Z0-9_!@#$%^&*()]+)['"]?"#
    ).unwrap();
}

/// Collects every credential value assigned in `content`.
///
/// Returns `None` when nothing credential-shaped is present.
pub fn scan_secrets(content: &str, file: &str) -> Option<SecretFinding> {
    let values: Vec<String> = PASSWORD_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.name("value").map(|m| m.as_str().to_string()))
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(SecretFinding {
            file: file.to_string(),
            values,
        })
    }
}

/// Tree-wide secret scan over configuration-like files.
pub struct SecretAnalyzer {
    root: PathBuf,
    max_file_size: u64,
}

impl SecretAnalyzer {
    pub fn new(root: &Path, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            max_file_size,
        }
    }

    /// Scans every config-like file under the root.
    ///
    /// One finding per file with at least one match, ordered by path.
    pub fn find_secrets(&self) -> Vec<SecretFinding> {
        let candidates: Vec<PathBuf> = walk_files(&self.root)
            .into_iter()
            .filter(|path| {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                is_config_like(name, dotted_extension(path).as_deref())
            })
            .collect();

        debug!(files = candidates.len(), "Scanning config-like files for secrets");

        let mut findings: Vec<SecretFinding> = candidates
            .par_iter()
            .filter_map(|path| {
                let content = read_text(path, self.max_file_size)?;
                scan_secrets(&content, &relative_path(&self.root, path))
            })
            .collect();

        findings.sort_by(|a, b| a.file.cmp(&b.file));
        findings
    }
}
