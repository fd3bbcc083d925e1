use crate::patterns::languages::language_for;
use crate::utils::{dotted_extension, read_text, walk_files};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Non-blank line counts per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlocSummary {
    pub by_language: BTreeMap<String, usize>,
    pub total: usize,
}

/// Classifies files by extension and counts their lines.
pub struct LanguageAnalyzer {
    root: PathBuf,
    max_file_size: u64,
}

fn classify(path: &Path) -> &'static str {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    language_for(dotted_extension(path).as_deref(), name)
}

impl LanguageAnalyzer {
    pub fn new(root: &Path, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            max_file_size,
        }
    }

    /// Percentage of files per language. Sums to 100 for a non-empty tree;
    /// empty for an empty one.
    pub fn detect_languages(&self) -> BTreeMap<String, f64> {
        let files = walk_files(&self.root);
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for path in &files {
            *counts.entry(classify(path).to_string()).or_default() += 1;
        }

        let total = files.len() as f64;
        counts
            .into_iter()
            .map(|(lang, count)| (lang, count as f64 * 100.0 / total))
            .collect()
    }

    /// Non-blank lines per language. Unreadable files count for nothing.
    pub fn count_sloc(&self) -> SlocSummary {
        let per_file: Vec<(&'static str, usize)> = walk_files(&self.root)
            .par_iter()
            .filter_map(|path| {
                let text = read_text(path, self.max_file_size)?;
                let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
                Some((classify(path), lines))
            })
            .collect();

        let mut summary = SlocSummary::default();
        for (lang, lines) in per_file {
            *summary.by_language.entry(lang.to_string()).or_default() += lines;
            summary.total += lines;
        }
        summary
    }
}

/// Language with the highest share; ties go to the name that sorts first.
pub fn main_language(distribution: &BTreeMap<String, f64>) -> Option<String> {
    distribution
        .iter()
        .fold(None, |best: Option<(&String, f64)>, (lang, pct)| match best {
            Some((_, best_pct)) if *pct <= best_pct => best,
            _ => Some((lang, *pct)),
        })
        .map(|(lang, _)| lang.clone())
}
