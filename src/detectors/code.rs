use super::{ratio, DetectionResult, Detector, Match};
use crate::error::DetectError;
use crate::patterns::languages::SOURCE_EXTENSIONS;
use crate::utils::{dotted_extension, read_text, relative_path, walk_files};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Searches source files line by line for a case-insensitive regex.
///
/// Every occurrence is recorded, not only the first per line. Confidence is
/// the number of distinct files with a hit over the number of source files
/// that could be read.
pub struct CodeDetector {
    root: PathBuf,
    pattern: String,
    max_file_size: u64,
    files_scanned: usize,
    files_matched: usize,
}

/// Per-file outcome: `None` when the file could not be read.
type FileScan = Option<Vec<Match>>;

impl CodeDetector {
    pub fn new(root: &Path, pattern: impl Into<String>, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            pattern: pattern.into(),
            max_file_size,
            files_scanned: 0,
            files_matched: 0,
        }
    }

    fn compile(&self) -> Result<Regex, DetectError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| DetectError::InvalidRegex {
                pattern: self.pattern.clone(),
                source,
            })
    }

    fn scan_file(&self, regex: &Regex, path: &Path) -> FileScan {
        let content = read_text(path, self.max_file_size)?;
        let location = relative_path(&self.root, path);
        let mut matches = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            for m in regex.find_iter(line) {
                matches.push(
                    Match::new(location.clone())
                        .with_line(idx + 1)
                        .with_payload(m.as_str()),
                );
            }
        }
        Some(matches)
    }
}

fn is_source_file(path: &Path) -> bool {
    dotted_extension(path).map_or(false, |ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
}

impl Detector for CodeDetector {
    fn detect(&mut self) -> Result<DetectionResult, DetectError> {
        self.files_scanned = 0;
        self.files_matched = 0;
        let regex = self.compile()?;

        let sources: Vec<PathBuf> = walk_files(&self.root)
            .into_iter()
            .filter(|p| is_source_file(p))
            .collect();

        let scans: Vec<FileScan> = sources
            .par_iter()
            .map(|path| self.scan_file(&regex, path))
            .collect();

        let mut matches = Vec::new();
        for scan in scans.into_iter().flatten() {
            self.files_scanned += 1;
            if !scan.is_empty() {
                self.files_matched += 1;
            }
            matches.extend(scan);
        }

        debug!(
            pattern = %self.pattern,
            scanned = self.files_scanned,
            matched = self.files_matched,
            "Source regex check finished"
        );
        Ok(DetectionResult::new(matches))
    }

    fn confidence(&self) -> f64 {
        ratio(self.files_matched, self.files_scanned)
    }
}
