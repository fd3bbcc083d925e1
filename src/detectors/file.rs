use super::{ratio, DetectionResult, Detector, Match};
use crate::error::DetectError;
use crate::patterns::{EntryKind, PatternSpec};
use crate::utils::{is_vendor_dir, read_text, relative_path};
use std::path::{Path, PathBuf};

/// One existence check: a glob relative to the root, the expected entry kind,
/// and for files an optional substring the content must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub kind: EntryKind,
    pub path: String,
    pub content: Option<String>,
}

impl FileCheck {
    /// Converts existence and substring specs; other specs have no file check.
    pub fn from_spec(spec: &PatternSpec) -> Option<Self> {
        match spec {
            PatternSpec::FileExistence { kind, path } => Some(Self {
                kind: *kind,
                path: path.to_string(),
                content: None,
            }),
            PatternSpec::ContentSubstring { path, needle } => Some(Self {
                kind: EntryKind::File,
                path: path.to_string(),
                content: Some(needle.to_string()),
            }),
            PatternSpec::StructuredKey { .. } | PatternSpec::SourceRegex { .. } => None,
        }
    }
}

/// Detects files and directories by glob, optionally checking file content.
///
/// Confidence is the fraction of checks that produced at least one match.
pub struct FileDetector {
    root: PathBuf,
    checks: Vec<FileCheck>,
    max_file_size: u64,
    satisfied: usize,
}

impl FileDetector {
    pub fn new(root: &Path, checks: Vec<FileCheck>, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            checks,
            max_file_size,
            satisfied: 0,
        }
    }

    fn expand(&self, check: &FileCheck) -> Result<Vec<PathBuf>, DetectError> {
        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            check.path
        );
        let paths = glob::glob(&pattern).map_err(|source| DetectError::InvalidGlob {
            pattern: check.path.clone(),
            source,
        })?;
        // Unreadable directory entries surface as per-entry errors; skip them.
        Ok(paths
            .filter_map(Result::ok)
            .filter(|path| !self.under_vendor_dir(path))
            .collect())
    }

    /// True when any directory between the root and `path` is a vendor or
    /// VCS directory. `**` globs descend into those; walks never do.
    fn under_vendor_dir(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let mut components = rel.components().peekable();
        while let Some(component) = components.next() {
            // The entry itself may carry a vendor name (`dir("vendor")`).
            if components.peek().is_none() {
                break;
            }
            if component.as_os_str().to_str().map_or(false, is_vendor_dir) {
                return true;
            }
        }
        false
    }

    fn check_matches(&self, check: &FileCheck) -> Result<Vec<Match>, DetectError> {
        let mut matches = Vec::new();
        for path in self.expand(check)? {
            let location = relative_path(&self.root, &path);
            match check.kind {
                EntryKind::Dir => {
                    if path.is_dir() {
                        matches.push(Match::new(location));
                    }
                }
                EntryKind::File => {
                    if !path.is_file() {
                        continue;
                    }
                    match &check.content {
                        Some(needle) => {
                            let found = read_text(&path, self.max_file_size)
                                .map_or(false, |text| text.contains(needle.as_str()));
                            if found {
                                matches.push(Match::new(location).with_payload(needle.clone()));
                            }
                        }
                        None => matches.push(Match::new(location)),
                    }
                }
            }
        }
        Ok(matches)
    }
}

impl Detector for FileDetector {
    fn detect(&mut self) -> Result<DetectionResult, DetectError> {
        self.satisfied = 0;
        let mut matches = Vec::new();
        for check in &self.checks {
            let hits = self.check_matches(check)?;
            if !hits.is_empty() {
                self.satisfied += 1;
            }
            matches.extend(hits);
        }
        Ok(DetectionResult::new(matches))
    }

    fn confidence(&self) -> f64 {
        ratio(self.satisfied, self.checks.len())
    }
}
