use super::{ratio, DetectionResult, Detector, Match};
use crate::error::DetectError;
use crate::patterns::configs::{patterns_for, total_patterns};
use crate::rules::secrets::{scan_secrets, SecretFinding};
use crate::utils::{read_text, relative_path, walk_files};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything one pass over the well-known config files turned up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigScan {
    /// Technology name to the files that revealed it.
    pub technologies: BTreeMap<String, Vec<String>>,
    /// Secrets found in those same files.
    pub secrets: Vec<SecretFinding>,
}

/// Reads well-known config files anywhere in the tree and maps literal
/// substrings to technologies, running the secret scanner on the side.
///
/// Confidence is the number of substring hits over the number of configured
/// substrings, capped at `1.0`.
pub struct ConfigDetector {
    root: PathBuf,
    max_file_size: u64,
    hits: usize,
}

impl ConfigDetector {
    pub fn new(root: &Path, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            max_file_size,
            hits: 0,
        }
    }

    /// Runs the scan and returns technologies and secrets.
    pub fn scan(&mut self) -> ConfigScan {
        self.hits = 0;
        let mut result = ConfigScan::default();

        for path in walk_files(&self.root) {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(patterns) = patterns_for(name) else {
                continue;
            };
            let Some(content) = read_text(&path, self.max_file_size) else {
                continue;
            };
            let location = relative_path(&self.root, &path);

            for (needle, technology) in patterns {
                if content.contains(needle) {
                    self.hits += 1;
                    let files = result
                        .technologies
                        .entry(technology.to_string())
                        .or_default();
                    if !files.contains(&location) {
                        files.push(location.clone());
                    }
                }
            }

            if let Some(finding) = scan_secrets(&content, &location) {
                result.secrets.push(finding);
            }
        }

        debug!(
            technologies = result.technologies.len(),
            secrets = result.secrets.len(),
            "Config file scan finished"
        );
        result
    }
}

impl Detector for ConfigDetector {
    fn detect(&mut self) -> Result<DetectionResult, DetectError> {
        let scan = self.scan();
        let matches = scan
            .technologies
            .into_iter()
            .flat_map(|(tech, files)| {
                files
                    .into_iter()
                    .map(move |file| Match::new(file).with_payload(tech.clone()))
            })
            .collect();
        Ok(DetectionResult::new(matches))
    }

    fn confidence(&self) -> f64 {
        ratio(self.hits, total_patterns())
    }
}
