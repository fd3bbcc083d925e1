use crate::detectors::code::CodeDetector;
use crate::detectors::file::{FileDetector, FileCheck};
use crate::detectors::manifest::ManifestDetector;
use crate::detectors::Detector;
use crate::patterns::technologies::{catalog_for, detectors_for, JS_TECH_DETECTION};
use crate::patterns::{ManifestFormat, PatternSpec, TechCategory};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Technology names per category. All six categories are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TechStack(BTreeMap<TechCategory, BTreeSet<String>>);

impl Default for TechStack {
    fn default() -> Self {
        Self(
            TechCategory::ALL
                .iter()
                .map(|c| (*c, BTreeSet::new()))
                .collect(),
        )
    }
}

impl TechStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `technology` under `category`; returns false if it was already there.
    pub fn insert(&mut self, category: TechCategory, technology: impl Into<String>) -> bool {
        self.0.entry(category).or_default().insert(technology.into())
    }

    pub fn get(&self, category: TechCategory) -> &BTreeSet<String> {
        // Every category is inserted on construction.
        &self.0[&category]
    }

    pub fn contains(&self, category: TechCategory, technology: &str) -> bool {
        self.get(category).contains(technology)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TechCategory, &BTreeSet<String>)> {
        self.0.iter()
    }

    /// True when no category holds any technology.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }
}

/// One technology to classify and the checks that can reveal it.
pub struct TechEntry {
    pub category: TechCategory,
    pub technology: String,
    pub specs: Vec<PatternSpec>,
}

/// Classifies the project's technologies into the six stack categories.
///
/// A technology is present when any of its checks reports a match. A check
/// that fails is logged and counted as no match for that check alone.
pub struct StackClassifier {
    root: PathBuf,
    entries: Vec<TechEntry>,
    max_file_size: u64,
}

impl StackClassifier {
    /// Builds the entries from the main language's catalog and, when the
    /// root holds a `package.json`, from the JavaScript package table.
    pub fn new(root: &Path, main_language: Option<&str>, max_file_size: u64) -> Self {
        let mut entries = Vec::new();

        if let Some(catalog) = main_language.and_then(catalog_for) {
            for (category, technologies) in catalog.categories {
                for technology in *technologies {
                    entries.push(TechEntry {
                        category: *category,
                        technology: technology.to_string(),
                        specs: detectors_for(technology).to_vec(),
                    });
                }
            }
        }

        if root.join("package.json").is_file() {
            for js in JS_TECH_DETECTION {
                let category = match js.kind {
                    "frontend" => TechCategory::Frontend,
                    "backend" => TechCategory::Backend,
                    _ => TechCategory::Database,
                };
                entries.push(TechEntry {
                    category,
                    technology: js.name.to_string(),
                    specs: js
                        .packages
                        .iter()
                        .map(|&key| PatternSpec::StructuredKey {
                            manifest: "package.json",
                            format: ManifestFormat::PackageJson,
                            key,
                        })
                        .collect(),
                });
            }
        }

        Self::from_entries(root, entries, max_file_size)
    }

    /// Classifier over an explicit entry list.
    pub fn from_entries(root: &Path, entries: Vec<TechEntry>, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            entries,
            max_file_size,
        }
    }

    pub fn entries(&self) -> &[TechEntry] {
        &self.entries
    }

    /// Builds the detector that runs one pattern.
    pub fn build_detector(&self, spec: &PatternSpec) -> Box<dyn Detector> {
        match spec {
            PatternSpec::FileExistence { .. } | PatternSpec::ContentSubstring { .. } => {
                let checks = FileCheck::from_spec(spec).into_iter().collect();
                Box::new(FileDetector::new(&self.root, checks, self.max_file_size))
            }
            PatternSpec::StructuredKey {
                manifest,
                format,
                key,
            } => Box::new(ManifestDetector::new(
                &self.root,
                *manifest,
                *format,
                *key,
                self.max_file_size,
            )),
            PatternSpec::SourceRegex { pattern } => {
                Box::new(CodeDetector::new(&self.root, *pattern, self.max_file_size))
            }
        }
    }

    /// Detectors for every entry, in entry order.
    pub fn prepare_detectors(&self) -> Vec<(TechCategory, &str, Vec<Box<dyn Detector>>)> {
        self.entries
            .iter()
            .map(|entry| {
                let detectors = entry.specs.iter().map(|s| self.build_detector(s)).collect();
                (entry.category, entry.technology.as_str(), detectors)
            })
            .collect()
    }

    pub fn analyze_stack(&self) -> TechStack {
        let mut stack = TechStack::new();

        for (category, technology, mut detectors) in self.prepare_detectors() {
            if stack.contains(category, technology) {
                continue;
            }
            let present = detectors.iter_mut().any(|detector| match detector.detect() {
                Ok(result) => result.found(),
                Err(err) => {
                    warn!(technology, error = %err, "Detector failed, treating as no match");
                    false
                }
            });
            if present {
                debug!(technology, category = %category, "Technology detected");
                stack.insert(category, technology);
            }
        }

        stack
    }
}
