use crate::analyzers::dependency::{DependencyExtractor, DependencyMap};
use crate::analyzers::language::{main_language, LanguageAnalyzer, SlocSummary};
use crate::analyzers::stack::{StackClassifier, TechStack};
use crate::config::ScanConfig;
use crate::detectors::config::ConfigDetector;
use crate::detectors::endpoint::{AjaxRecord, EndpointDetector, EndpointRecord};
use crate::error::ScanError;
use crate::patterns::configs::DATABASE_TECHNOLOGIES;
use crate::patterns::TechCategory;
use crate::rules::secrets::{SecretAnalyzer, SecretFinding};
use crate::utils::walk_files;
use anyhow::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

/// Holds the results of the analysis.
/// Assembled once per run and serialized verbatim for JSON output.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    /// Percentage of files per language.
    pub languages: BTreeMap<String, f64>,
    /// Non-blank line counts.
    pub sloc: SlocSummary,
    /// Stack findings merged with dependency and config findings.
    pub stack: TechStack,
    /// Raw dependency findings keyed by their rule category.
    pub dependencies: DependencyMap,
    /// Secrets from the tree-wide config scan.
    pub secrets: Vec<SecretFinding>,
    /// Server-side route declarations, ordered by file and line.
    pub endpoints: Vec<EndpointRecord>,
    /// Client-side call sites, ordered by file and line.
    pub ajax: Vec<AjaxRecord>,
    /// Technology name to the config files that revealed it.
    pub configs: BTreeMap<String, Vec<String>>,
    /// Secrets found by the config technology detector.
    pub config_secrets: Vec<SecretFinding>,
    /// Summary statistics of the analysis.
    pub summary: ScanSummary,
}

/// Summary statistics for the analysis report.
#[derive(Debug, Serialize)]
pub struct ScanSummary {
    /// Language with the highest file share, if any files were found.
    pub main_language: Option<String>,
    /// Total number of files scanned.
    pub total_files: usize,
    pub endpoint_count: usize,
    pub ajax_count: usize,
    /// Distinct files with at least one secret, across both secret sources.
    pub secret_count: usize,
}

/// The main analyzer struct.
pub struct Codescope {
    pub config: ScanConfig,
}

impl Codescope {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Runs every phase over `path` and assembles the report.
    ///
    /// Fails only when `path` is not an existing directory; every other
    /// problem is skipped and logged.
    pub fn analyze(&self, path: &Path) -> Result<AnalysisReport> {
        // Validate the root before any walk
        if !path.exists() {
            return Err(ScanError::RootNotFound(path.to_path_buf()).into());
        }
        if !path.is_dir() {
            return Err(ScanError::NotADirectory(path.to_path_buf()).into());
        }
        let max = self.config.max_file_size;

        // Language shares pick the catalog for every later phase
        let language_analyzer = LanguageAnalyzer::new(path, max);
        let languages = language_analyzer.detect_languages();
        let sloc = language_analyzer.count_sloc();
        let main = main_language(&languages);
        info!(main_language = ?main, languages = languages.len(), "Language detection finished");

        // Stack and dependency detection
        let stack = StackClassifier::new(path, main.as_deref(), max).analyze_stack();
        debug!(?stack, "Stack classification finished");

        let dependencies = DependencyExtractor::new(path, main.as_deref(), max).analyze();

        // Secrets in config-like files
        let secrets = SecretAnalyzer::new(path, max).find_secrets();
        debug!(files = secrets.len(), "Secret scan finished");

        // Endpoints are only extracted for languages present in the tree
        let endpoint_scan = EndpointDetector::new(path, languages.keys().cloned(), max).scan();
        info!(
            endpoints = endpoint_scan.endpoints.len(),
            ajax = endpoint_scan.ajax.len(),
            "Endpoint extraction finished"
        );

        let config_scan = ConfigDetector::new(path, max).scan();

        let stack = merge_stack(stack, &dependencies, &config_scan.technologies);

        // A file reported by both secret sources counts once
        let secret_files: BTreeSet<&str> = secrets
            .iter()
            .chain(&config_scan.secrets)
            .map(|finding| finding.file.as_str())
            .collect();

        let summary = ScanSummary {
            main_language: main,
            total_files: walk_files(path).len(),
            endpoint_count: endpoint_scan.endpoints.len(),
            ajax_count: endpoint_scan.ajax.len(),
            secret_count: secret_files.len(),
        };

        Ok(AnalysisReport {
            languages,
            sloc,
            stack,
            dependencies,
            secrets,
            endpoints: endpoint_scan.endpoints,
            ajax: endpoint_scan.ajax,
            configs: config_scan.technologies,
            config_secrets: config_scan.secrets,
            summary,
        })
    }
}

/// Folds dependency and config findings into the stack taxonomy.
///
/// Dependency labels map through [`TechCategory::from_label`], unknown labels
/// land in backend. Config technologies go to database when they are
/// database engines, to backend otherwise.
pub fn merge_stack(
    mut stack: TechStack,
    dependencies: &DependencyMap,
    configs: &BTreeMap<String, Vec<String>>,
) -> TechStack {
    for (label, technologies) in dependencies {
        let category = TechCategory::from_label(label).unwrap_or_else(|| {
            debug!(label = %label, "Unknown dependency category, filing under backend");
            TechCategory::Backend
        });
        for technology in technologies {
            stack.insert(category, technology.clone());
        }
    }

    for technology in configs.keys() {
        let category = if DATABASE_TECHNOLOGIES.contains(&technology.as_str()) {
            TechCategory::Database
        } else {
            TechCategory::Backend
        };
        stack.insert(category, technology.clone());
    }

    stack
}
