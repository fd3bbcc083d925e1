use crate::detectors::manifest::declared_packages;
use crate::patterns::dependencies::{rules_for, DependencyMatcher, DependencyRule};
use crate::patterns::technologies::JS_TECH_DETECTION;
use crate::patterns::ManifestFormat;
use crate::utils::read_text;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Category label to technology names. Labels are the rule table's own
/// strings (`backend`, `testing`, ...), reconciled with the stack taxonomy
/// only when the report is merged.
pub type DependencyMap = BTreeMap<String, BTreeSet<String>>;

/// Reads root-level manifests of the main language and `package.json`.
pub struct DependencyExtractor {
    root: PathBuf,
    main_language: Option<String>,
    max_file_size: u64,
}

impl DependencyExtractor {
    pub fn new(root: &Path, main_language: Option<&str>, max_file_size: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            main_language: main_language.map(str::to_string),
            max_file_size,
        }
    }

    fn read_manifest(&self, name: &str) -> Option<String> {
        read_text(&self.root.join(name), self.max_file_size)
    }

    pub fn analyze(&self) -> DependencyMap {
        let mut found = DependencyMap::new();

        if let Some(language) = self.main_language.as_deref() {
            for rule in rules_for(language) {
                let Some(content) = self.read_manifest(rule.manifest) else {
                    continue;
                };
                for technology in match_rule(rule, &content) {
                    found
                        .entry(rule.category.to_string())
                        .or_default()
                        .insert(technology.to_string());
                }
            }
        }

        if let Some(content) = self.read_manifest("package.json") {
            let declared =
                declared_packages(ManifestFormat::PackageJson, &content).unwrap_or_default();
            for js in JS_TECH_DETECTION {
                if js.packages.iter().any(|p| declared.contains(*p)) {
                    found
                        .entry(js.kind.to_string())
                        .or_default()
                        .insert(js.name.to_string());
                }
            }
        }

        debug!(categories = found.len(), "Dependency extraction finished");
        found
    }
}

/// Technologies one rule reports for a manifest's content.
pub fn match_rule(rule: &DependencyRule, content: &str) -> Vec<&'static str> {
    match rule.matcher {
        DependencyMatcher::Text { needle, .. } => {
            if content.to_lowercase().contains(&needle.to_lowercase()) {
                rule.text_label().into_iter().collect()
            } else {
                Vec::new()
            }
        }
        DependencyMatcher::Keys { format, packages } => {
            let declared = declared_packages(format, content).unwrap_or_default();
            packages
                .iter()
                .filter(|(pkg, _)| declared.contains(*pkg))
                .map(|(_, tech)| *tech)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rule_is_case_insensitive() {
        let rule = rules_for("Python")
            .iter()
            .find(|r| r.text_label() == Some("Django"))
            .unwrap();
        assert_eq!(match_rule(rule, "Django==4.2\n"), vec!["Django"]);
        assert!(match_rule(rule, "flask\n").is_empty());
    }
}
