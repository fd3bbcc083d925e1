// Pattern registry
// Static tables mapping languages and frameworks to file signatures,
// content substrings and regexes. Built once, never mutated.

use serde::Serialize;
use std::fmt;

/// Config files and the technologies their contents reveal.
pub mod configs;

/// Manifest rules for the dependency extractor.
pub mod dependencies;

/// Endpoint, AJAX and ignore-path regexes.
pub mod endpoints;

/// Extension tables for language classification.
pub mod languages;

/// Per-language technology catalogs and per-technology detector specs.
pub mod technologies;

/// Fixed technology taxonomy of the stack report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    Backend,
    Frontend,
    Database,
    BuildTools,
    Testing,
    Devops,
}

impl TechCategory {
    pub const ALL: [TechCategory; 6] = [
        TechCategory::Backend,
        TechCategory::Frontend,
        TechCategory::Database,
        TechCategory::BuildTools,
        TechCategory::Testing,
        TechCategory::Devops,
    ];

    /// Parses catalog keys (`frameworks`, `test_frameworks`, ...) and
    /// dependency categories (`backend`, `testing`, ...).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "backend" | "frameworks" | "framework" => Some(TechCategory::Backend),
            "frontend" => Some(TechCategory::Frontend),
            "database" | "databases" => Some(TechCategory::Database),
            "build_tools" | "build" => Some(TechCategory::BuildTools),
            "testing" | "test_frameworks" | "tests" => Some(TechCategory::Testing),
            "devops" => Some(TechCategory::Devops),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TechCategory::Backend => "backend",
            TechCategory::Frontend => "frontend",
            TechCategory::Database => "database",
            TechCategory::BuildTools => "build_tools",
            TechCategory::Testing => "testing",
            TechCategory::Devops => "devops",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            TechCategory::Backend => "Backend",
            TechCategory::Frontend => "Frontend",
            TechCategory::Database => "Database",
            TechCategory::BuildTools => "Build tools",
            TechCategory::Testing => "Testing",
            TechCategory::Devops => "DevOps",
        }
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of filesystem entry an existence check expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// Structured manifest formats understood by the key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `composer.json`: keys of `require`.
    Composer,
    /// `package.json`: keys of `dependencies` and `devDependencies`.
    PackageJson,
    /// `pom.xml`: `artifactId` and `groupId:artifactId` of each dependency.
    Maven,
}

/// One registry entry describing how to check the tree for a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSpec {
    /// A path glob (relative to the root, `**` allowed) that must exist as
    /// the given kind of entry.
    FileExistence { kind: EntryKind, path: &'static str },
    /// A file glob whose content must contain `needle` (case-sensitive).
    ContentSubstring {
        path: &'static str,
        needle: &'static str,
    },
    /// A manifest at the root that must declare `key` as a requirement.
    StructuredKey {
        manifest: &'static str,
        format: ManifestFormat,
        key: &'static str,
    },
    /// A case-insensitive regex searched line by line in source files.
    SourceRegex { pattern: &'static str },
}

impl PatternSpec {
    pub const fn file(path: &'static str) -> Self {
        PatternSpec::FileExistence {
            kind: EntryKind::File,
            path,
        }
    }

    pub const fn dir(path: &'static str) -> Self {
        PatternSpec::FileExistence {
            kind: EntryKind::Dir,
            path,
        }
    }

    pub const fn content(path: &'static str, needle: &'static str) -> Self {
        PatternSpec::ContentSubstring { path, needle }
    }

    pub const fn code(pattern: &'static str) -> Self {
        PatternSpec::SourceRegex { pattern }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in TechCategory::ALL {
            assert_eq!(TechCategory::from_label(category.as_str()), Some(category));
        }
        assert_eq!(TechCategory::from_label("frameworks"), Some(TechCategory::Backend));
        assert_eq!(TechCategory::from_label("test_frameworks"), Some(TechCategory::Testing));
        assert_eq!(TechCategory::from_label("databases"), Some(TechCategory::Database));
        assert_eq!(TechCategory::from_label("observability"), None);
    }
}
