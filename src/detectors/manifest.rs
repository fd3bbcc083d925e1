use super::{DetectionResult, Detector, Match};
use crate::error::DetectError;
use crate::patterns::ManifestFormat;
use crate::utils::read_text;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Packages a manifest declares as requirements.
///
/// Returns `None` when `text` is not valid for `format`; callers treat that
/// as a manifest with no dependencies.
pub fn declared_packages(format: ManifestFormat, text: &str) -> Option<BTreeSet<String>> {
    match format {
        ManifestFormat::Composer => json_keys(text, &["require"]),
        ManifestFormat::PackageJson => json_keys(text, &["dependencies", "devDependencies"]),
        ManifestFormat::Maven => maven_artifacts(text),
    }
}

fn json_keys(text: &str, sections: &[&str]) -> Option<BTreeSet<String>> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "Malformed JSON manifest");
            return None;
        }
    };

    let mut keys = BTreeSet::new();
    for section in sections {
        if let Some(map) = value.get(*section).and_then(Value::as_object) {
            keys.extend(map.keys().cloned());
        }
    }
    Some(keys)
}

/// `artifactId` and `groupId:artifactId` of every `<dependency>` element.
fn maven_artifacts(text: &str) -> Option<BTreeSet<String>> {
    let doc = match roxmltree::Document::parse(text) {
        Ok(doc) => doc,
        Err(err) => {
            debug!(error = %err, "Malformed Maven manifest");
            return None;
        }
    };

    let child_text = |node: roxmltree::Node, name: &str| {
        node.children()
            .find(|c| c.is_element() && c.tag_name().name() == name)
            .and_then(|c| c.text())
            .map(|t| t.trim().to_string())
    };

    let mut artifacts = BTreeSet::new();
    for dep in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "dependency")
    {
        let Some(artifact) = child_text(dep, "artifactId") else {
            continue;
        };
        if let Some(group) = child_text(dep, "groupId") {
            artifacts.insert(format!("{}:{}", group, artifact));
        }
        artifacts.insert(artifact);
    }
    Some(artifacts)
}

/// Looks up one package key in a root-level structured manifest.
///
/// A missing, unreadable or malformed manifest is no match. Confidence is
/// binary: `1.0` after a hit, `0.0` otherwise.
pub struct ManifestDetector {
    root: PathBuf,
    manifest: String,
    format: ManifestFormat,
    key: String,
    max_file_size: u64,
    hit: bool,
}

impl ManifestDetector {
    pub fn new(
        root: &Path,
        manifest: impl Into<String>,
        format: ManifestFormat,
        key: impl Into<String>,
        max_file_size: u64,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest: manifest.into(),
            format,
            key: key.into(),
            max_file_size,
            hit: false,
        }
    }
}

impl Detector for ManifestDetector {
    fn detect(&mut self) -> Result<DetectionResult, DetectError> {
        self.hit = false;
        let path = self.root.join(&self.manifest);
        let declared = read_text(&path, self.max_file_size)
            .and_then(|text| declared_packages(self.format, &text))
            .unwrap_or_default();

        if !declared.contains(&self.key) {
            return Ok(DetectionResult::default());
        }
        self.hit = true;
        Ok(DetectionResult::new(vec![
            Match::new(self.manifest.clone()).with_payload(self.key.clone())
        ]))
    }

    fn confidence(&self) -> f64 {
        if self.hit {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_json_unions_dev_dependencies() {
        let text = r#"{"dependencies": {"express": "^4.0.0"}, "devDependencies": {"jest": "29"}}"#;
        let keys = declared_packages(ManifestFormat::PackageJson, text).unwrap();
        assert!(keys.contains("express"));
        assert!(keys.contains("jest"));
    }

    #[test]
    fn test_composer_reads_require_only() {
        let text = r#"{"require": {"laravel/framework": "^10"}, "require-dev": {"phpunit/phpunit": "10"}}"#;
        let keys = declared_packages(ManifestFormat::Composer, text).unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("laravel/framework"));
    }

    #[test]
    fn test_maven_dependencies() {
        let pom = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
  <dependencies>
    <dependency>
      <groupId>org.hibernate</groupId>
      <artifactId>hibernate-core</artifactId>
    </dependency>
  </dependencies>
</project>"#;
        let keys = declared_packages(ManifestFormat::Maven, pom).unwrap();
        assert!(keys.contains("hibernate-core"));
        assert!(keys.contains("org.hibernate:hibernate-core"));
    }

    #[test]
    fn test_malformed_manifest_is_none() {
        assert!(declared_packages(ManifestFormat::PackageJson, "{not json").is_none());
        assert!(declared_packages(ManifestFormat::Maven, "<project>").is_none());
    }
}
