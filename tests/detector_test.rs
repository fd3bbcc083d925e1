// Tests for the detector variants
// Existence and content checks, manifest lookup, config scanning, confidence bounds

use codescope::detectors::code::CodeDetector;
use codescope::detectors::config::ConfigDetector;
use codescope::detectors::endpoint::EndpointDetector;
use codescope::detectors::file::{FileDetector, FileCheck};
use codescope::detectors::manifest::ManifestDetector;
use codescope::detectors::Detector;
use codescope::patterns::{EntryKind, ManifestFormat, PatternSpec};
use std::fs;
use tempfile::tempdir;

const MAX: u64 = 1 << 20;

fn file_check(spec: PatternSpec) -> FileCheck {
    FileCheck::from_spec(&spec).unwrap()
}

#[test]
fn test_file_and_dir_checks() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("k8s")).unwrap();
    fs::write(dir.path().join("Dockerfile"), "FROM alpine\n").unwrap();

    let mut detector = FileDetector::new(
        dir.path(),
        vec![
            file_check(PatternSpec::file("Dockerfile")),
            file_check(PatternSpec::dir("k8s")),
            file_check(PatternSpec::dir("Dockerfile")),
            file_check(PatternSpec::file("k8s")),
        ],
        MAX,
    );
    let result = detector.detect().unwrap();

    let locations: Vec<&str> = result.matches.iter().map(|m| m.location.as_str()).collect();
    assert_eq!(locations, vec!["Dockerfile", "k8s"]);
    assert_eq!(detector.confidence(), 0.5);
}

#[test]
fn test_content_check_is_case_sensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("requirements.txt"), "flask==3.0\n").unwrap();

    let mut upper = FileDetector::new(
        dir.path(),
        vec![file_check(PatternSpec::content("requirements.txt", "Flask"))],
        MAX,
    );
    assert!(!upper.detect().unwrap().found());
    assert_eq!(upper.confidence(), 0.0);

    let mut lower = FileDetector::new(
        dir.path(),
        vec![file_check(PatternSpec::content("requirements.txt", "flask"))],
        MAX,
    );
    let result = lower.detect().unwrap();
    assert!(result.found());
    assert_eq!(result.matches[0].payload.as_deref(), Some("flask"));
}

#[test]
fn test_recursive_glob_check() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("project/mysite")).unwrap();
    fs::write(dir.path().join("project/mysite/settings.py"), "DEBUG = True\n").unwrap();

    let mut detector = FileDetector::new(
        dir.path(),
        vec![file_check(PatternSpec::file("**/settings.py"))],
        MAX,
    );
    let result = detector.detect().unwrap();

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].location, "project/mysite/settings.py");
}

#[test]
fn test_structured_spec_has_no_file_check() {
    let spec = PatternSpec::StructuredKey {
        manifest: "package.json",
        format: ManifestFormat::PackageJson,
        key: "react",
    };
    assert!(FileCheck::from_spec(&spec).is_none());
    assert!(FileCheck::from_spec(&PatternSpec::code("x")).is_none());
    assert_eq!(
        FileCheck::from_spec(&PatternSpec::content("a", "b")).unwrap().kind,
        EntryKind::File
    );
}

#[test]
fn test_manifest_detector() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"devDependencies": {"jest": "29"}}"#,
    )
    .unwrap();

    let mut jest = ManifestDetector::new(
        dir.path(),
        "package.json",
        ManifestFormat::PackageJson,
        "jest",
        MAX,
    );
    assert!(jest.detect().unwrap().found());
    assert_eq!(jest.confidence(), 1.0);

    let mut mocha = ManifestDetector::new(
        dir.path(),
        "package.json",
        ManifestFormat::PackageJson,
        "mocha",
        MAX,
    );
    assert!(!mocha.detect().unwrap().found());
    assert_eq!(mocha.confidence(), 0.0);
}

#[test]
fn test_code_detector_confidence_counts_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "from flask import Flask\n").unwrap();
    fs::write(dir.path().join("b.py"), "print('hi')\n").unwrap();
    fs::write(dir.path().join("c.py"), [0xffu8, 0xfe]).unwrap();

    let mut detector = CodeDetector::new(dir.path(), r"from flask import", MAX);
    let result = detector.detect().unwrap();

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].location, "a.py");
    // c.py cannot be decoded and is left out of the denominator.
    assert_eq!(detector.confidence(), 0.5);
}

#[test]
fn test_config_detector_technologies_and_secrets() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/main/resources")).unwrap();
    fs::write(
        dir.path().join("src/main/resources/application.properties"),
        "spring.datasource.url=jdbc:mysql://db\nspring.datasource.password=s3cr3t\n",
    )
    .unwrap();
    fs::write(dir.path().join(".env"), "CACHE_DRIVER=redis\n").unwrap();

    let mut detector = ConfigDetector::new(dir.path(), MAX);
    let scan = detector.scan();

    assert_eq!(
        scan.technologies["Spring Boot"],
        vec!["src/main/resources/application.properties".to_string()]
    );
    assert_eq!(scan.technologies["Redis"], vec![".env".to_string()]);
    assert_eq!(scan.secrets.len(), 1);
    assert_eq!(scan.secrets[0].values, vec!["s3cr3t".to_string()]);

    let confidence = detector.confidence();
    assert!(confidence > 0.0 && confidence <= 1.0);
}

#[test]
fn test_confidence_bounds_on_empty_tree() {
    let dir = tempdir().unwrap();

    let mut detectors: Vec<Box<dyn Detector>> = vec![
        Box::new(FileDetector::new(dir.path(), vec![], MAX)),
        Box::new(FileDetector::new(
            dir.path(),
            vec![file_check(PatternSpec::file("pom.xml"))],
            MAX,
        )),
        Box::new(CodeDetector::new(dir.path(), r"import", MAX)),
        Box::new(ManifestDetector::new(
            dir.path(),
            "composer.json",
            ManifestFormat::Composer,
            "laravel/framework",
            MAX,
        )),
        Box::new(ConfigDetector::new(dir.path(), MAX)),
        Box::new(EndpointDetector::new(dir.path(), ["JavaScript"], MAX)),
    ];

    for detector in detectors.iter_mut() {
        assert_eq!(detector.confidence(), 0.0);
        let result = detector.detect().unwrap();
        assert!(!result.found());
        assert!(result.matches.is_empty());
        let confidence = detector.confidence();
        assert!((0.0..=1.0).contains(&confidence));
        assert_eq!(confidence, 0.0);
    }
}

#[test]
fn test_recursive_globs_skip_vendor_dirs() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("node_modules/some-pkg")).unwrap();
    fs::create_dir_all(dir.path().join("vendor/chart")).unwrap();
    fs::create_dir_all(dir.path().join(".venv/lib/site/mysite")).unwrap();
    fs::write(dir.path().join("node_modules/some-pkg/Dockerfile"), "FROM node\n").unwrap();
    fs::write(dir.path().join("vendor/chart/deploy.yaml"), "kind: Deployment\n").unwrap();
    fs::write(dir.path().join(".venv/lib/site/mysite/settings.py"), "DEBUG = True\n").unwrap();

    let mut detector = FileDetector::new(
        dir.path(),
        vec![
            file_check(PatternSpec::file("**/Dockerfile")),
            file_check(PatternSpec::content("**/*.yaml", "kind: Deployment")),
            file_check(PatternSpec::file("**/settings.py")),
        ],
        MAX,
    );
    let result = detector.detect().unwrap();

    assert!(!result.found(), "vendored files matched: {:?}", result.matches);
    assert_eq!(detector.confidence(), 0.0);

    // First-party files next to the vendor dirs still match.
    fs::create_dir_all(dir.path().join("deploy")).unwrap();
    fs::write(dir.path().join("deploy/Dockerfile"), "FROM alpine\n").unwrap();
    let result = detector.detect().unwrap();
    let locations: Vec<&str> = result.matches.iter().map(|m| m.location.as_str()).collect();
    assert_eq!(locations, vec!["deploy/Dockerfile"]);
}

#[test]
fn test_vendor_dir_itself_is_matchable() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("vendor")).unwrap();

    let mut detector = FileDetector::new(
        dir.path(),
        vec![file_check(PatternSpec::dir("vendor"))],
        MAX,
    );

    assert!(detector.detect().unwrap().found());
}
