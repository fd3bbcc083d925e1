use super::{DetectionResult, Detector, Match};
use crate::error::DetectError;
use crate::patterns::endpoints::{is_ignored_path, AJAX_PATTERNS, ENDPOINT_PATTERNS};
use crate::patterns::languages::endpoint_language;
use crate::utils::{dotted_extension, read_text, relative_path, walk_tree, LineIndex};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Method reported when a pattern cannot tell the HTTP verb.
pub const ANY_METHOD: &str = "ALL";

/// A server-side route declaration.
///
/// Field order is significant: the derived ordering sorts by file, then line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EndpointRecord {
    pub file: String,
    pub line: usize,
    pub framework: String,
    pub method: String,
    pub route: String,
}

/// A client-side HTTP call site.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AjaxRecord {
    pub file: String,
    pub line: usize,
    pub url: String,
}

/// Applies the endpoint patterns of `language` and every AJAX pattern to one
/// file's text. `file` is the path recorded in each record.
///
/// Matches without a route (or URL) capture are dropped. Results are in
/// match order and may contain duplicates.
pub fn extract_from_source(
    file: &str,
    language: &str,
    text: &str,
) -> (Vec<EndpointRecord>, Vec<AjaxRecord>) {
    let index = LineIndex::new(text);
    let mut endpoints = Vec::new();
    let mut ajax = Vec::new();

    if let Some(patterns) = ENDPOINT_PATTERNS.get(language) {
        for pattern in patterns {
            for caps in pattern.regex.captures_iter(text) {
                let Some(route) = caps.name("route") else {
                    continue;
                };
                let method = caps
                    .name("method")
                    .map(|m| m.as_str().to_uppercase())
                    .unwrap_or_else(|| ANY_METHOD.to_string());
                let start = caps.get(0).map_or(route.start(), |m| m.start());
                endpoints.push(EndpointRecord {
                    file: file.to_string(),
                    line: index.line_of(start),
                    framework: pattern.framework.to_string(),
                    method,
                    route: route.as_str().to_string(),
                });
            }
        }
    }

    for pattern in AJAX_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let Some(url) = caps.name("url").filter(|m| !m.as_str().is_empty()) else {
                debug!(style = pattern.style, file, "Call site without a URL skipped");
                continue;
            };
            let start = caps.get(0).map_or(url.start(), |m| m.start());
            ajax.push(AjaxRecord {
                file: file.to_string(),
                line: index.line_of(start),
                url: url.as_str().to_string(),
            });
        }
    }

    (endpoints, ajax)
}

/// Deduplicated, `(file, line)`-ordered output of an endpoint scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointScan {
    pub endpoints: Vec<EndpointRecord>,
    pub ajax: Vec<AjaxRecord>,
}

/// Walks the whole tree for route declarations and client call sites.
///
/// A file is scanned when its path passes the ignore patterns and its
/// extension maps to a language that is both active in the project and
/// registered with endpoint patterns.
pub struct EndpointDetector {
    root: PathBuf,
    active_languages: HashSet<String>,
    max_file_size: u64,
    found: bool,
}

impl EndpointDetector {
    pub fn new<I, S>(root: &Path, active_languages: I, max_file_size: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.to_path_buf(),
            active_languages: active_languages.into_iter().map(Into::into).collect(),
            max_file_size,
            found: false,
        }
    }

    fn candidates(&self) -> Vec<(PathBuf, String, &'static str)> {
        walk_tree(&self.root)
            .into_iter()
            .filter_map(|path| {
                let rel = relative_path(&self.root, &path);
                if is_ignored_path(&rel) {
                    return None;
                }
                let language = endpoint_language(&dotted_extension(&path)?)?;
                if !self.active_languages.contains(language)
                    || !ENDPOINT_PATTERNS.contains_key(language)
                {
                    return None;
                }
                Some((path, rel, language))
            })
            .collect()
    }

    /// Runs the scan and returns the sorted, deduplicated records.
    pub fn scan(&mut self) -> EndpointScan {
        let candidates = self.candidates();
        debug!(files = candidates.len(), "Scanning files for endpoints");

        // Each file is read and matched independently
        let per_file: Vec<(Vec<EndpointRecord>, Vec<AjaxRecord>)> = candidates
            .par_iter()
            .filter_map(|(path, rel, language)| {
                let text = read_text(path, self.max_file_size)?;
                Some(extract_from_source(rel, language, &text))
            })
            .collect();

        // Sets drop duplicates and order records by file, then line
        let mut endpoints = BTreeSet::new();
        let mut ajax = BTreeSet::new();
        for (e, a) in per_file {
            endpoints.extend(e);
            ajax.extend(a);
        }

        let scan = EndpointScan {
            endpoints: endpoints.into_iter().collect(),
            ajax: ajax.into_iter().collect(),
        };
        self.found = !scan.endpoints.is_empty() || !scan.ajax.is_empty();
        scan
    }
}

impl Detector for EndpointDetector {
    fn detect(&mut self) -> Result<DetectionResult, DetectError> {
        let scan = self.scan();
        let endpoints = scan.endpoints.into_iter().map(|e| {
            Match::new(e.file)
                .with_line(e.line)
                .with_payload(format!("{} {}", e.method, e.route))
        });
        let ajax = scan
            .ajax
            .into_iter()
            .map(|a| Match::new(a.file).with_line(a.line).with_payload(a.url));
        Ok(DetectionResult::new(endpoints.chain(ajax).collect()))
    }

    fn confidence(&self) -> f64 {
        if self.found {
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
    fn test_express_route_with_method() {
        let (endpoints, ajax) =
            extract_from_source("routes.js", "JavaScript", "\n\nrouter.post(\"/login\", handler)\n");
        assert_eq!(
            endpoints,
            vec![EndpointRecord {
                file: "routes.js".into(),
                line: 3,
                framework: "Express".into(),
                method: "POST".into(),
                route: "/login".into(),
            }]
        );
        assert!(ajax.is_empty());
    }

    #[test]
    fn test_pattern_without_method_reports_all() {
        let (endpoints, _) =
            extract_from_source("Api.java", "Java", "@RequestMapping(\"/api\")\nclass Api {}");
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].method, ANY_METHOD);
        assert_eq!(endpoints[0].route, "/api");
    }

    #[test]
    fn test_bare_xhr_constructor_is_skipped() {
        let text = "var xhr = new XMLHttpRequest();\nxhr.open('GET', '/api/items');\n";
        let (_, ajax) = extract_from_source("client.js", "JavaScript", text);
        assert_eq!(ajax.len(), 1);
        assert_eq!(ajax[0].url, "/api/items");
        assert_eq!(ajax[0].line, 2);
    }

    #[test]
    fn test_unregistered_language_yields_no_endpoints() {
        let (endpoints, _) = extract_from_source("main.swift", "Swift", "app.get(\"/x\")");
        assert!(endpoints.is_empty());
    }
}
