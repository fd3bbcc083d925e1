//! Detectors check the file tree for one signal each and report whether it
//! was found together with the evidence.
//!
//! Every detector is reusable: each `detect()` call starts from a clean
//! slate and returns a fresh [`DetectionResult`] owned by the caller.
//! `detect()` takes `&mut self`, so one instance can never be run from two
//! places at once.

use crate::error::DetectError;
use serde::Serialize;

/// Existence and content checks over path globs.
pub mod file;

/// Case-insensitive regex check over source files.
pub mod code;

/// Structured manifest key lookup.
pub mod manifest;

/// Config-file technology and secret detection.
pub mod config;

/// HTTP endpoint and AJAX call-site extraction.
pub mod endpoint;

/// One piece of evidence produced by a detector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Match {
    /// Path relative to the scanned root.
    pub location: String,
    /// 1-based line, when the evidence is line-addressable.
    pub line: Option<usize>,
    /// Matched text or required content, if any.
    pub payload: Option<String>,
}

impl Match {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            line: None,
            payload: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

/// Outcome of one `detect()` call.
///
/// `found()` is derived from `matches`, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionResult {
    pub matches: Vec<Match>,
}

impl DetectionResult {
    pub fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub fn found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// A check over the scanned tree.
pub trait Detector {
    /// Runs the check. Unreadable files are skipped, never reported as errors;
    /// an `Err` means the check itself is broken (bad regex, bad glob).
    fn detect(&mut self) -> Result<DetectionResult, DetectError>;

    /// Signal strength of the last `detect()` call in `[0.0, 1.0]`;
    /// `0.0` before the first call or when nothing was scanned.
    fn confidence(&self) -> f64;
}

/// `hits / total` clamped to `[0.0, 1.0]`, with an empty denominator
/// defined as `0.0`.
pub(crate) fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (hits as f64 / total as f64).clamp(0.0, 1.0)
    }
}
