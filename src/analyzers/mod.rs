// Analyzers
// Tree-wide passes that compose detectors and pattern tables into report
// sections.

/// Language distribution and line counts.
pub mod language;

/// Technology stack classification.
pub mod stack;

/// Manifest dependency extraction.
pub mod dependency;
