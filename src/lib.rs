// Lib file to expose modules for testing and external usage.
// This file serves as the root for the library crate.

/// Module containing the orchestrator.
/// This includes the `Codescope` struct and the report it assembles.
pub mod analyzer;

/// Language, stack and dependency analyzers.
pub mod analyzers;

/// Scan configuration loaded from the environment.
pub mod config;

/// Detector trait and its file, code, manifest, config and endpoint variants.
pub mod detectors;

/// Error types.
pub mod error;

/// Static pattern registries.
pub mod patterns;

/// Console, JSON and HTML rendering.
pub mod report;

/// Module containing the implementation of content rules.
pub mod rules;

/// Module containing utility functions.
/// Tree walking, bounded file reads and line lookup.
pub mod utils;
