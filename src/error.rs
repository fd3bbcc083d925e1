use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a scan before it starts.
///
/// Everything else (unreadable files, malformed manifests, broken detectors)
/// is recovered locally and never reaches the caller.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The project root does not exist.
    #[error("project path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The project root exists but is not a directory.
    #[error("project path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Failure of a single detector invocation.
///
/// Callers catch these per detector and treat them as "no match".
#[derive(Debug, Error)]
pub enum DetectError {
    /// A registry regex failed to compile.
    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A path pattern is not a valid glob.
    #[error("invalid glob `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Invalid configuration overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Unknown log level name.
    #[error("invalid log level '{0}'. Valid levels: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}
