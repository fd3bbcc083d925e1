use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directory names that never hold first-party code or configuration.
const VENDOR_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "vendor",
    ".venv",
    "venv",
    "__pycache__",
    "target",
];

/// A utility struct to convert byte offsets to line numbers.
///
/// Regex matches report byte offsets; findings are reported with 1-based
/// line numbers.
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source for newlines.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    ///
    /// Equal to the number of newlines before `offset` plus one.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }
}

/// Returns true for directories pruned from config, secret and source walks.
pub fn is_vendor_dir(name: &str) -> bool {
    VENDOR_DIRS.contains(&name)
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().map_or(false, is_vendor_dir)
}

/// Recursively lists regular files under `root`, skipping vendor and VCS
/// directories. Entries that cannot be read are dropped.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

/// Recursively lists every regular file under `root` without pruning.
pub fn walk_tree(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

/// Reads a file as UTF-8 text.
///
/// Returns `None` when the file is larger than `max_size`, cannot be read, or
/// is not valid UTF-8.
pub fn read_text(path: &Path, max_size: u64) -> Option<String> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > max_size => {
            debug!(path = %path.display(), size = meta.len(), "Skipping oversized file");
            return None;
        }
        Ok(_) => {}
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Skipping unreadable file");
            return None;
        }
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Skipping unreadable file");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(_) => {
            debug!(path = %path.display(), "Skipping non-UTF-8 file");
            None
        }
    }
}

/// Formats `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are returned as-is.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lower-cased extension of `path` including the leading dot, e.g. `".ts"`.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}
