//! # File Collector Module
//!
//! Collects the files a run operates on: either every eligible file under the
//! root, or the eligible subset of an explicit list. Paths are relative to
//! the root, use `/` as separator and have no leading `./`, which is the form
//! spec patterns are written against.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::HeaderError;
use crate::matcher::FileMatcher;

/// File collector for directory traversal and explicit-list filtering.
pub struct FileCollector {
  root: PathBuf,
}

impl FileCollector {
  /// Creates a new FileCollector rooted at `root`.
  pub const fn new(root: PathBuf) -> Self {
    Self { root }
  }

  /// Collects the files to process.
  ///
  /// # Parameters
  ///
  /// * `explicit` - Paths given on the command line; empty means discover
  /// * `matcher` - Eligibility rules from the config
  ///
  /// # Returns
  ///
  /// Eligible paths, in input order for an explicit list and in sorted walk
  /// order otherwise.
  pub fn collect(&self, explicit: &[String], matcher: &FileMatcher) -> Result<Vec<String>, HeaderError> {
    if explicit.is_empty() {
      return self.discover(matcher);
    }

    let normalized: Vec<String> = explicit.iter().map(|p| normalize_relative_path(p)).collect();
    let files = matcher.filter(&normalized);
    debug!("{} of {} given files are eligible", files.len(), explicit.len());
    Ok(files)
  }

  /// Walks the root recursively and returns every eligible regular file.
  ///
  /// Symlinks are not followed. Every directory is entered; only the
  /// configured exclude pattern keeps files out.
  pub fn discover(&self, matcher: &FileMatcher) -> Result<Vec<String>, HeaderError> {
    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    for entry in WalkDir::new(&self.root)
      .follow_links(false)
      .sort_by_file_name()
      .min_depth(1)
    {
      let entry = entry.map_err(|e| {
        let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
        HeaderError::io("Failed to walk directory", path, e.into())
      })?;

      if !entry.file_type().is_file() {
        continue;
      }

      let Some(relative) = relative_path(&self.root, entry.path()) else {
        continue;
      };

      if matcher.is_match(&relative) {
        trace!("Collected {}", relative);
        files.push(relative);
      }
    }

    debug!(
      "Found {} eligible files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }
}

/// Path of `path` relative to `root`, `/`-separated.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
  let relative = path.strip_prefix(root).ok()?;
  let parts: Vec<_> = relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect();
  Some(parts.join("/"))
}

/// Strips leading `./` so user-supplied paths compare like discovered ones.
/// `\` is a separator only on Windows; elsewhere it is part of the name.
pub fn normalize_relative_path(path: &str) -> String {
  #[cfg(windows)]
  let path = path.replace('\\', "/");

  let mut path: &str = &path;
  while let Some(stripped) = path.strip_prefix("./") {
    path = stripped;
  }
  path.to_string()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use regex::Regex;
  use tempfile::TempDir;

  use super::*;

  fn rust_matcher(exclude: Option<&str>) -> FileMatcher {
    FileMatcher::new([r"\.rs$"], None, exclude.map(|p| Regex::new(p).unwrap())).unwrap()
  }

  fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "fn main() {}\n").unwrap();
  }

  #[test]
  fn test_discover_sorted_relative_paths() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/b.rs");
    touch(temp_dir.path(), "src/a.rs");
    touch(temp_dir.path(), "README.md");
    touch(temp_dir.path(), "build.rs");

    let collector = FileCollector::new(temp_dir.path().to_path_buf());
    let files = collector.discover(&rust_matcher(None)).unwrap();

    assert_eq!(files, vec!["build.rs", "src/a.rs", "src/b.rs"]);
  }

  #[test]
  fn test_discover_honors_exclude() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "vendor/dep/lib.rs");
    touch(temp_dir.path(), "main.rs");

    let collector = FileCollector::new(temp_dir.path().to_path_buf());
    let files = collector.discover(&rust_matcher(Some("^vendor/"))).unwrap();

    assert_eq!(files, vec!["main.rs"]);
  }

  #[test]
  fn test_explicit_list_is_filtered_not_rediscovered() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a.rs");
    touch(temp_dir.path(), "b.rs");

    let collector = FileCollector::new(temp_dir.path().to_path_buf());
    let explicit = vec!["./b.rs".to_string(), "notes.txt".to_string()];
    let files = collector.collect(&explicit, &rust_matcher(None)).unwrap();

    assert_eq!(files, vec!["b.rs"]);
  }

  #[test]
  fn test_normalize_relative_path() {
    assert_eq!(normalize_relative_path("./src/lib.rs"), "src/lib.rs");
    assert_eq!(normalize_relative_path("././lib.rs"), "lib.rs");
    assert_eq!(normalize_relative_path("lib.rs"), "lib.rs");
  }

  #[cfg(windows)]
  #[test]
  fn test_normalize_windows_separators() {
    assert_eq!(normalize_relative_path("src\\lib.rs"), "src/lib.rs");
  }

  #[cfg(unix)]
  #[test]
  fn test_backslash_is_part_of_unix_file_name() {
    assert_eq!(normalize_relative_path("a\\b.rs"), "a\\b.rs");

    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "a\\b.rs");

    let collector = FileCollector::new(temp_dir.path().to_path_buf());
    let files = collector.collect(&["a\\b.rs".to_string()], &rust_matcher(None)).unwrap();

    assert_eq!(files, vec!["a\\b.rs"]);
  }
}
