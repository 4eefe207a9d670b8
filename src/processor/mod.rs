//! # Processor Module
//!
//! This module contains the header engine: it collects the files of a run,
//! plans a [`Transformation`] for each of them and then executes the plans.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Byte-level reads and permission-preserving writes
//! - [`file_collector`] - Directory traversal and explicit-list filtering
//! - [`planner`] - Insert/replace/no-op decisions for one file's content
//!
//! Planning happens for every file before anything is written, so a malformed
//! template fails the run before any file is modified. Execution is
//! sequential and stops at the first I/O error; files written before that
//! error stay written.

mod file_collector;
mod file_io;
pub mod planner;

use std::path::{Path, PathBuf};

pub use file_collector::{FileCollector, normalize_relative_path};
pub use file_io::{DEFAULT_FILE_MODE, FileIO};
pub use planner::{Change, Transformation, apply_header, replace_header};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::diff::DiffManager;
use crate::error::HeaderError;
use crate::locator::DetectionPattern;
use crate::matcher::select_spec_index;
use crate::report::{FileAction, FileReport, RunReport};
use crate::templates::{HeaderData, current_year, format_with_comment_style, render, tokenize};

/// Run options for a [`Processor`].
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
  /// Directory that relative paths are resolved against and that is walked
  /// when no explicit file list is given.
  pub root: PathBuf,

  /// Report pending changes instead of writing them.
  pub lint: bool,

  /// Year substituted for `{{ .Year }}`. Defaults to the current year.
  pub year: Option<i32>,

  /// Diff output for lint runs.
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig in apply mode.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     lint: true,
  ///     ..ProcessorConfig::new(root)
  /// }
  /// ```
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      lint: false,
      year: None,
      diff_manager: None,
    }
  }
}

/// Applies, checks and replaces file headers.
///
/// The `Processor` is responsible for:
/// - Collecting eligible files
/// - Picking the spec that governs each file
/// - Planning the new content of each file
/// - Writing the plans out, or reporting them in lint mode
pub struct Processor {
  config: Config,
  root: PathBuf,
  lint: bool,
  year: i32,
  diff_manager: Option<DiffManager>,

  /// Detection pattern per spec, in spec order.
  detection: Vec<DetectionPattern>,

  file_collector: FileCollector,
}

impl Processor {
  /// Creates a new processor.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::Template`] if the configured header cannot be
  /// turned into a detection pattern for some spec.
  pub fn new(config: Config, options: ProcessorConfig) -> Result<Self, HeaderError> {
    let detection = config
      .specs()
      .iter()
      .map(|spec| DetectionPattern::from_commented(spec.commented_header()))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      config,
      file_collector: FileCollector::new(options.root.clone()),
      root: options.root,
      lint: options.lint,
      year: options.year.unwrap_or_else(current_year),
      diff_manager: options.diff_manager.filter(DiffManager::is_enabled),
      detection,
    })
  }

  pub const fn config(&self) -> &Config {
    &self.config
  }

  pub const fn is_lint(&self) -> bool {
    self.lint
  }

  /// Ensures every eligible file carries the configured header.
  ///
  /// # Parameters
  ///
  /// * `files` - Explicit paths relative to the root; empty to discover
  pub fn run(&self, files: &[String]) -> Result<RunReport, HeaderError> {
    let files = self.collect_files(files)?;
    info!("Running against files: {:?}", files);

    let plans = files
      .iter()
      .map(|path| self.plan_update(path))
      .collect::<Result<Vec<_>, _>>()?;

    self.execute(&plans)
  }

  /// Swaps the configured header for `new_header` in every eligible file that
  /// carries the configured one.
  ///
  /// `new_header` is a raw template; it is commented per spec and rendered
  /// like the configured header.
  pub fn replace(&self, files: &[String], new_header: &str) -> Result<RunReport, HeaderError> {
    tokenize(new_header)?;

    let new_headers: Vec<String> = self
      .config
      .specs()
      .iter()
      .map(|spec| format_with_comment_style(new_header, spec.style()))
      .collect();

    let files = self.collect_files(files)?;
    info!("Replacing headers in files: {:?}", files);

    let plans = files
      .iter()
      .map(|path| self.plan_replace(path, &new_headers))
      .collect::<Result<Vec<_>, _>>()?;

    self.execute(&plans)
  }

  /// Eligible files for a run, relative to the root.
  pub fn collect_files(&self, files: &[String]) -> Result<Vec<String>, HeaderError> {
    self.file_collector.collect(files, self.config.file_matcher())
  }

  /// Plans the apply transformation for one file.
  pub fn plan_update(&self, path: &str) -> Result<Transformation, HeaderError> {
    let Some(index) = select_spec_index(path, self.config.specs()) else {
      return Ok(Transformation::new(path, Change::Skipped));
    };

    let spec = &self.config.specs()[index];
    let header = render(spec.commented_header(), &self.header_data(path))?;
    let content = FileIO::read(&self.resolve(path))?;

    let change = apply_header(&content, &header, &self.detection[index]);
    debug!("{}: planned {}", path, describe(&change));
    Ok(Transformation::new(path, change))
  }

  /// Plans the replace transformation for one file. `new_headers` holds the
  /// commented replacement per spec.
  pub fn plan_replace(&self, path: &str, new_headers: &[String]) -> Result<Transformation, HeaderError> {
    let Some(index) = select_spec_index(path, self.config.specs()) else {
      return Ok(Transformation::new(path, Change::Skipped));
    };

    let Some(new_header) = new_headers.get(index) else {
      return Ok(Transformation::new(path, Change::Skipped));
    };

    let header = render(new_header, &self.header_data(path))?;
    let content = FileIO::read(&self.resolve(path))?;

    let change = replace_header(&content, &header, &self.detection[index]);
    debug!("{}: planned {}", path, describe(&change));
    Ok(Transformation::new(path, change))
  }

  /// Writes (or, in lint mode, reports) planned transformations in order.
  ///
  /// Stops at the first write error.
  pub fn execute(&self, plans: &[Transformation]) -> Result<RunReport, HeaderError> {
    let mut report = RunReport::new(self.lint);

    for plan in plans {
      let action = match &plan.change {
        Change::Skipped => FileAction::Skipped,
        Change::NoChange => FileAction::Unchanged,
        Change::Insert(_) => FileAction::Inserted,
        Change::Replace(_) => FileAction::Replaced,
      };

      let mut written = false;
      match plan.new_content() {
        None if action == FileAction::Skipped => debug!("{}: no spec matches, skipping", plan.path),
        None => debug!("{}: header up to date", plan.path),
        Some(content) if self.lint => {
          debug!("{}: header missing or outdated", plan.path);
          self.show_diff(&plan.path, content);
        }
        Some(content) => {
          info!("{}: updating file content", plan.path);
          FileIO::write_preserving_permissions(&self.resolve(&plan.path), content)?;
          written = true;
        }
      }

      report.push(FileReport {
        path: plan.path.clone(),
        action,
        written,
      });
    }

    Ok(report)
  }

  fn show_diff(&self, path: &str, new_content: &[u8]) {
    let Some(diff_manager) = &self.diff_manager else {
      return;
    };

    let shown = FileIO::read(&self.resolve(path))
      .map_err(std::io::Error::other)
      .and_then(|original| diff_manager.display_diff(path, &original, new_content));
    if let Err(e) = shown {
      warn!("Could not show diff for {}: {}", path, e);
    }
  }

  fn header_data(&self, path: &str) -> HeaderData {
    let filename = if self.config.options().full_filepath {
      path
    } else {
      path.rsplit('/').next().unwrap_or(path)
    };
    HeaderData::new(filename, self.year)
  }

  fn resolve(&self, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path)
    }
  }
}

const fn describe(change: &Change) -> &'static str {
  match change {
    Change::Skipped => "skip",
    Change::NoChange => "no change",
    Change::Insert(_) => "insert",
    Change::Replace(_) => "replace",
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  const CONFIG: &str = r##"
headerText = "Copyright {{ .Year }} acme\nFile: {{ .Filename }}"
spec = [{ regex = '\.py$', comment = "#" }]
"##;

  fn processor(root: &Path, lint: bool) -> Processor {
    let config = Config::from_toml_str(CONFIG).unwrap();
    let options = ProcessorConfig {
      lint,
      year: Some(2025),
      ..ProcessorConfig::new(root)
    };
    Processor::new(config, options).unwrap()
  }

  #[test]
  fn test_plan_update_uses_base_name_by_default() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("pkg")).unwrap();
    fs::write(temp_dir.path().join("pkg/app.py"), "x = 1\n").unwrap();

    let plan = processor(temp_dir.path(), false).plan_update("pkg/app.py").unwrap();

    assert_eq!(
      plan.new_content(),
      Some(b"# Copyright 2025 acme\n# File: app.py\n\nx = 1\n".as_slice())
    );
  }

  #[test]
  fn test_plan_update_skips_unmatched_file_without_reading_it() {
    let temp_dir = TempDir::new().unwrap();
    let plan = processor(temp_dir.path(), false).plan_update("missing.txt").unwrap();
    assert_eq!(plan.change, Change::Skipped);
  }

  #[test]
  fn test_plan_update_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = processor(temp_dir.path(), false).plan_update("gone.py").unwrap_err();
    assert!(matches!(err, HeaderError::Io { .. }));
  }

  #[test]
  fn test_lint_execute_never_writes() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1\n").unwrap();
    let processor = processor(temp_dir.path(), true);

    let report = processor.run(&[]).unwrap();

    assert!(!report.is_success());
    assert_eq!(fs::read_to_string(temp_dir.path().join("a.py")).unwrap(), "x = 1\n");
  }

  #[test]
  fn test_replace_rejects_malformed_template() {
    let temp_dir = TempDir::new().unwrap();
    let err = processor(temp_dir.path(), false).replace(&[], "{{ }}").unwrap_err();
    assert!(matches!(err, HeaderError::Template(_)));
  }
}
