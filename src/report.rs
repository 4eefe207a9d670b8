//! # Report Module
//!
//! The record of a run. Every file handed to the executor gets one
//! [`FileReport`], kept in processing order, so warnings and lint failures
//! can be printed in the same order the files were considered.

/// What happened (or, in lint mode, would happen) to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
  /// No spec matches the path.
  Skipped,
  /// The file already had the expected header.
  Unchanged,
  /// A header was prepended.
  Inserted,
  /// An existing header was rewritten or duplicates were removed.
  Replaced,
}

/// Result for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  /// Path relative to the run root.
  pub path: String,
  pub action: FileAction,
  /// Whether the new content was written to disk. Always false in lint mode.
  pub written: bool,
}

impl FileReport {
  /// Whether the file's content differs from what the run wants.
  pub const fn needs_change(&self) -> bool {
    matches!(self.action, FileAction::Inserted | FileAction::Replaced)
  }
}

/// Overall result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Success,
  /// Lint mode found at least one file that needs a change.
  LintFailed,
}

impl Outcome {
  pub const fn is_success(self) -> bool {
    matches!(self, Self::Success)
  }
}

/// All file reports of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
  lint: bool,
  files: Vec<FileReport>,
}

impl RunReport {
  pub const fn new(lint: bool) -> Self {
    Self {
      lint,
      files: Vec::new(),
    }
  }

  pub fn push(&mut self, report: FileReport) {
    self.files.push(report);
  }

  /// Whether this was a lint run.
  pub const fn is_lint(&self) -> bool {
    self.lint
  }

  pub fn files(&self) -> &[FileReport] {
    &self.files
  }

  /// Files that matched no spec.
  pub fn skipped(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|f| f.action == FileAction::Skipped)
  }

  /// Files that would have been changed. Empty outside lint mode.
  pub fn lint_failures(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|f| self.lint && f.needs_change())
  }

  /// Files whose content was rewritten.
  pub fn written(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|f| f.written)
  }

  pub fn count(&self, action: FileAction) -> usize {
    self.files.iter().filter(|f| f.action == action).count()
  }

  pub fn outcome(&self) -> Outcome {
    if self.lint_failures().next().is_some() {
      Outcome::LintFailed
    } else {
      Outcome::Success
    }
  }

  pub fn is_success(&self) -> bool {
    self.outcome().is_success()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn file(path: &str, action: FileAction, written: bool) -> FileReport {
    FileReport {
      path: path.to_string(),
      action,
      written,
    }
  }

  #[test]
  fn test_lint_report_fails_on_pending_change() {
    let mut report = RunReport::new(true);
    report.push(file("a.py", FileAction::Unchanged, false));
    report.push(file("b.py", FileAction::Inserted, false));
    report.push(file("c.txt", FileAction::Skipped, false));

    assert_eq!(report.outcome(), Outcome::LintFailed);
    let failures: Vec<_> = report.lint_failures().map(|f| f.path.as_str()).collect();
    assert_eq!(failures, vec!["b.py"]);
    assert_eq!(report.skipped().count(), 1);
  }

  #[test]
  fn test_apply_report_succeeds_with_changes() {
    let mut report = RunReport::new(false);
    report.push(file("a.py", FileAction::Replaced, true));
    report.push(file("b.py", FileAction::Inserted, true));

    assert!(report.is_success());
    assert_eq!(report.lint_failures().count(), 0);
    assert_eq!(report.written().count(), 2);
    assert_eq!(report.count(FileAction::Inserted), 1);
  }

  #[test]
  fn test_empty_lint_report_is_success() {
    assert!(RunReport::new(true).is_success());
  }
}
