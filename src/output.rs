//! # Output Module
//!
//! This module centralizes all user-facing output for the edheader tool.
//!
//! Per-file warnings and lint failures go to stderr, in the order the files
//! were processed. Lists of changed files and the summary go to stdout and
//! are silenced by `-q`.

use owo_colors::{OwoColorize, Stream};

use crate::report::{FileAction, FileReport, RunReport};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in a list before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Output settings chosen on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
  pub quiet: bool,
  pub verbose: bool,
}

impl Output {
  pub const fn new(quiet: bool, verbose: bool) -> Self {
    Self { quiet, verbose }
  }

  /// Prints everything a finished run has to say.
  pub fn print_report(&self, report: &RunReport) {
    self.print_file_events(report);

    if report.is_lint() {
      if report.is_success() {
        print_lint_ok();
      }
      return;
    }

    let inserted: Vec<_> = report
      .written()
      .filter(|f| f.action == FileAction::Inserted)
      .collect();
    let replaced: Vec<_> = report
      .written()
      .filter(|f| f.action == FileAction::Replaced)
      .collect();

    self.print_file_list(symbols::SUCCESS, "Added header to", &inserted);
    self.print_file_list(symbols::UPDATED, "Updated header in", &replaced);
    self.print_summary(report);
  }

  /// Prints the `WARN:` and `LINT:` lines of a run, in processing order.
  pub fn print_file_events(&self, report: &RunReport) {
    for file in report.files() {
      if file.action == FileAction::Skipped {
        if !self.quiet {
          eprintln!(
            "{} Cannot find spec for file '{}'",
            "WARN:".if_supports_color(Stream::Stderr, |s| s.yellow()),
            file.path
          );
        }
      } else if report.is_lint() && file.needs_change() {
        eprintln!(
          "{} {} has not had file headers applied",
          "LINT:".if_supports_color(Stream::Stderr, |s| s.red()),
          file.path
        );
      }
    }
  }

  fn print_file_list(&self, symbol: &str, verb: &str, files: &[&FileReport]) {
    if self.quiet || files.is_empty() {
      return;
    }

    let count = files.len();
    println!(
      "{} {} {} {}:",
      symbol.if_supports_color(Stream::Stdout, |s| s.green()),
      verb,
      count,
      plural(count)
    );

    let limit = if self.verbose { count } else { DEFAULT_FILE_LIST_LIMIT };
    for file in files.iter().take(limit) {
      println!("  {}", file.path);
    }

    if count > limit {
      println!(
        "  {} (use -v to see all)",
        format!("... and {} more", count - limit).if_supports_color(Stream::Stdout, |s| s.dimmed())
      );
    }
  }

  /// Prints the processing summary.
  pub fn print_summary(&self, report: &RunReport) {
    if self.quiet {
      return;
    }
    println!("{}", summary_line(report));
  }

  /// Print a hint for the user about what to do next.
  pub fn print_hint(&self, message: &str) {
    if self.quiet {
      return;
    }
    println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
  }
}

/// Printed when a lint run finds nothing to change.
pub fn print_lint_ok() {
  eprintln!("{} ok", "LINT:".if_supports_color(Stream::Stderr, |s| s.green()));
}

/// Format: "Summary: X inserted, Y replaced, Z unchanged, W skipped"
pub fn summary_line(report: &RunReport) -> String {
  format!(
    "Summary: {} inserted, {} replaced, {} unchanged, {} skipped",
    report.count(FileAction::Inserted).if_supports_color(Stream::Stdout, |s| s.cyan()),
    report.count(FileAction::Replaced).if_supports_color(Stream::Stdout, |s| s.cyan()),
    report.count(FileAction::Unchanged).if_supports_color(Stream::Stdout, |s| s.cyan()),
    report.count(FileAction::Skipped).if_supports_color(Stream::Stdout, |s| s.dimmed()),
  )
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_summary_line_counts_actions() {
    owo_colors::set_override(false);

    let mut report = RunReport::new(false);
    for (path, action) in [
      ("a.py", FileAction::Inserted),
      ("b.py", FileAction::Inserted),
      ("c.py", FileAction::Unchanged),
      ("d.txt", FileAction::Skipped),
    ] {
      report.push(FileReport {
        path: path.to_string(),
        action,
        written: action == FileAction::Inserted,
      });
    }

    assert_eq!(
      summary_line(&report),
      "Summary: 2 inserted, 0 replaced, 1 unchanged, 1 skipped"
    );
  }

  #[test]
  fn test_plural() {
    assert_eq!(plural(1), "file");
    assert_eq!(plural(0), "files");
    assert_eq!(plural(3), "files");
  }
}
