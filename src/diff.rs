//! # Diff Module
//!
//! Renders the change a lint run would make to a file, so `--show-diff`
//! can explain a failing check. Content is shown lossily as UTF-8.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for pending header changes.
///
/// This struct handles:
/// - Generating line diffs between current and planned content
/// - Displaying diffs to stderr with colorization
/// - Appending diffs to a file
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that collects every diff of the run
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager.
  ///
  /// # Parameters
  ///
  /// * `show_diff` - Whether to print diffs to stderr
  /// * `save_diff_path` - Path to append diffs to
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output is requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Renders the unified-style line diff between `original` and `new`.
  pub fn render(path: &str, original: &[u8], new: &[u8]) -> String {
    let original = String::from_utf8_lossy(original);
    let new = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(original.as_ref(), new.as_ref());

    let mut rendered = format!("Diff for {path}:\n");
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      rendered.push_str(sign);
      rendered.push_str(change.value());
      if change.missing_newline() {
        rendered.push('\n');
      }
    }
    rendered
  }

  /// Shows and/or saves the diff for one file.
  ///
  /// # Parameters
  ///
  /// * `path` - Path of the file, as reported
  /// * `original` - Current file content
  /// * `new` - Planned file content
  pub fn display_diff(&self, path: &str, original: &[u8], new: &[u8]) -> std::io::Result<()> {
    let rendered = Self::render(path, original, new);

    if self.show_diff {
      for line in rendered.lines() {
        if line.starts_with('+') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |t| t.green()));
        } else if line.starts_with('-') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |t| t.red()));
        } else {
          eprintln!("{line}");
        }
      }
      eprintln!();
    }

    if let Some(diff_path) = &self.save_diff_path {
      let mut file = OpenOptions::new().create(true).append(true).open(diff_path)?;
      file.write_all(rendered.as_bytes())?;
      file.write_all(b"\n")?;
    }

    Ok(())
  }
}
