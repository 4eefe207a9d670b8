//! # Planner Module
//!
//! Decides what should happen to one file's content without touching disk.
//!
//! - No copy of the header is found: the rendered header, a blank line and the
//!   original content.
//! - One or more copies are found: the first is replaced in place, later ones
//!   are removed. A removed copy that occupied whole lines also takes the
//!   line break(s) that followed it; an inline copy leaves the line intact.
//! - The outcome is byte-identical to the input: no change.

use std::ops::Range;

use crate::locator::DetectionPattern;

/// Separator between an inserted header and the original content.
pub const HEADER_SEPARATOR: &[u8] = b"\n\n";

/// Planned change for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
  /// No spec governs the file.
  Skipped,
  /// The file already carries the expected header.
  NoChange,
  /// The header is missing and will be prepended.
  Insert(Vec<u8>),
  /// An existing header will be rewritten.
  Replace(Vec<u8>),
}

/// A planned change bound to its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
  pub path: String,
  pub change: Change,
}

impl Transformation {
  pub fn new(path: impl Into<String>, change: Change) -> Self {
    Self {
      path: path.into(),
      change,
    }
  }

  /// The content to write, if the file needs writing.
  pub fn new_content(&self) -> Option<&[u8]> {
    match &self.change {
      Change::Insert(content) | Change::Replace(content) => Some(content),
      Change::Skipped | Change::NoChange => None,
    }
  }
}

/// Plans an apply run: insert the header when absent, otherwise refresh the
/// first copy and drop the rest.
pub fn apply_header(content: &[u8], header: &str, pattern: &DetectionPattern) -> Change {
  let matches = pattern.find_all(content);

  if matches.is_empty() {
    let mut updated = Vec::with_capacity(header.len() + HEADER_SEPARATOR.len() + content.len());
    updated.extend_from_slice(header.as_bytes());
    updated.extend_from_slice(HEADER_SEPARATOR);
    updated.extend_from_slice(content);
    return settle(content, updated, Change::Insert);
  }

  settle(content, rewrite_matches(content, header, &matches), Change::Replace)
}

/// Plans a replace run: swap copies of the old header for `header`. Files
/// without the old header are left alone.
pub fn replace_header(content: &[u8], header: &str, old_pattern: &DetectionPattern) -> Change {
  let matches = old_pattern.find_all(content);

  if matches.is_empty() {
    return Change::NoChange;
  }

  settle(content, rewrite_matches(content, header, &matches), Change::Replace)
}

fn settle(original: &[u8], updated: Vec<u8>, change: fn(Vec<u8>) -> Change) -> Change {
  if updated == original {
    Change::NoChange
  } else {
    change(updated)
  }
}

/// Puts `header` where the first match was and deletes every later match.
fn rewrite_matches(content: &[u8], header: &str, matches: &[Range<usize>]) -> Vec<u8> {
  let mut out = Vec::with_capacity(content.len() + header.len());
  let mut cursor = 0;

  for (index, range) in matches.iter().enumerate() {
    if range.start < cursor {
      continue;
    }

    out.extend_from_slice(&content[cursor..range.start]);
    if index == 0 {
      out.extend_from_slice(header.as_bytes());
      cursor = range.end;
    } else if starts_line(content, range.start) {
      cursor = range.end + trailing_break_len(&content[range.end..]);
    } else {
      cursor = range.end;
    }
  }

  out.extend_from_slice(&content[cursor..]);
  out
}

/// Whether `offset` is the first byte of a line.
fn starts_line(content: &[u8], offset: usize) -> bool {
  offset == 0 || content[offset - 1] == b'\n'
}

/// Line breaks swallowed after a removed duplicate, longest first.
const TRAILING_BREAKS: [&[u8]; 4] = [b"\r\n\r\n", b"\n\n", b"\r\n", b"\n"];

/// Length of the blank line or single line break right after a removed
/// duplicate.
fn trailing_break_len(rest: &[u8]) -> usize {
  TRAILING_BREAKS
    .iter()
    .find(|brk| rest.starts_with(brk))
    .map_or(0, |brk| brk.len())
}
