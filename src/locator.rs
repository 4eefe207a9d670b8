//! # Locator Module
//!
//! Derives a [`DetectionPattern`] from a commented header template. The
//! pattern matches any header previously rendered from the same template,
//! whatever filename or year was baked in at the time, which is what makes
//! repeated runs idempotent and lets an old header be swapped for a new one.

use std::ops::Range;

use regex::bytes::Regex;

use crate::templates::{Segment, TemplateError, tokenize};

/// Pattern substituted for every placeholder. Greedy, and like all `.`
/// matches it never crosses a line break.
pub const PLACEHOLDER_PATTERN: &str = "(.+)";

/// Builds the regex source for a commented template: literal segments are
/// escaped, every placeholder becomes [`PLACEHOLDER_PATTERN`].
pub fn pattern_source(commented: &str) -> Result<String, TemplateError> {
  let mut source = String::with_capacity(commented.len() * 2);

  for segment in tokenize(commented)? {
    match segment {
      Segment::Literal(text) => source.push_str(&regex::escape(text)),
      Segment::Placeholder { .. } => source.push_str(PLACEHOLDER_PATTERN),
    }
  }

  Ok(source)
}

/// Compiled matcher for previously rendered copies of a header.
#[derive(Debug, Clone)]
pub struct DetectionPattern {
  regex: Regex,
}

impl DetectionPattern {
  /// Derives the pattern from a commented, not yet rendered, template.
  pub fn from_commented(commented: &str) -> Result<Self, TemplateError> {
    let source = pattern_source(commented)?;
    let regex = Regex::new(&source).map_err(|source| TemplateError::Pattern { source })?;
    Ok(Self { regex })
  }

  /// The underlying regex source.
  pub fn as_str(&self) -> &str {
    self.regex.as_str()
  }

  /// Whether `content` contains at least one copy of the header.
  pub fn is_match(&self, content: &[u8]) -> bool {
    self.regex.is_match(content)
  }

  /// Byte ranges of every non-overlapping copy of the header, in order.
  pub fn find_all(&self, content: &[u8]) -> Vec<Range<usize>> {
    self.regex.find_iter(content).map(|m| m.range()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::templates::{CommentStyle, HeaderData, format_with_comment_style, render};

  fn pattern_for(template: &str, comment: &str) -> DetectionPattern {
    let commented = format_with_comment_style(template, &CommentStyle::line(comment));
    DetectionPattern::from_commented(&commented).unwrap()
  }

  #[test]
  fn test_placeholder_matches_any_value() {
    let pattern = pattern_for("Hello {{name}}", "#");

    assert!(pattern.is_match(b"# Hello Alice"));
    assert!(pattern.is_match(b"# Hello Bob"));
    assert!(!pattern.is_match(b"# Goodbye Alice"));
  }

  #[test]
  fn test_pattern_source_escapes_literals() {
    let commented = format_with_comment_style("(c) {{ .Year }} a.b", &CommentStyle::line("//"));
    let source = pattern_source(&commented).unwrap();
    assert_eq!(source, format!("// \\(c\\) {} a\\.b", PLACEHOLDER_PATTERN));
  }

  #[test]
  fn test_template_without_placeholders_matches_only_itself() {
    let pattern = pattern_for("Price (USD) $5.00 [x]*", "#");

    assert!(pattern.is_match(b"# Price (USD) $5.00 [x]*"));
    assert!(!pattern.is_match(b"# Price (USD) $5X00 [x]*"));
    assert!(!pattern.is_match(b"# Price USD $5.00 x"));
  }

  #[test]
  fn test_matches_rendered_header_from_another_year() {
    let commented = format_with_comment_style(
      "Copyright (c) {{ .Year }}, acme\nFilename: {{ .Filename }}",
      &CommentStyle::line("//"),
    );
    let pattern = DetectionPattern::from_commented(&commented).unwrap();
    let old = render(&commented, &HeaderData::new("old/name.go", 2019)).unwrap();

    let content = format!("{old}\n\npackage main\n");
    let ranges = pattern.find_all(content.as_bytes());
    assert_eq!(ranges, vec![0..old.len()]);
  }

  #[test]
  fn test_placeholder_does_not_span_lines() {
    let pattern = pattern_for("Copyright {{ .Year }}", "//");
    assert!(!pattern.is_match(b"// Copyright \n"));
  }

  #[test]
  fn test_find_all_reports_every_copy() {
    let pattern = pattern_for("Copyright {{ .Year }}", "#");
    let ranges = pattern.find_all(b"# Copyright 2020\n\n# Copyright 2021\nx = 1\n");
    assert_eq!(ranges, vec![0..16, 18..34]);
  }
}
