//! # Templates Module
//!
//! This module turns a raw header template into text that can be stamped onto
//! a file. Rendering happens in two steps:
//!
//! 1. [`format_with_comment_style`] wraps every template line in the comment
//!    tokens of a [`CommentStyle`]. Placeholders are still present afterwards,
//!    which is what the [`locator`](crate::locator) needs to build a detection
//!    pattern.
//! 2. [`render`] expands the placeholders with a [`HeaderData`] value.
//!
//! Placeholders are `{{ ... }}` spans. The recognised names are `Year` and
//! `Filename`, matched case-insensitively with an optional leading dot, so
//! `{{ .Year }}` and `{{year}}` are equivalent. Any other name is copied to the
//! output untouched.
//!
//! ## Example
//!
//! ```rust
//! use edheader::templates::{CommentStyle, HeaderData, format_with_comment_style, render};
//!
//! # fn main() -> Result<(), edheader::templates::TemplateError> {
//! let commented = format_with_comment_style("Copyright {{ .Year }}", &CommentStyle::line("//"));
//! assert_eq!(commented, "// Copyright {{ .Year }}");
//!
//! let header = render(&commented, &HeaderData::new("main.go", 2025))?;
//! assert_eq!(header, "// Copyright 2025");
//! # Ok(())
//! # }
//! ```

use chrono::Datelike;

/// Opening placeholder delimiter.
pub const OPEN_DELIMITER: &str = "{{";

/// Closing placeholder delimiter.
pub const CLOSE_DELIMITER: &str = "}}";

/// Errors raised while tokenizing a header template.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
  /// A `{{` appeared inside an unfinished placeholder.
  #[error("nested placeholder delimiter at byte {position} of header template")]
  NestedDelimiter { position: usize },

  /// A placeholder with nothing between its delimiters.
  #[error("empty placeholder at byte {position} of header template")]
  EmptyPlaceholder { position: usize },

  /// The detection pattern derived from the template did not compile, which
  /// only happens when it exceeds the regex size limit.
  #[error("could not compile header detection pattern: {source}")]
  Pattern { source: regex::Error },
}

/// One piece of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
  /// Text copied verbatim.
  Literal(&'a str),
  /// A `{{ ... }}` span. `raw` includes the delimiters, `name` is the trimmed
  /// text between them.
  Placeholder { raw: &'a str, name: &'a str },
}

/// Splits a template into literal and placeholder segments.
///
/// Malformed input is handled deterministically:
///
/// - an opener with no closer after it leaves the remainder as a literal;
/// - a closer with no opener before it is part of the surrounding literal;
/// - an opener inside an unfinished placeholder is a
///   [`TemplateError::NestedDelimiter`];
/// - `{{}}` or `{{   }}` is a [`TemplateError::EmptyPlaceholder`].
pub fn tokenize(src: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
  let mut segments = Vec::new();
  let mut rest = src;
  let mut offset = 0;

  while let Some(open) = rest.find(OPEN_DELIMITER) {
    let inner_start = open + OPEN_DELIMITER.len();
    let Some(close) = rest[inner_start..].find(CLOSE_DELIMITER) else {
      break;
    };

    let inner = &rest[inner_start..inner_start + close];
    if let Some(nested) = inner.find(OPEN_DELIMITER) {
      return Err(TemplateError::NestedDelimiter {
        position: offset + inner_start + nested,
      });
    }

    let name = inner.trim();
    if name.is_empty() {
      return Err(TemplateError::EmptyPlaceholder { position: offset + open });
    }

    if open > 0 {
      segments.push(Segment::Literal(&rest[..open]));
    }

    let end = inner_start + close + CLOSE_DELIMITER.len();
    segments.push(Segment::Placeholder {
      raw: &rest[open..end],
      name,
    });

    offset += end;
    rest = &rest[end..];
  }

  if !rest.is_empty() {
    segments.push(Segment::Literal(rest));
  }

  Ok(segments)
}

/// Placeholders the renderer knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
  Year,
  Filename,
}

impl Variable {
  /// Resolves a placeholder name, ignoring case and one leading dot.
  pub fn from_name(name: &str) -> Option<Self> {
    let name = name.strip_prefix('.').unwrap_or(name).trim();
    if name.eq_ignore_ascii_case("year") {
      Some(Self::Year)
    } else if name.eq_ignore_ascii_case("filename") {
      Some(Self::Filename)
    } else {
      None
    }
  }
}

/// Per-file values substituted into a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
  /// Either the base name or the full relative path, depending on the
  /// `fullFilepath` option.
  pub filename: String,
  pub year: i32,
}

impl HeaderData {
  pub fn new(filename: impl Into<String>, year: i32) -> Self {
    Self {
      filename: filename.into(),
      year,
    }
  }

  /// Header data stamped with the current local calendar year.
  pub fn current(filename: impl Into<String>) -> Self {
    Self::new(filename, current_year())
  }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
  chrono::Local::now().year()
}

/// Comment tokens wrapped around each header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// Token placed before every line (e.g. `//`, `#`, `<!--`).
  pub open: String,

  /// Token placed after every line, for languages without line comments.
  pub close: Option<String>,
}

impl CommentStyle {
  /// Create a line-comment style (no closing token).
  pub fn line(open: &str) -> Self {
    Self {
      open: open.to_string(),
      close: None,
    }
  }

  /// Create a style that closes the comment on every line.
  pub fn block(open: &str, close: &str) -> Self {
    Self {
      open: open.to_string(),
      close: Some(close.to_string()),
    }
  }
}

/// Comments every line of a header template.
///
/// Each line becomes `open + " " + line`, followed by `" " + close` when the
/// style has a closing token. Trailing line breaks of the template are dropped
/// first and `\r\n` is treated like `\n`. Placeholders are left alone.
pub fn format_with_comment_style(template: &str, style: &CommentStyle) -> String {
  let template = template.trim_end_matches(['\n', '\r']);

  template
    .split('\n')
    .map(|line| {
      let line = line.strip_suffix('\r').unwrap_or(line);
      match &style.close {
        Some(close) => format!("{} {} {}", style.open, line, close),
        None => format!("{} {}", style.open, line),
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// Expands the recognised placeholders of a commented template.
///
/// Unrecognised placeholders are copied through with their delimiters.
pub fn render(commented: &str, data: &HeaderData) -> Result<String, TemplateError> {
  let mut rendered = String::with_capacity(commented.len());

  for segment in tokenize(commented)? {
    match segment {
      Segment::Literal(text) => rendered.push_str(text),
      Segment::Placeholder { raw, name } => match Variable::from_name(name) {
        Some(Variable::Year) => rendered.push_str(&data.year.to_string()),
        Some(Variable::Filename) => rendered.push_str(&data.filename),
        None => rendered.push_str(raw),
      },
    }
  }

  Ok(rendered)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokenize_without_placeholders() {
    let segments = tokenize("# plain header").unwrap();
    assert_eq!(segments, vec![Segment::Literal("# plain header")]);
  }

  #[test]
  fn test_tokenize_mixed() {
    let segments = tokenize("a {{ .Year }} b {{filename}}").unwrap();
    assert_eq!(
      segments,
      vec![
        Segment::Literal("a "),
        Segment::Placeholder {
          raw: "{{ .Year }}",
          name: ".Year"
        },
        Segment::Literal(" b "),
        Segment::Placeholder {
          raw: "{{filename}}",
          name: "filename"
        },
      ]
    );
  }

  #[test]
  fn test_tokenize_unclosed_opener_is_literal() {
    let segments = tokenize("x {{ .Year }} tail {{ open").unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[2], Segment::Literal(" tail {{ open"));
  }

  #[test]
  fn test_tokenize_stray_closer_is_literal() {
    let segments = tokenize("a }} b").unwrap();
    assert_eq!(segments, vec![Segment::Literal("a }} b")]);
  }

  #[test]
  fn test_tokenize_nested_opener_is_error() {
    let err = tokenize("ab {{ x {{ y }}").unwrap_err();
    assert_eq!(err, TemplateError::NestedDelimiter { position: 8 });
  }

  #[test]
  fn test_tokenize_empty_placeholder_is_error() {
    let err = tokenize("ab {{  }} cd").unwrap_err();
    assert_eq!(err, TemplateError::EmptyPlaceholder { position: 3 });
  }

  #[test]
  fn test_variable_names() {
    assert_eq!(Variable::from_name(".Year"), Some(Variable::Year));
    assert_eq!(Variable::from_name("year"), Some(Variable::Year));
    assert_eq!(Variable::from_name("FILENAME"), Some(Variable::Filename));
    assert_eq!(Variable::from_name(".Author"), None);
  }

  #[test]
  fn test_format_with_line_comment_style() {
    let formatted = format_with_comment_style("Hello world\nThis is my header", &CommentStyle::line("#"));
    assert_eq!(formatted, "# Hello world\n# This is my header");
  }

  #[test]
  fn test_format_with_closing_token() {
    let formatted = format_with_comment_style("Copyright {{ .Year }}", &CommentStyle::block("<!--", "-->"));
    assert_eq!(formatted, "<!-- Copyright {{ .Year }} -->");
  }

  #[test]
  fn test_format_trims_trailing_newlines_and_crlf() {
    let formatted = format_with_comment_style("one\r\ntwo\n\n", &CommentStyle::line("//"));
    assert_eq!(formatted, "// one\n// two");
  }

  #[test]
  fn test_render_expands_known_placeholders() {
    let rendered = render(
      "# (c) {{ .Year }} acme\n# Filename: {{ .Filename }}",
      &HeaderData::new("src/app.py", 2024),
    )
    .unwrap();
    assert_eq!(rendered, "# (c) 2024 acme\n# Filename: src/app.py");
  }

  #[test]
  fn test_render_passes_unknown_placeholders_through() {
    let rendered = render("// {{ .Author }} {{year}}", &HeaderData::new("a.go", 2030)).unwrap();
    assert_eq!(rendered, "// {{ .Author }} 2030");
  }

  #[test]
  fn test_render_propagates_template_errors() {
    let result = render("// {{}}", &HeaderData::new("a.go", 2030));
    assert!(matches!(result, Err(TemplateError::EmptyPlaceholder { .. })));
  }
}
