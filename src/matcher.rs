//! # Matcher Module
//!
//! Path selection. A path is eligible for processing when it matches at least
//! one spec pattern, matches the `include` regex if one is configured, and
//! does not match the `exclude` regex. Which spec then governs the file is
//! decided by [`select_spec`]: the first one in declaration order.

use regex::{Regex, RegexSet};
use tracing::trace;

use crate::config::{ConfigError, HeaderSpec};

/// Returns the first spec whose pattern matches `path`.
pub fn select_spec<'a>(path: &str, specs: &'a [HeaderSpec]) -> Option<&'a HeaderSpec> {
  select_spec_index(path, specs).map(|index| &specs[index])
}

/// Like [`select_spec`], but returns the spec's position.
pub fn select_spec_index(path: &str, specs: &[HeaderSpec]) -> Option<usize> {
  specs.iter().position(|spec| spec.matches(path))
}

/// Decides which paths are eligible for processing.
#[derive(Debug, Clone)]
pub struct FileMatcher {
  specs: RegexSet,
  include: Option<Regex>,
  exclude: Option<Regex>,
}

impl FileMatcher {
  /// Builds a matcher from spec pattern sources and the optional
  /// include/exclude regexes.
  pub fn new<'a>(
    spec_patterns: impl IntoIterator<Item = &'a str>,
    include: Option<Regex>,
    exclude: Option<Regex>,
  ) -> Result<Self, ConfigError> {
    let patterns: Vec<&str> = spec_patterns.into_iter().collect();
    let specs = RegexSet::new(&patterns).map_err(|source| ConfigError::InvalidRegex {
      field: "spec patterns".to_string(),
      pattern: patterns.join("|"),
      source,
    })?;

    Ok(Self {
      specs,
      include,
      exclude,
    })
  }

  /// Whether `path` should be processed.
  pub fn is_match(&self, path: &str) -> bool {
    if !self.specs.is_match(path) {
      trace!("{}: no spec pattern matches", path);
      return false;
    }

    if let Some(include) = &self.include
      && !include.is_match(path)
    {
      trace!("{}: not matched by include pattern", path);
      return false;
    }

    if let Some(exclude) = &self.exclude
      && exclude.is_match(path)
    {
      trace!("{}: excluded", path);
      return false;
    }

    true
  }

  /// Keeps the eligible paths, preserving order.
  pub fn filter<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
    paths
      .iter()
      .map(AsRef::as_ref)
      .filter(|path| self.is_match(path))
      .map(str::to_string)
      .collect()
  }
}
