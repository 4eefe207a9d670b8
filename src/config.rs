//! # Configuration Module
//!
//! This module loads the `headers.toml` configuration: the header template,
//! the ordered list of language specs and the file selection options.
//!
//! The raw TOML document is deserialized into [`ConfigFile`] and then compiled
//! into a [`Config`], which owns the compiled regexes and the per-spec
//! commented header. A compiled `Config` is immutable for the rest of the run.
//!
//! ```toml
//! headerText = """Copyright (c) {{ .Year }}, acme
//! Filename: {{ .Filename }}"""
//!
//! spec = [
//!     { regex = '^.+\.py', comment = "#" },
//!     { regex = '^.+\.html', comment = "<!--", endComment = "-->" },
//! ]
//!
//! [options]
//! fullFilepath = true
//! excludeRegex = '^vendor/'
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::matcher::{FileMatcher, select_spec};
use crate::templates::{CommentStyle, format_with_comment_style};

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = "headers.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "EDHEADER_CONFIG";

/// Content written by `edheader new`.
pub const DEFAULT_CONFIG_CONTENT: &str = r##"headerText = """https://github.com/yourUsername/yourRepo
Copyright (c) {{ .Year }}, yourUsername and contributors
SPDX-License-Identifier: MIT
Filename: {{ .Filename }}"""

spec = [
    { regex = '^.+\.py', comment = "#" },
    { regex = '^.+\.go', comment = "//" },
    { regex = '^.+\.html', comment = "<!--", endComment = "-->" },
]

[options]
fullFilepath = true
"##;

/// One `spec` entry as written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpecConfig {
  /// Regex matched against the file path.
  pub regex: String,

  /// Token that opens a comment line.
  pub comment: String,

  /// Token that closes a comment line, if the language needs one.
  #[serde(default)]
  pub end_comment: Option<String>,
}

/// The `[options]` table.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsConfig {
  /// Substitute the full relative path for `{{ .Filename }}` instead of the
  /// base name.
  #[serde(default)]
  pub full_filepath: bool,

  /// Paths matching this regex are never processed.
  #[serde(default, alias = "exclude")]
  pub exclude_regex: Option<String>,

  /// When set, only paths matching this regex are processed.
  #[serde(default)]
  pub include: Option<String>,
}

/// The configuration document as deserialized from TOML.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
  pub header_text: String,

  #[serde(default)]
  pub spec: Vec<SpecConfig>,

  #[serde(default)]
  pub options: OptionsConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A regex in the config does not compile.
  #[error("Invalid regex for {field} ('{pattern}'): {source}")]
  InvalidRegex {
    field: String,
    pattern: String,
    source: regex::Error,
  },

  /// A spec has an empty comment token.
  #[error("Invalid spec #{index} ('{regex}'): comment cannot be empty")]
  EmptyComment { index: usize, regex: String },

  /// No config file was given and none was found.
  #[error("could not find configuration file headers.toml in '{searched_from}' or any parent directory")]
  NotFound { searched_from: PathBuf },
}

/// A language spec with its applicability pattern compiled.
#[derive(Debug, Clone)]
pub struct HeaderSpec {
  pattern: Regex,
  style: CommentStyle,
  commented_header: String,
}

impl HeaderSpec {
  /// Compiles the spec at position `index` and comments `header_text` with
  /// its comment tokens.
  pub fn new(index: usize, regex: &str, style: CommentStyle, header_text: &str) -> Result<Self, ConfigError> {
    let pattern = compile_regex(&format!("spec #{index}"), regex)?;
    let commented_header = format_with_comment_style(header_text, &style);
    Ok(Self {
      pattern,
      style,
      commented_header,
    })
  }

  /// Whether this spec governs `path`.
  pub fn matches(&self, path: &str) -> bool {
    self.pattern.is_match(path)
  }

  /// The applicability regex source.
  pub fn regex(&self) -> &str {
    self.pattern.as_str()
  }

  pub const fn style(&self) -> &CommentStyle {
    &self.style
  }

  /// The configured header, commented for this spec with placeholders intact.
  pub fn commented_header(&self) -> &str {
    &self.commented_header
  }
}

/// File selection options, compiled.
#[derive(Debug, Clone)]
pub struct Options {
  pub full_filepath: bool,
  pub exclude: Option<Regex>,
  pub include: Option<Regex>,
}

/// A loaded and compiled configuration.
#[derive(Debug, Clone)]
pub struct Config {
  header_text: String,
  specs: Vec<HeaderSpec>,
  options: Options,
  file_matcher: FileMatcher,
}

impl Config {
  /// Compile a deserialized config file.
  ///
  /// Every regex is compiled and every spec's commented header is derived
  /// here, so an invalid pattern is reported before any file is touched.
  pub fn new(file: ConfigFile) -> Result<Self, ConfigError> {
    let mut specs = Vec::with_capacity(file.spec.len());

    for (index, spec) in file.spec.iter().enumerate() {
      if spec.comment.is_empty() {
        return Err(ConfigError::EmptyComment {
          index,
          regex: spec.regex.clone(),
        });
      }

      let style = match non_empty(spec.end_comment.as_deref()) {
        Some(end) => CommentStyle::block(&spec.comment, end),
        None => CommentStyle::line(&spec.comment),
      };

      specs.push(HeaderSpec::new(index, &spec.regex, style, &file.header_text)?);
    }

    let exclude = non_empty(file.options.exclude_regex.as_deref())
      .map(|p| compile_regex("options.excludeRegex", p))
      .transpose()?;
    let include = non_empty(file.options.include.as_deref())
      .map(|p| compile_regex("options.include", p))
      .transpose()?;

    let file_matcher = FileMatcher::new(
      specs.iter().map(HeaderSpec::regex),
      include.clone(),
      exclude.clone(),
    )?;

    Ok(Self {
      header_text: file.header_text,
      specs,
      options: Options {
        full_filepath: file.options.full_filepath,
        exclude,
        include,
      },
      file_matcher,
    })
  }

  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = Self::parse(&content, path)?;
    debug!("Loaded {} header specs", config.specs.len());

    Ok(config)
  }

  /// Parse configuration from TOML text.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    Self::parse(content, Path::new("<inline>"))
  }

  fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
    let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: origin.to_path_buf(),
      source: e,
    })?;
    Self::new(file)
  }

  /// The raw header template.
  pub fn header_text(&self) -> &str {
    &self.header_text
  }

  /// Specs in declaration order.
  pub fn specs(&self) -> &[HeaderSpec] {
    &self.specs
  }

  pub const fn options(&self) -> &Options {
    &self.options
  }

  /// Matcher for the union of spec patterns plus include/exclude.
  pub const fn file_matcher(&self) -> &FileMatcher {
    &self.file_matcher
  }

  /// The first spec governing `path`, if any.
  pub fn spec_for(&self, path: &str) -> Option<&HeaderSpec> {
    select_spec(path, &self.specs)
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}

fn compile_regex(field: &str, pattern: &str) -> Result<Regex, ConfigError> {
  Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
    field: field.to_string(),
    pattern: pattern.to_string(),
    source,
  })
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--inputfile` (passed as `explicit_path`)
/// 2. Path specified via the `EDHEADER_CONFIG` environment variable
/// 3. `headers.toml` in `start_dir` or the nearest parent directory holding
///    one
pub fn discover_config_path(explicit_path: Option<&Path>, start_dir: &Path) -> Result<PathBuf, ConfigError> {
  if let Some(path) = explicit_path {
    debug!("Using explicit config path: {}", path.display());
    return Ok(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
    && !env_path.is_empty()
  {
    debug!("Using config from {}: {}", CONFIG_ENV_VAR, env_path);
    return Ok(PathBuf::from(env_path));
  }

  for dir in start_dir.ancestors() {
    debug!("Searching for config file in {}", dir.display());
    let candidate = dir.join(DEFAULT_CONFIG_FILENAME);
    if candidate.is_file() {
      debug!("Found config file {}", candidate.display());
      return Ok(candidate);
    }
  }

  Err(ConfigError::NotFound {
    searched_from: start_dir.to_path_buf(),
  })
}

/// Discover and load the configuration.
pub fn load_config(explicit_path: Option<&Path>, start_dir: &Path) -> Result<Config> {
  let path = discover_config_path(explicit_path, start_dir)?;
  let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
  Ok(config)
}
