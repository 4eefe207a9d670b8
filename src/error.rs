//! # Error Module
//!
//! Typed errors raised by the header engine. Every variant here is fatal to a
//! run; recoverable conditions (a file that matches no spec) and lint failures
//! are reported through [`RunReport`](crate::report::RunReport) instead.

use std::path::PathBuf;

pub use crate::config::ConfigError;
pub use crate::templates::TemplateError;

/// Umbrella error for [`Processor`](crate::processor::Processor) operations.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The configuration could not be loaded or compiled.
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A header template could not be tokenized or rendered.
  #[error(transparent)]
  Template(#[from] TemplateError),

  /// A file could not be read or written.
  #[error("{action} '{path}': {source}")]
  Io {
    action: &'static str,
    path: PathBuf,
    source: std::io::Error,
  },
}

impl HeaderError {
  pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      action,
      path: path.into(),
      source,
    }
  }
}
