//! # edheader
//!
//! A tool that stamps a configurable copyright/license header onto source
//! files, commented in each file's own syntax.
//!
//! A `headers.toml` file holds the header template and an ordered list of
//! specs. Each spec pairs a path regex with comment tokens; the first spec
//! whose regex matches a file decides how the header is commented there.
//! Headers are found again by turning the template into a regex, so running
//! the tool twice changes nothing, a header from an earlier year is updated in
//! place and duplicate copies collapse into one.
//!
//! ## Features
//!
//! * Apply mode inserts or refreshes headers in every matching file
//! * Lint mode reports files whose header is missing or outdated without
//!   modifying them, for git hooks and CI
//! * Replace mode swaps the configured header for a new one
//! * `{{ .Year }}` and `{{ .Filename }}` placeholders
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use edheader::config::Config;
//! use edheader::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("headers.toml".as_ref())?;
//!
//!     let options = ProcessorConfig {
//!         lint: true,
//!         ..ProcessorConfig::new(".")
//!     };
//!     let processor = Processor::new(config, options)?;
//!
//!     let report = processor.run(&[])?;
//!     for file in report.lint_failures() {
//!         println!("{} needs a header", file.path);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`config`] - Loading and compiling `headers.toml`
//! * [`templates`] - Placeholder parsing, commenting and rendering
//! * [`locator`] - Detection of previously rendered headers
//! * [`matcher`] - Spec selection and file eligibility
//! * [`processor`] - Planning and executing header changes

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod locator;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;

use std::path::PathBuf;

pub use config::Config;
pub use error::HeaderError;
pub use processor::{Processor, ProcessorConfig};
pub use report::{Outcome, RunReport};

/// Ensures every eligible file under `root` (or in `files`, relative to
/// `root`) carries the configured header. In lint mode nothing is written.
pub fn run(config: Config, root: impl Into<PathBuf>, files: &[String], lint: bool) -> Result<RunReport, HeaderError> {
  let options = ProcessorConfig {
    lint,
    ..ProcessorConfig::new(root)
  };
  Processor::new(config, options)?.run(files)
}

/// Replaces the configured header with `new_header` in every eligible file
/// that carries it.
pub fn replace(
  config: Config,
  root: impl Into<PathBuf>,
  files: &[String],
  new_header: &str,
  lint: bool,
) -> Result<RunReport, HeaderError> {
  let options = ProcessorConfig {
    lint,
    ..ProcessorConfig::new(root)
  };
  Processor::new(config, options)?.replace(files, new_header)
}
