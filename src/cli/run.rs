//! # Run Commands
//!
//! The apply/lint entry point and the `replace` command.

use std::io::Read as _;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::GlobalArgs;
use crate::config::{DEFAULT_CONFIG_FILENAME, load_config};
use crate::diff::DiffManager;
use crate::output::Output;
use crate::processor::{Processor, ProcessorConfig};
use crate::report::RunReport;

/// Applies headers to `files` (or every matching file), or checks them in
/// lint mode.
pub fn run_apply(global: &GlobalArgs, files: &[String]) -> Result<ExitCode> {
  let processor = build_processor(global)?;
  let report = processor.run(files)?;
  Ok(finish(global, &report))
}

/// Replaces the configured header with one read from standard input.
pub fn run_replace(global: &GlobalArgs, files: &[String]) -> Result<ExitCode> {
  let mut input = String::new();
  std::io::stdin()
    .read_to_string(&mut input)
    .context("Failed to read new header from standard input")?;

  let new_header = input.trim();
  if new_header.is_empty() {
    bail!("no replacement header supplied on standard input");
  }
  debug!("Read {} byte replacement header", new_header.len());

  let processor = build_processor(global)?;
  let report = processor.replace(files, new_header)?;
  let code = finish(global, &report);

  if !report.is_lint() {
    output(global).print_hint(&format!(
      "Now update your {DEFAULT_CONFIG_FILENAME} file with the new header content."
    ));
  }

  Ok(code)
}

fn build_processor(global: &GlobalArgs) -> Result<Processor> {
  let cwd = std::env::current_dir().context("Failed to determine current directory")?;
  let config = load_config(global.inputfile.as_deref(), &cwd)?;

  let options = ProcessorConfig {
    lint: global.lint,
    year: global.year,
    diff_manager: Some(DiffManager::new(global.show_diff, global.save_diff.clone())),
    ..ProcessorConfig::new(cwd)
  };

  Ok(Processor::new(config, options)?)
}

fn finish(global: &GlobalArgs, report: &RunReport) -> ExitCode {
  output(global).print_report(report);

  if report.is_success() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}

const fn output(global: &GlobalArgs) -> Output {
  Output::new(global.quiet, global.verbose > 0)
}
