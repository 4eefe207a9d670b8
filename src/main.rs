//! # edheader
//!
//! A tool that applies configurable headers to source code files.

use std::process::ExitCode;

use edheader::cli::{Cli, run};

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli) {
    Ok(code) => code,
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      ExitCode::FAILURE
    }
  }
}
