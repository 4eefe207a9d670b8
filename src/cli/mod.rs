//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing. Without a subcommand the tool applies
//! (or, with `--lint`, checks) headers; `replace`, `new` and `githook` are
//! subcommands.

mod run;
mod scaffold;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use run::{run_apply, run_replace};
pub use scaffold::{GITHOOK_CONTENT, GITHOOK_PATH, write_scaffold};

use crate::config::{DEFAULT_CONFIG_CONTENT, DEFAULT_CONFIG_FILENAME};
use crate::logging::{ColorMode, init_tracing};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EDHEADER_GIT_HASH"), ")");

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "edheader",
  author,
  version,
  long_version = LONG_VERSION,
  about = "Apply headers to source code files",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Create a starter headers.toml
  edheader new

  # Apply headers to every matching file below the current directory
  edheader

  # Check staged files without modifying them (what the git hook runs)
  edheader --lint src/main.go src/app.py

  # Swap the configured header for a new one
  cat new-header.txt | edheader replace

  # Install a pre-commit hook that lints staged files
  edheader githook install
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub global: GlobalArgs,

  /// Files to process, relative to the current directory. When empty, every
  /// matching file below the current directory is processed.
  #[arg(value_name = "FILES")]
  pub files: Vec<String>,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
  /// Input file to read configuration from (default: nearest headers.toml)
  #[arg(long, short = 'i', global = true, value_name = "FILE")]
  pub inputfile: Option<PathBuf>,

  /// Lint mode: report files whose header is missing or outdated and exit
  /// non-zero, without modifying anything (useful for git hooks)
  #[arg(long, short = 'l', global = true)]
  pub lint: bool,

  /// Year to substitute for {{ .Year }} (default: current year)
  #[arg(long, global = true)]
  pub year: Option<i32>,

  /// Show a diff of pending changes in lint mode
  #[arg(long, global = true)]
  pub show_diff: bool,

  /// Append diffs of pending changes in lint mode to a file
  #[arg(long, global = true, value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and lint failures
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    global = true,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Replace the configured header in files; the new header is read from
  /// standard input
  Replace(ReplaceArgs),

  /// Create a new default config file
  New(WriteArgs),

  /// Commands to manage edheader git hooks
  Githook {
    #[command(subcommand)]
    action: GithookCommand,
  },
}

/// Git hook subcommands
#[derive(Subcommand, Debug)]
pub enum GithookCommand {
  /// Install a pre-commit hook that lints staged files
  #[command(visible_alias = "i")]
  Install(WriteArgs),
}

/// Arguments for the replace command
#[derive(Args, Debug, Default)]
pub struct ReplaceArgs {
  /// Files to process; empty means every matching file
  #[arg(value_name = "FILES")]
  pub files: Vec<String>,
}

/// Arguments for commands that write a scaffold file
#[derive(Args, Debug, Default)]
pub struct WriteArgs {
  /// File to write to
  #[arg(long, short = 'o', value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Overwrite a preexisting file
  #[arg(long)]
  pub overwrite: bool,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Dispatches the parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
  init_tracing(cli.global.quiet, cli.global.verbose);
  cli.global.colors.apply();

  match cli.command {
    None => run_apply(&cli.global, &cli.files),
    Some(Command::Replace(args)) => run_replace(&cli.global, &args.files),
    Some(Command::New(args)) => {
      write_scaffold(
        args.output.as_deref(),
        Path::new(DEFAULT_CONFIG_FILENAME),
        DEFAULT_CONFIG_CONTENT,
        false,
        args.overwrite,
      )?;
      Ok(ExitCode::SUCCESS)
    }
    Some(Command::Githook {
      action: GithookCommand::Install(args),
    }) => {
      write_scaffold(
        args.output.as_deref(),
        Path::new(GITHOOK_PATH),
        GITHOOK_CONTENT,
        true,
        args.overwrite,
      )?;
      Ok(ExitCode::SUCCESS)
    }
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_positional_files_and_global_flags() {
    let cli = Cli::try_parse_from(["edheader", "-l", "-vv", "a.go", "b.py"]).unwrap();

    assert!(cli.command.is_none());
    assert!(cli.global.lint);
    assert_eq!(cli.global.verbose, 2);
    assert_eq!(cli.files, vec!["a.go", "b.py"]);
  }

  #[test]
  fn test_replace_accepts_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["edheader", "replace", "-i", "cfg.toml", "x.py"]).unwrap();

    assert_eq!(cli.global.inputfile, Some(PathBuf::from("cfg.toml")));
    match cli.command {
      Some(Command::Replace(args)) => assert_eq!(args.files, vec!["x.py"]),
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn test_githook_install_alias() {
    let cli = Cli::try_parse_from(["edheader", "githook", "i", "--overwrite"]).unwrap();

    match cli.command {
      Some(Command::Githook {
        action: GithookCommand::Install(args),
      }) => assert!(args.overwrite),
      other => panic!("unexpected command: {other:?}"),
    }
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["edheader", "-q", "-v"]).is_err());
  }
}
