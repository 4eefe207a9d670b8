use clap::ValueEnum;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode to every `if_supports_color` call made afterwards.
  pub fn apply(self) {
    match self {
      Self::Auto => owo_colors::unset_override(),
      Self::Never => owo_colors::set_override(false),
      Self::Always => owo_colors::set_override(true),
    }
  }
}

/// Log level for the given flags: `error` when quiet, otherwise `warn`,
/// raised to `info`, `debug` and `trace` by each `-v`.
pub const fn level_for(quiet: bool, verbose: u8) -> &'static str {
  if quiet {
    return "error";
  }
  match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Installs the global stderr subscriber.
///
/// `RUST_LOG` takes precedence over the flags. Calling this more than once
/// keeps the first subscriber.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(quiet, verbose)));

  let installed = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .compact()
    .try_init();

  if let Err(e) = installed {
    debug!("Keeping existing tracing subscriber: {e}");
  }
}
