//! # Scaffold Commands
//!
//! Writers behind `edheader new` and `edheader githook install`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Default location of the pre-commit hook.
pub const GITHOOK_PATH: &str = ".git/hooks/pre-commit";

/// Pre-commit hook that lints the staged files.
pub const GITHOOK_CONTENT: &str = "#!/bin/sh\nfiles=`git diff --name-only --cached`\nedheader --lint $files\n";

/// Writes `content` to `output`, or to `default_path` when no output is
/// given. Parent directories are created as needed.
///
/// # Parameters
///
/// * `output` - Path from `--output`
/// * `default_path` - Path used when `output` is `None`
/// * `content` - File content
/// * `executable` - Mark the file executable (unix only)
/// * `overwrite` - Replace a preexisting file
pub fn write_scaffold(
  output: Option<&Path>,
  default_path: &Path,
  content: &str,
  executable: bool,
  overwrite: bool,
) -> Result<()> {
  let path = output.unwrap_or(default_path);

  if path.exists() && !overwrite {
    bail!(
      "Target output file already exists. Select another output file using --output or forcibly overwrite the current file using --overwrite"
    );
  }

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }

  fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

  if executable {
    make_executable(path)?;
  }

  println!("Written to {}", path.display());
  Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(0o755))
    .with_context(|| format!("Failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
  Ok(())
}
