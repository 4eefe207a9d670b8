//! # File I/O Module
//!
//! Byte-level file reads and writes for the processor. Content is never
//! decoded, so files that are not valid UTF-8 pass through untouched outside
//! the header region.

use std::fs;
use std::path::Path;

use tracing::trace;

use crate::error::HeaderError;

/// Mode given to a rewritten file whose original permissions could not be
/// read.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the full content of a file.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Returns
  ///
  /// The raw file bytes.
  pub fn read(path: &Path) -> Result<Vec<u8>, HeaderError> {
    fs::read(path).map_err(|e| HeaderError::io("Failed to read file", path, e))
  }

  /// Replaces a file's content, keeping its permission bits.
  ///
  /// When the original permissions cannot be read the file ends up with
  /// [`DEFAULT_FILE_MODE`] on unix.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - New file content
  pub fn write_preserving_permissions(path: &Path, content: &[u8]) -> Result<(), HeaderError> {
    let original = fs::metadata(path).ok().map(|m| m.permissions());

    fs::write(path, content).map_err(|e| HeaderError::io("Failed to write file", path, e))?;

    match original {
      Some(permissions) => {
        let current = fs::metadata(path).ok().map(|m| m.permissions());
        if current.as_ref() != Some(&permissions) {
          trace!("Restoring permissions of {}", path.display());
          fs::set_permissions(path, permissions).map_err(|e| HeaderError::io("Failed to set permissions", path, e))?;
        }
        Ok(())
      }
      None => apply_default_permissions(path),
    }
  }
}

#[cfg(unix)]
fn apply_default_permissions(path: &Path) -> Result<(), HeaderError> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(DEFAULT_FILE_MODE))
    .map_err(|e| HeaderError::io("Failed to set permissions", path, e))
}

#[cfg(not(unix))]
fn apply_default_permissions(_path: &Path) -> Result<(), HeaderError> {
  Ok(())
}
