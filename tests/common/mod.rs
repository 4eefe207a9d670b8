#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use edheader::config::Config;
use edheader::processor::{Processor, ProcessorConfig};

/// Year every test run is pinned to.
pub const TEST_YEAR: i32 = 2025;

/// Config used by most tests: Python and Go, base-name filenames.
pub const BASIC_CONFIG: &str = r##"
headerText = """Copyright (c) {{ .Year }}, acme
Filename: {{ .Filename }}"""

spec = [
    { regex = '\.py$', comment = "#" },
    { regex = '\.go$', comment = "//" },
    { regex = '\.html$', comment = "<!--", endComment = "-->" },
]
"##;

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reads `root/relative` as UTF-8.
pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Builds a processor over `root` with the year pinned to [`TEST_YEAR`].
pub fn processor(config: &str, root: &Path, lint: bool) -> Result<Processor> {
  let config = Config::from_toml_str(config)?;
  let options = ProcessorConfig {
    lint,
    year: Some(TEST_YEAR),
    ..ProcessorConfig::new(root)
  };
  Ok(Processor::new(config, options)?)
}

/// The header [`BASIC_CONFIG`] produces for a Python file.
pub fn python_header(filename: &str, year: i32) -> String {
  format!("# Copyright (c) {year}, acme\n# Filename: {filename}")
}
