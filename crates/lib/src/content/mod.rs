//! Queued content entries and the rules for naming them.

mod name;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use name::{content_name, find_content_project_dir, normalize_path};

/// One source asset queued for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedContentFile {
  /// Absolute path of the source file.
  pub path: PathBuf,
  /// Logical name the game loads the compiled asset by, `/`-separated.
  pub content_name: String,
  pub importer: Option<String>,
  pub processor: Option<String>,
}

impl QueuedContentFile {
  /// File name shown for the item in the build description.
  pub fn display_name(&self) -> String {
    self
      .path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default()
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}
