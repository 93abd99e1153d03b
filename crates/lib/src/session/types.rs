use std::path::PathBuf;

use thiserror::Error;

/// Errors returned when queueing content.
#[derive(Debug, Error)]
pub enum SessionError {
  #[error("file not found: {}", path.display())]
  FileNotFound { path: PathBuf },

  #[error("file '{}' is outside of the content directory '{}'", path.display(), root.display())]
  OutsideContentRoot { path: PathBuf, root: PathBuf },

  #[error("could not locate a .contentproj file for '{}'", path.display())]
  ProjectNotFound { path: PathBuf },

  #[error("no type mapping found for '{}'", path.display())]
  UnmappedFile { path: PathBuf },

  #[error("'{}' is already queued", path.display())]
  DuplicateEntry { path: PathBuf },

  #[error("session has been disposed")]
  Disposed,

  #[error("failed to resolve path {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}
