use std::path::PathBuf;

use crate::consts::{APP_NAME, SCRATCH_ENV};

/// Returns the shared scratch root holding one directory per process.
///
/// `XNACONTENT_SCRATCH` takes precedence; otherwise this is a directory named
/// after the application inside the system temp directory.
pub fn scratch_root() -> PathBuf {
  std::env::var(SCRATCH_ENV)
    .ok()
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME))
}

/// Returns the directory containing the running executable.
///
/// Relative assembly references are resolved against this directory.
pub fn exe_dir() -> Option<PathBuf> {
  std::env::current_exe()
    .ok()
    .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
}
