//! Types shared across the engine boundary.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors captured while preparing, submitting, or waiting on a build.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The session was disposed before the build started.
  #[error("session has been disposed")]
  Disposed,

  #[error("failed to create working directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to remove stale project {}: {source}", path.display())]
  RemoveProject { path: PathBuf, source: std::io::Error },

  #[error("failed to write project {}: {source}", path.display())]
  WriteProject { path: PathBuf, source: std::io::Error },

  /// The engine could not be started.
  #[error("failed to start build engine '{program}': {source}")]
  Spawn { program: String, source: std::io::Error },

  #[error("failed to create engine runtime: {0}")]
  Runtime(#[source] std::io::Error),

  /// The engine failed internally.
  #[error("build engine error: {0}")]
  Engine(String),

  /// The engine dropped the submission without reporting a result.
  #[error("build engine stopped without reporting a result")]
  Disconnected,
}

/// Overall outcome reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildResultCode {
  Success,
  Failure,
}

/// Result of a completed engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
  pub code: BuildResultCode,
  /// Exit status of the engine process, when the engine runs one.
  pub exit_code: Option<i32>,
}

impl BuildResult {
  pub fn success() -> Self {
    Self {
      code: BuildResultCode::Success,
      exit_code: None,
    }
  }

  pub fn failure() -> Self {
    Self {
      code: BuildResultCode::Failure,
      exit_code: None,
    }
  }

  pub fn with_exit_code(mut self, code: Option<i32>) -> Self {
    self.exit_code = code;
    self
  }

  pub fn is_success(&self) -> bool {
    self.code == BuildResultCode::Success
  }
}

/// Locations of a submitted build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildRequest {
  /// The project file written for this build.
  pub project_path: PathBuf,
  pub working_dir: PathBuf,
  /// Where compiled content is expected (`<working_dir>/bin/Content`).
  pub output_dir: PathBuf,
}
