//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding a content tree and a
/// private scratch root.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an environment with `Content/Content.contentproj` in place.
  pub fn with_content_project() -> Self {
    let env = Self::empty();
    env.write_file("Content/Content.contentproj", "<Project />");
    env
  }

  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory and return its path.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Scratch root used by commands from [`TestEnv::xnac_cmd`].
  pub fn scratch_path(&self) -> PathBuf {
    self.temp.path().join("scratch")
  }

  /// Get a Command for the xnac binary with `XNACONTENT_SCRATCH` isolated.
  pub fn xnac_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("xnac");
    cmd.env("XNACONTENT_SCRATCH", self.scratch_path());
    cmd
  }

  /// A build command whose engine is a shell script run with the project path as `$0`.
  #[cfg(unix)]
  pub fn build_cmd(&self, script: &str) -> Command {
    let mut cmd = self.xnac_cmd();
    cmd.args(["build", "--engine", "/bin/sh", "--engine-arg", "-c", "--engine-arg", script]);
    cmd
  }
}

/// Directory names directly under `dir`, sorted.
pub fn dir_names(dir: &Path) -> Vec<String> {
  let mut names: Vec<String> = match std::fs::read_dir(dir) {
    Ok(entries) => entries
      .flatten()
      .map(|e| e.file_name().to_string_lossy().into_owned())
      .collect(),
    Err(_) => Vec::new(),
  };
  names.sort();
  names
}
