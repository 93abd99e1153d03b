//! Per-process scratch space for session working directories.
//!
//! # Layout
//!
//! ```text
//! {root}/
//! ├── <pid>/              # one directory per process that ran a session
//! │   ├── 0/              # working directory of the first session
//! │   └── 1/
//! └── <pid>/
//! ```
//!
//! A `<pid>` directory may be deleted once its process is gone. Sessions
//! release their own directory on disposal; [`ScratchSpace::sweep`] reclaims
//! directories left behind by processes that exited without doing so.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::platform::paths::scratch_root;
use crate::platform::{current_pid, process_exists};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(0);

/// Answers whether a process is still running.
pub trait ProcessProbe: Send + Sync {
  fn is_alive(&self, pid: u32) -> bool;
}

impl<F> ProcessProbe for F
where
  F: Fn(u32) -> bool + Send + Sync,
{
  fn is_alive(&self, pid: u32) -> bool {
    self(pid)
  }
}

/// Probes the operating system's process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProcessProbe;

impl ProcessProbe for OsProcessProbe {
  fn is_alive(&self, pid: u32) -> bool {
    process_exists(pid)
  }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SweepStats {
  /// Process directories examined.
  pub scanned: usize,
  /// Process directories kept because their process is running.
  pub live: usize,
  pub deleted: usize,
  pub bytes_freed: u64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SweepResult {
  pub stats: SweepStats,
  pub deleted_paths: Vec<PathBuf>,
}

/// The shared scratch root and the liveness check used to clean it.
#[derive(Clone)]
pub struct ScratchSpace {
  root: PathBuf,
  probe: Arc<dyn ProcessProbe>,
}

impl std::fmt::Debug for ScratchSpace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ScratchSpace").field("root", &self.root).finish_non_exhaustive()
  }
}

impl ScratchSpace {
  pub fn new(root: PathBuf, probe: Arc<dyn ProcessProbe>) -> Self {
    Self { root, probe }
  }

  /// Scratch space at the default root, probing real processes.
  pub fn default_space() -> Self {
    Self::new(scratch_root(), Arc::new(OsProcessProbe))
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Directory holding this process's working directories.
  pub fn process_dir(&self) -> PathBuf {
    self.root.join(current_pid().to_string())
  }

  /// Reserve a new working directory path. The directory is not created.
  ///
  /// Ordinals come from a process-wide counter, so every call returns a
  /// distinct path even across scratch spaces sharing a root.
  pub fn allocate(&self) -> PathBuf {
    let ordinal = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
    self.process_dir().join(ordinal.to_string())
  }

  /// Delete a working directory, then prune its process directory and the
  /// root if that leaves them empty.
  ///
  /// Failures are logged and ignored; a later sweep retries.
  pub fn release(&self, working_dir: &Path) {
    if let Err(e) = fs::remove_dir_all(working_dir)
      && e.kind() != io::ErrorKind::NotFound
    {
      warn!(path = %working_dir.display(), error = %e, "failed to delete working directory");
      return;
    }
    debug!(path = %working_dir.display(), "released working directory");

    let mut current = working_dir.parent();
    while let Some(dir) = current {
      if !dir.starts_with(&self.root) || !is_empty_dir(dir) {
        break;
      }
      if let Err(e) = fs::remove_dir(dir) {
        debug!(path = %dir.display(), error = %e, "failed to prune scratch directory");
        break;
      }
      debug!(path = %dir.display(), "pruned empty scratch directory");
      if dir == self.root {
        break;
      }
      current = dir.parent();
    }
  }

  /// Delete the directories of processes that no longer exist.
  ///
  /// Only directories named after a process ID are considered, and the
  /// current process's directory is always kept. With `dry_run`, nothing is
  /// deleted and the result lists what would have been.
  pub fn sweep(&self, dry_run: bool) -> SweepResult {
    let mut result = SweepResult::default();

    let entries = match fs::read_dir(&self.root) {
      Ok(entries) => entries,
      Err(e) => {
        if e.kind() != io::ErrorKind::NotFound {
          warn!(path = %self.root.display(), error = %e, "failed to read scratch root");
        }
        return result;
      }
    };

    let own_pid = current_pid();

    for entry in entries.flatten() {
      let path = entry.path();
      if !path.is_dir() {
        continue;
      }

      let Some(pid) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.parse::<u32>().ok())
      else {
        continue;
      };

      result.stats.scanned += 1;

      if pid == own_pid || self.probe.is_alive(pid) {
        result.stats.live += 1;
        continue;
      }

      let size = dir_size(&path);
      debug!(pid, path = %path.display(), "removing scratch directory of exited process");

      if dry_run {
        result.stats.deleted += 1;
        result.stats.bytes_freed += size;
        result.deleted_paths.push(path);
        continue;
      }

      match fs::remove_dir_all(&path) {
        Ok(()) => {
          result.stats.deleted += 1;
          result.stats.bytes_freed += size;
          result.deleted_paths.push(path);
        }
        Err(e) => {
          warn!(path = %path.display(), error = %e, "failed to delete stale scratch directory");
        }
      }
    }

    info!(
      scanned = result.stats.scanned,
      deleted = result.stats.deleted,
      bytes_freed = result.stats.bytes_freed,
      dry_run,
      "scratch sweep complete"
    );

    result
  }
}

fn is_empty_dir(path: &Path) -> bool {
  fs::read_dir(path).map(|mut e| e.next().is_none()).unwrap_or(false)
}

fn dir_size(path: &Path) -> u64 {
  WalkDir::new(path)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .filter_map(|e| e.metadata().ok())
    .map(|m| m.len())
    .sum()
}
