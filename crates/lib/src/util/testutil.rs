//! Test utilities for xnacontent-lib.
//!
//! Provides an in-process stand-in for the external build engine and helpers
//! for laying out content directories on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::engine::{BuildEngine, BuildError, BuildRequest, BuildResult, ErrorLog, Submission};
use crate::project::ContentProject;

#[derive(Debug, Clone)]
pub enum FakeOutcome {
  /// Write `<content name>.xnb` for every item and report success.
  Succeed,
  /// Report each message to the error log and report failure.
  Fail(Vec<String>),
  /// Refuse the submission outright.
  Reject(String),
  /// Report each message to the error log, then fail with an engine error.
  Abort { messages: Vec<String>, error: String },
}

/// Engine that completes builds from a background thread without running
/// any external tools.
#[derive(Debug, Clone)]
pub struct FakeEngine {
  outcome: FakeOutcome,
  submitted: Arc<Mutex<Vec<(BuildRequest, String)>>>,
}

impl FakeEngine {
  pub fn new(outcome: FakeOutcome) -> Self {
    Self {
      outcome,
      submitted: Arc::new(Mutex::new(Vec::new())),
    }
  }

  pub fn succeeding() -> Self {
    Self::new(FakeOutcome::Succeed)
  }

  /// Requests seen so far, with the project file contents at submission time.
  pub fn submitted(&self) -> Vec<(BuildRequest, String)> {
    self.submitted.lock().unwrap().clone()
  }
}

impl BuildEngine for FakeEngine {
  fn submit(&self, project: &ContentProject, request: &BuildRequest, log: ErrorLog) -> Result<Submission, BuildError> {
    let xml = fs::read_to_string(&request.project_path).unwrap_or_default();
    self.submitted.lock().unwrap().push((request.clone(), xml));

    if let FakeOutcome::Reject(message) = &self.outcome {
      return Err(BuildError::Engine(message.clone()));
    }

    let (completion, submission) = Submission::channel();
    let outcome = self.outcome.clone();
    let output_dir = request.output_dir.clone();
    let names: Vec<String> = project.items.iter().map(|item| item.name.clone()).collect();

    std::thread::spawn(move || {
      let result = match outcome {
        FakeOutcome::Succeed => write_outputs(&output_dir, &names).map(|()| BuildResult::success()),
        FakeOutcome::Fail(messages) => {
          for message in messages {
            log.error(message);
          }
          Ok(BuildResult::failure().with_exit_code(Some(1)))
        }
        FakeOutcome::Abort { messages, error } => {
          for message in messages {
            log.error(message);
          }
          Err(BuildError::Engine(error))
        }
        FakeOutcome::Reject(_) => unreachable!(),
      };
      completion.complete(result);
    });

    Ok(submission)
  }
}

fn write_outputs(output_dir: &Path, names: &[String]) -> Result<(), BuildError> {
  for name in names {
    let target = output_dir.join(format!("{}.xnb", name));
    let parent = target.parent().unwrap_or(output_dir);
    fs::create_dir_all(parent).map_err(|e| BuildError::Engine(e.to_string()))?;
    fs::write(&target, b"XNBw").map_err(|e| BuildError::Engine(e.to_string()))?;
  }
  Ok(())
}

/// Write a file (creating parent directories) and return its path.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
  path
}

/// Create `<root>/Content/Content.contentproj` and return the content directory.
pub fn content_project(root: &Path) -> PathBuf {
  let content = root.join("Content");
  write_file(&content, "Content.contentproj", "<Project />");
  content
}
