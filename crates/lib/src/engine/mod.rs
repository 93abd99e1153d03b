//! The boundary to the external content build engine.
//!
//! A [`BuildEngine`] receives the generated project and starts building it,
//! possibly on its own threads or runtime. It hands back a [`Submission`],
//! which the session blocks on until the engine completes the matching
//! [`Completion`]. Waiting is a plain thread block, so it is safe from inside
//! an async runtime as long as the engine does not need that runtime's
//! thread to make progress. Errors raised during the run are reported through the
//! shared [`ErrorLog`].

mod log;
mod msbuild;
mod types;

use std::sync::mpsc;

use crate::project::ContentProject;

pub use log::ErrorLog;
pub use msbuild::{MsBuildEngine, parse_error_line};
pub use types::{BuildError, BuildRequest, BuildResult, BuildResultCode};

/// An external engine that executes content projects.
pub trait BuildEngine: Send + Sync {
  /// Start building `project`.
  ///
  /// The project file has already been written to `request.project_path`.
  /// Errors encountered by the engine should be recorded in `log`.
  fn submit(&self, project: &ContentProject, request: &BuildRequest, log: ErrorLog) -> Result<Submission, BuildError>;
}

/// Pending result of a submitted build.
#[derive(Debug)]
pub struct Submission {
  receiver: mpsc::Receiver<Result<BuildResult, BuildError>>,
}

/// The engine's half of a [`Submission`].
#[derive(Debug)]
pub struct Completion {
  sender: mpsc::SyncSender<Result<BuildResult, BuildError>>,
}

impl Submission {
  /// Create a linked completion/submission pair.
  pub fn channel() -> (Completion, Submission) {
    let (sender, receiver) = mpsc::sync_channel(1);
    (Completion { sender }, Submission { receiver })
  }

  /// A submission that has already finished, for engines that run synchronously.
  pub fn ready(result: Result<BuildResult, BuildError>) -> Self {
    let (completion, submission) = Self::channel();
    completion.complete(result);
    submission
  }

  /// Block the current thread until the engine reports completion.
  pub fn wait(self) -> Result<BuildResult, BuildError> {
    self.receiver.recv().map_err(|_| BuildError::Disconnected)?
  }
}

impl Completion {
  /// Report the outcome of the build. Never blocks: the channel holds the one result.
  pub fn complete(self, result: Result<BuildResult, BuildError>) {
    // The receiver is gone only if the waiting session was torn down.
    let _ = self.sender.send(result);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ready_submission_returns_result() {
    let result = Submission::ready(Ok(BuildResult::success())).wait().unwrap();
    assert!(result.is_success());
  }

  #[test]
  fn wait_blocks_until_completed_from_another_thread() {
    let (completion, submission) = Submission::channel();

    let handle = std::thread::spawn(move || {
      std::thread::sleep(std::time::Duration::from_millis(20));
      completion.complete(Ok(BuildResult::failure().with_exit_code(Some(1))));
    });

    let result = submission.wait().unwrap();
    handle.join().unwrap();

    assert!(!result.is_success());
    assert_eq!(result.exit_code, Some(1));
  }

  #[test]
  fn dropped_completion_is_disconnected() {
    let (completion, submission) = Submission::channel();
    drop(completion);

    assert!(matches!(submission.wait(), Err(BuildError::Disconnected)));
  }

  #[test]
  fn engine_errors_pass_through() {
    let submission = Submission::ready(Err(BuildError::Engine("boom".to_string())));
    assert!(matches!(submission.wait(), Err(BuildError::Engine(msg)) if msg == "boom"));
  }

  #[tokio::test]
  async fn wait_inside_current_thread_runtime() {
    let (completion, submission) = Submission::channel();
    std::thread::spawn(move || completion.complete(Ok(BuildResult::success())));

    assert!(submission.wait().unwrap().is_success());
  }
}
