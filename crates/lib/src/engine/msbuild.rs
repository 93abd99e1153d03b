//! Engine adapter that runs an MSBuild-compatible executable.
//!
//! The executable is invoked as `<program> [args..] <project path>` from the
//! working directory. Error lines in MSBuild's canonical format
//! (`origin: error CODE: message`) are collected into the [`ErrorLog`], and
//! a zero exit status is reported as success.

use std::collections::HashSet;
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::{BuildEngine, BuildError, BuildRequest, BuildResult, Completion, ErrorLog, Submission};
use crate::project::ContentProject;

static ERROR_LINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)(?:^|:)\s*(?:[a-z][\w-]*\s+)?error(?:\s+[a-z]+\d+)?\s*:\s*(?P<message>.*\S)\s*$")
    .expect("error line pattern is valid")
});

/// Extract the message from an MSBuild canonical error line.
pub fn parse_error_line(line: &str) -> Option<&str> {
  ERROR_LINE
    .captures(line)
    .and_then(|caps| caps.name("message"))
    .map(|m| m.as_str())
}

pub struct MsBuildEngine {
  /// Only `None` while dropping.
  runtime: Option<Runtime>,
  program: String,
  args: Vec<String>,
}

impl MsBuildEngine {
  /// Create an engine running `program`, with its own runtime for the child process.
  pub fn new(program: impl Into<String>) -> Result<Self, BuildError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
      .worker_threads(1)
      .enable_all()
      .build()
      .map_err(BuildError::Runtime)?;

    Ok(Self {
      runtime: Some(runtime),
      program: program.into(),
      args: Vec::new(),
    })
  }

  /// Arguments passed before the project path.
  pub fn with_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args = args.into_iter().map(Into::into).collect();
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }
}

// Dropping a `Runtime` from async code panics; shut it down without blocking.
impl Drop for MsBuildEngine {
  fn drop(&mut self) {
    if let Some(runtime) = self.runtime.take() {
      runtime.shutdown_background();
    }
  }
}

impl std::fmt::Debug for MsBuildEngine {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MsBuildEngine")
      .field("program", &self.program)
      .field("args", &self.args)
      .finish()
  }
}

impl BuildEngine for MsBuildEngine {
  fn submit(&self, project: &ContentProject, request: &BuildRequest, log: ErrorLog) -> Result<Submission, BuildError> {
    let mut command = Command::new(&self.program);
    command
      .args(&self.args)
      .arg(&request.project_path)
      .current_dir(&request.working_dir)
      .stdin(Stdio::null())
      .kill_on_drop(true);

    info!(
      program = %self.program,
      project = %request.project_path.display(),
      items = project.items.len(),
      "starting content build"
    );

    let Some(runtime) = &self.runtime else {
      return Err(BuildError::Engine("engine runtime has shut down".to_string()));
    };

    let (completion, submission) = Submission::channel();
    let program = self.program.clone();
    runtime.spawn(run(command, program, log, completion));

    Ok(submission)
  }
}

async fn run(mut command: Command, program: String, log: ErrorLog, completion: Completion) {
  let output = match command.output().await {
    Ok(output) => output,
    Err(source) => {
      completion.complete(Err(BuildError::Spawn { program, source }));
      return;
    }
  };

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);

  // MSBuild repeats every error in its closing summary.
  let mut seen = HashSet::new();
  for line in stdout.lines().chain(stderr.lines()) {
    if let Some(message) = parse_error_line(line)
      && seen.insert(line.trim().to_string())
    {
      log.error(message);
    }
  }

  if !stdout.is_empty() {
    debug!(stdout = %stdout, "engine stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr, "engine stderr");
  }

  let result = if output.status.success() {
    BuildResult::success()
  } else {
    BuildResult::failure()
  };

  completion.complete(Ok(result.with_exit_code(output.status.code())));
}
