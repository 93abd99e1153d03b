//! Implementation of the `xnac build` command.
//!
//! Queues the given files into a content session, runs the build engine, and
//! reports where the compiled `.xnb` files were written.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use xnacontent_lib::{
  ContentSession, GraphicsProfile, MsBuildEngine, QueuedContentFile, SessionEvent, SessionOptions, TargetPlatform,
  TypeMapping,
};

use crate::output::{
  OutputFormat, format_duration, print_error, print_json, print_queued, print_stat, print_success, print_warning,
};

pub struct BuildArgs {
  pub files: Vec<PathBuf>,
  pub content_root: Option<PathBuf>,
  pub build_dir: Option<PathBuf>,
  pub keep_extensions: bool,
  pub no_default_mappings: bool,
  pub fail_on_unmapped: bool,
  pub mappings: Vec<TypeMapping>,
  pub references: Vec<String>,
  pub platform: TargetPlatform,
  pub profile: GraphicsProfile,
  pub configuration: String,
  pub engine: String,
  pub engine_args: Vec<String>,
  pub dispose: bool,
  pub output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct BuildReport {
  success: bool,
  working_dir: PathBuf,
  output_dir: PathBuf,
  files: Vec<QueuedContentFile>,
  skipped: Vec<PathBuf>,
  errors: Vec<String>,
}

impl BuildArgs {
  fn session_options(&self) -> SessionOptions {
    let mut options = SessionOptions::new()
      .with_user_assemblies(self.references.iter().cloned())
      .with_type_mappings(self.mappings.clone())
      .with_strip_extensions(!self.keep_extensions)
      .with_default_mappings(!self.no_default_mappings)
      .with_fail_on_unmapped(self.fail_on_unmapped)
      .with_platform(self.platform)
      .with_profile(self.profile)
      .with_configuration(self.configuration.clone());

    if let Some(root) = &self.content_root {
      options = options.with_content_root(root);
    }
    if let Some(dir) = &self.build_dir {
      options = options.with_build_dir(dir);
    }
    options
  }
}

/// Execute the build command.
///
/// Returns a failing exit code when the engine reports failure. Errors
/// queueing a file abort before anything is built.
pub fn cmd_build(args: BuildArgs) -> Result<ExitCode> {
  let start = Instant::now();
  let json = args.output.is_json();

  let engine = MsBuildEngine::new(&args.engine)
    .context("Failed to start build engine")?
    .with_args(args.engine_args.iter().cloned());
  debug!(engine = engine.program(), args = ?args.engine_args, "using build engine");
  let mut session =
    ContentSession::new(args.session_options(), Box::new(engine)).context("Failed to create content session")?;

  let errors = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&errors);
  session.subscribe(move |event| match event {
    SessionEvent::BuildStarting { project, .. } => {
      debug!(
        items = project.items.len(),
        platform = ?project.property("XnaPlatform"),
        profile = ?project.property("XnaProfile"),
        "submitting content project"
      );
    }
    SessionEvent::BuildErrored { messages, error, .. } => {
      if let Ok(mut errors) = sink.lock() {
        errors.extend(messages.iter().cloned());
        if let Some(error) = error {
          errors.push(error.to_string());
        }
      }
    }
    _ => {}
  });

  let mut skipped = Vec::new();
  for file in &args.files {
    let queued = session
      .add(file)
      .with_context(|| format!("Failed to queue {}", file.display()))?;
    match queued {
      Some(queued) if !json => print_queued(&queued.display_name(), &queued.content_name),
      Some(_) => {}
      None => {
        if !json {
          print_warning(&format!("No type mapping for {}, skipping", file.display()));
        }
        skipped.push(file.clone());
      }
    }
  }

  let success = session.build();

  let report = BuildReport {
    success,
    working_dir: session.working_dir().to_path_buf(),
    output_dir: session.output_dir(),
    files: session.files().cloned().collect(),
    skipped,
    errors: errors.lock().map(|e| e.clone()).unwrap_or_default(),
  };

  if args.dispose {
    session.dispose();
  }

  if json {
    print_json(&report)?;
  } else {
    println!();
    if success {
      print_success("Build complete!");
    } else {
      for error in &report.errors {
        print_error(error);
      }
      print_error("Build failed");
    }
    print_stat("Files built", &report.files.len().to_string());
    if !report.skipped.is_empty() {
      print_stat("Files skipped", &report.skipped.len().to_string());
    }
    if !args.dispose {
      print_stat("Output", &report.output_dir.display().to_string());
    }
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
