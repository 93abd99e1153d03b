//! Content build sessions.
//!
//! A [`ContentSession`] queues content files, writes them into a content
//! project inside its working directory, and hands that project to a
//! [`BuildEngine`]. The working directory is reserved from the
//! [`ScratchSpace`] when the session is created and only deleted by an
//! explicit [`ContentSession::dispose`]: dropping a session leaves its output
//! on disk so it can be inspected, and a later sweep reclaims it once the
//! process has exited.

mod events;
mod options;
mod types;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::consts::{BIN_DIR, CONTENT_DIR, PROJECT_FILENAME};
use crate::content::{QueuedContentFile, content_name, find_content_project_dir, normalize_path};
use crate::engine::{BuildEngine, BuildError, BuildRequest, BuildResult, ErrorLog};
use crate::mapping::{default_mappings, resolve};
use crate::platform::paths::exe_dir;
use crate::project::{ContentProject, resolve_reference};
use crate::scratch::ScratchSpace;

use events::Observers;

pub use events::SessionEvent;
pub use options::SessionOptions;
pub use types::SessionError;

pub struct ContentSession {
  options: SessionOptions,
  engine: Box<dyn BuildEngine>,
  scratch: ScratchSpace,
  working_dir: PathBuf,
  /// Whether the working directory came from the scratch space (and is ours to delete).
  owns_working_dir: bool,
  content_root: Option<PathBuf>,
  references: Vec<String>,
  files: BTreeMap<PathBuf, QueuedContentFile>,
  observers: Observers,
  disposed: bool,
}

impl ContentSession {
  /// Create a session using the default scratch space.
  pub fn new(options: SessionOptions, engine: Box<dyn BuildEngine>) -> Result<Self, SessionError> {
    Self::with_scratch(options, engine, ScratchSpace::default_space())
  }

  /// Create a session whose working directory is reserved from `scratch`.
  pub fn with_scratch(
    options: SessionOptions,
    engine: Box<dyn BuildEngine>,
    scratch: ScratchSpace,
  ) -> Result<Self, SessionError> {
    let content_root = options
      .content_root
      .as_deref()
      .map(|root| normalize_path(root).map_err(|source| SessionError::Io { path: root.to_path_buf(), source }))
      .transpose()?;

    let (working_dir, owns_working_dir) = match &options.build_dir {
      Some(dir) => {
        let dir = normalize_path(dir).map_err(|source| SessionError::Io { path: dir.clone(), source })?;
        (dir, false)
      }
      None => (scratch.allocate(), true),
    };

    let base = exe_dir();
    let references = options
      .user_assemblies
      .iter()
      .map(|reference| resolve_reference(reference, base.as_deref()))
      .collect();

    debug!(working_dir = %working_dir.display(), "created content session");

    Ok(Self {
      options,
      engine,
      scratch,
      working_dir,
      owns_working_dir,
      content_root,
      references,
      files: BTreeMap::new(),
      observers: Observers::default(),
      disposed: false,
    })
  }

  /// Register an observer for session events.
  pub fn subscribe<F>(&mut self, observer: F)
  where
    F: FnMut(&SessionEvent<'_>) + Send + 'static,
  {
    self.observers.subscribe(observer);
  }

  pub fn working_dir(&self) -> &Path {
    &self.working_dir
  }

  /// Directory the compiled content is written to.
  pub fn output_dir(&self) -> PathBuf {
    self.working_dir.join(BIN_DIR).join(CONTENT_DIR)
  }

  pub fn is_disposed(&self) -> bool {
    self.disposed
  }

  /// Queued entries, ordered by source path.
  pub fn files(&self) -> impl Iterator<Item = &QueuedContentFile> {
    self.files.values()
  }

  pub fn filenames(&self) -> impl Iterator<Item = &Path> {
    self.files.keys().map(PathBuf::as_path)
  }

  pub fn get(&self, filename: impl AsRef<Path>) -> Option<&QueuedContentFile> {
    let path = normalize_path(filename.as_ref()).ok()?;
    self.files.get(&path)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Queue a file using the first mapping that matches its name.
  ///
  /// Returns `Ok(None)` when no mapping matches and unmapped files are
  /// allowed.
  pub fn add(&mut self, filename: impl AsRef<Path>) -> Result<Option<&QueuedContentFile>, SessionError> {
    self.ensure_live()?;
    let filename = filename.as_ref();
    let name = filename.to_string_lossy();

    let mapping = resolve(
      &name,
      &self.options.type_mappings,
      default_mappings(),
      self.options.use_default_mappings,
    );

    let Some(mapping) = mapping else {
      if self.options.fail_on_unmapped {
        return Err(SessionError::UnmappedFile {
          path: filename.to_path_buf(),
        });
      }
      debug!(path = %filename.display(), "no type mapping, skipping");
      return Ok(None);
    };

    let importer = mapping.importer().map(str::to_string);
    let processor = mapping.processor().map(str::to_string);

    self
      .add_with(filename, importer.as_deref(), processor.as_deref())
      .map(Some)
  }

  /// Queue a file with an explicit importer and processor.
  pub fn add_with(
    &mut self,
    filename: impl AsRef<Path>,
    importer: Option<&str>,
    processor: Option<&str>,
  ) -> Result<&QueuedContentFile, SessionError> {
    self.ensure_live()?;
    let filename = filename.as_ref();

    let path = normalize_path(filename).map_err(|source| SessionError::Io {
      path: filename.to_path_buf(),
      source,
    })?;

    if !path.is_file() {
      return Err(SessionError::FileNotFound { path });
    }

    let content_name = self.content_name_for(&path)?;

    let entry: &QueuedContentFile = match self.files.entry(path) {
      Entry::Occupied(occupied) => {
        return Err(SessionError::DuplicateEntry {
          path: occupied.key().clone(),
        });
      }
      Entry::Vacant(vacant) => {
        let file = QueuedContentFile {
          path: vacant.key().clone(),
          content_name,
          importer: importer.map(str::to_string),
          processor: processor.map(str::to_string),
        };
        vacant.insert(file)
      }
    };

    debug!(
      path = %entry.path.display(),
      content_name = %entry.content_name,
      importer = ?entry.importer,
      processor = ?entry.processor,
      "queued content file"
    );

    self.observers.emit(&SessionEvent::ItemAdded(entry));
    Ok(entry)
  }

  /// Remove a queued file. Returns whether it was queued.
  pub fn remove(&mut self, filename: impl AsRef<Path>) -> bool {
    let Ok(path) = normalize_path(filename.as_ref()) else {
      return false;
    };

    match self.files.remove(&path) {
      Some(file) => {
        debug!(path = %file.path.display(), "removed content file");
        self.observers.emit(&SessionEvent::ItemRemoved(&file));
        true
      }
      None => false,
    }
  }

  /// Remove every queued file, notifying observers for each one.
  pub fn clear(&mut self) {
    let files = std::mem::take(&mut self.files);
    for file in files.values() {
      self.observers.emit(&SessionEvent::ItemRemoved(file));
    }
  }

  /// Build every queued file and block until the engine finishes.
  ///
  /// Returns `true` only if the engine reported success. Failures are never
  /// returned as errors; they are reported through
  /// [`SessionEvent::BuildErrored`]. After the engine completes, stale
  /// scratch directories of exited processes are swept.
  ///
  /// The calling thread blocks until the engine finishes, including when it
  /// is an async runtime worker.
  pub fn build(&mut self) -> bool {
    let log = ErrorLog::new();

    let result = match self.run_build(&log) {
      Ok(result) => result,
      Err(error) => {
        let messages = log.messages();
        warn!(error = %error, "content build could not run");
        self.observers.emit(&SessionEvent::BuildErrored {
          result: None,
          messages: &messages,
          error: Some(&error),
        });
        return false;
      }
    };

    if result.is_success() {
      let output_dir = self.output_dir();
      info!(output_dir = %output_dir.display(), "content build succeeded");
      self.observers.emit(&SessionEvent::BuildFinished {
        working_dir: &self.working_dir,
        output_dir: &output_dir,
        result: &result,
      });
    } else {
      let messages = log.messages();
      warn!(errors = messages.len(), exit_code = ?result.exit_code, "content build failed");
      self.observers.emit(&SessionEvent::BuildErrored {
        result: Some(&result),
        messages: &messages,
        error: None,
      });
    }

    self.scratch.sweep(false);

    result.is_success()
  }

  fn run_build(&mut self, log: &ErrorLog) -> Result<BuildResult, BuildError> {
    if self.disposed {
      return Err(BuildError::Disposed);
    }

    fs::create_dir_all(&self.working_dir).map_err(|source| BuildError::CreateDir {
      path: self.working_dir.clone(),
      source,
    })?;

    let project_path = self.working_dir.join(PROJECT_FILENAME);
    let output_path = self.working_dir.join(BIN_DIR);

    let mut project = ContentProject::standard(&project_path, &output_path, &self.options.settings, &self.references);
    for file in self.files.values() {
      project.add_item(file);
    }

    if project_path.exists() {
      fs::remove_file(&project_path).map_err(|source| BuildError::RemoveProject {
        path: project_path.clone(),
        source,
      })?;
    }

    project.write().map_err(|source| BuildError::WriteProject {
      path: project_path.clone(),
      source,
    })?;

    let request = BuildRequest {
      project_path,
      working_dir: self.working_dir.clone(),
      output_dir: self.output_dir(),
    };

    self.observers.emit(&SessionEvent::BuildStarting {
      project: &project,
      request: &request,
    });

    let submission = self.engine.submit(&project, &request, log.clone())?;
    submission.wait()
  }

  /// Delete the working directory and sweep stale scratch directories.
  ///
  /// A caller-supplied build directory is left in place. Calling this more
  /// than once has no further effect.
  pub fn dispose(&mut self) {
    if self.disposed {
      return;
    }
    self.disposed = true;

    if self.owns_working_dir {
      self.scratch.release(&self.working_dir);
    } else {
      debug!(path = %self.working_dir.display(), "leaving caller-provided build directory in place");
    }

    self.scratch.sweep(false);
  }

  fn ensure_live(&self) -> Result<(), SessionError> {
    if self.disposed {
      return Err(SessionError::Disposed);
    }
    Ok(())
  }

  fn content_name_for(&self, path: &Path) -> Result<String, SessionError> {
    let root = match &self.content_root {
      Some(root) => root.clone(),
      None => find_content_project_dir(path).ok_or_else(|| SessionError::ProjectNotFound {
        path: path.to_path_buf(),
      })?,
    };

    let relative = match path.strip_prefix(&root) {
      Ok(relative) if relative.as_os_str().is_empty() => None,
      Ok(relative) => Some(relative),
      Err(_) => None,
    };

    let Some(relative) = relative else {
      return Err(SessionError::OutsideContentRoot {
        path: path.to_path_buf(),
        root,
      });
    };

    Ok(content_name(relative, self.options.strip_extensions))
  }
}

impl std::fmt::Debug for ContentSession {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ContentSession")
      .field("working_dir", &self.working_dir)
      .field("files", &self.files.len())
      .field("observers", &self.observers)
      .field("disposed", &self.disposed)
      .finish_non_exhaustive()
  }
}
