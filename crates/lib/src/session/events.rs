//! Session notifications.
//!
//! Observers are called synchronously, in registration order, on the thread
//! that triggered the event. A panicking observer is not isolated: the panic
//! propagates out of the session call that emitted the event.

use std::path::Path;

use crate::content::QueuedContentFile;
use crate::engine::{BuildError, BuildRequest, BuildResult};
use crate::project::ContentProject;

#[derive(Debug)]
pub enum SessionEvent<'a> {
  ItemAdded(&'a QueuedContentFile),
  ItemRemoved(&'a QueuedContentFile),
  /// The project has been written and is about to be submitted.
  BuildStarting {
    project: &'a ContentProject,
    request: &'a BuildRequest,
  },
  BuildFinished {
    working_dir: &'a Path,
    output_dir: &'a Path,
    result: &'a BuildResult,
  },
  /// The engine reported failure (`result` set, `error` empty) or the build
  /// could not be run (`error` set).
  BuildErrored {
    result: Option<&'a BuildResult>,
    messages: &'a [String],
    error: Option<&'a BuildError>,
  },
}

type Observer = Box<dyn FnMut(&SessionEvent<'_>) + Send>;

#[derive(Default)]
pub(crate) struct Observers {
  observers: Vec<Observer>,
}

impl Observers {
  pub(crate) fn subscribe<F>(&mut self, observer: F)
  where
    F: FnMut(&SessionEvent<'_>) + Send + 'static,
  {
    self.observers.push(Box::new(observer));
  }

  pub(crate) fn emit(&mut self, event: &SessionEvent<'_>) {
    for observer in &mut self.observers {
      observer(event);
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.observers.len()
  }
}

impl std::fmt::Debug for Observers {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Observers").field("count", &self.len()).finish()
  }
}
