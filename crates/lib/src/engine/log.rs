use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// Collects error messages raised by the engine during a build.
///
/// Clones share the same buffer, so the engine can report from its own task
/// while the session reads the messages once the build completes.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
  errors: Arc<Mutex<Vec<String>>>,
}

impl ErrorLog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record an error message.
  pub fn error(&self, message: impl Into<String>) {
    let message = message.into();
    debug!(message = %message, "content build error");
    self.errors.lock().unwrap_or_else(PoisonError::into_inner).push(message);
  }

  /// Snapshot of every message recorded so far, in report order.
  pub fn messages(&self) -> Vec<String> {
    self.errors.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn is_empty(&self) -> bool {
    self.errors.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
  }
}
