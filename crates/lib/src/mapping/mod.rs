//! File-to-tool mapping resolution.
//!
//! A [`TypeMapping`] associates a filename pattern with the importer and
//! processor the content pipeline should use for matching files. Mappings are
//! plain ordered data: resolution scans the caller's mappings first and only
//! falls back to the built-in table when none of them match.

mod defaults;

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

pub use defaults::default_mappings;

#[derive(Debug, Error)]
pub enum MappingError {
  #[error("invalid filename pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("invalid mapping '{0}': expected PATTERN=IMPORTER:PROCESSOR")]
  InvalidSpec(String),
}

/// A filename pattern with the importer/processor pair it selects.
///
/// The pattern must match the whole filename. Either tool may be absent, in
/// which case the engine picks its own default for that slot.
#[derive(Debug, Clone)]
pub struct TypeMapping {
  pattern: String,
  matcher: Regex,
  importer: Option<String>,
  processor: Option<String>,
}

impl TypeMapping {
  /// Create a mapping selecting both an importer and a processor.
  pub fn new(pattern: &str, importer: &str, processor: &str) -> Result<Self, MappingError> {
    Self::with_tools(pattern, Some(importer), Some(processor))
  }

  /// Create a mapping where either tool may be left to the engine's default.
  pub fn with_tools(pattern: &str, importer: Option<&str>, processor: Option<&str>) -> Result<Self, MappingError> {
    let matcher = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| MappingError::InvalidPattern {
      pattern: pattern.to_string(),
      source,
    })?;

    Ok(Self {
      pattern: pattern.to_string(),
      matcher,
      importer: importer.filter(|s| !s.is_empty()).map(str::to_string),
      processor: processor.filter(|s| !s.is_empty()).map(str::to_string),
    })
  }

  /// The pattern as written, without the implicit anchors.
  pub fn pattern(&self) -> &str {
    &self.pattern
  }

  pub fn importer(&self) -> Option<&str> {
    self.importer.as_deref()
  }

  pub fn processor(&self) -> Option<&str> {
    self.processor.as_deref()
  }

  /// Whether the pattern matches the entire filename.
  pub fn is_match(&self, filename: &str) -> bool {
    self.matcher.is_match(filename)
  }
}

impl fmt::Display for TypeMapping {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}={}:{}",
      self.pattern,
      self.importer.as_deref().unwrap_or(""),
      self.processor.as_deref().unwrap_or("")
    )
  }
}

/// Parses `PATTERN=IMPORTER:PROCESSOR`.
///
/// The split happens at the last `=`, so patterns may contain `=` themselves.
/// An empty importer or processor leaves that slot to the engine.
impl FromStr for TypeMapping {
  type Err = MappingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (pattern, tools) = s.rsplit_once('=').ok_or_else(|| MappingError::InvalidSpec(s.to_string()))?;
    let (importer, processor) = tools
      .split_once(':')
      .ok_or_else(|| MappingError::InvalidSpec(s.to_string()))?;

    if pattern.is_empty() {
      return Err(MappingError::InvalidSpec(s.to_string()));
    }

    Self::with_tools(pattern, Some(importer.trim()), Some(processor.trim()))
  }
}

/// Find the mapping for `filename`.
///
/// Returns the first of `user` that matches; if none does and `use_defaults`
/// is set, the first of `defaults` that matches.
pub fn resolve<'a>(
  filename: &str,
  user: &'a [TypeMapping],
  defaults: &'a [TypeMapping],
  use_defaults: bool,
) -> Option<&'a TypeMapping> {
  user
    .iter()
    .find(|m| m.is_match(filename))
    .or_else(|| if use_defaults { defaults.iter().find(|m| m.is_match(filename)) } else { None })
}
