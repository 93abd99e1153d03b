use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::consts::CONTENT_PROJECT_EXTENSION;

/// Turn `path` into an absolute path with symlinks resolved where possible.
///
/// Files that no longer exist are resolved through their parent directory so
/// that the result still matches the key recorded when the file was queued.
pub fn normalize_path(path: &Path) -> io::Result<PathBuf> {
  let absolute = lexical_normalize(&std::path::absolute(path)?);

  if let Ok(canonical) = dunce::canonicalize(&absolute) {
    return Ok(canonical);
  }

  match (absolute.parent(), absolute.file_name()) {
    (Some(parent), Some(name)) => match dunce::canonicalize(parent) {
      Ok(parent) => Ok(parent.join(name)),
      Err(_) => Ok(absolute),
    },
    _ => Ok(absolute),
  }
}

fn lexical_normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}

/// Walk upward from the file's directory to the nearest directory holding a
/// `*.contentproj` file.
pub fn find_content_project_dir(file: &Path) -> Option<PathBuf> {
  file
    .ancestors()
    .skip(1)
    .find(|dir| contains_content_project(dir))
    .map(Path::to_path_buf)
}

fn contains_content_project(dir: &Path) -> bool {
  let Ok(entries) = fs::read_dir(dir) else {
    return false;
  };

  entries.flatten().any(|entry| {
    let path = entry.path();
    path.is_file() && path.extension().is_some_and(|ext| ext == CONTENT_PROJECT_EXTENSION)
  })
}

/// Build the `/`-separated content name for a path relative to the content root.
pub fn content_name(relative: &Path, strip_extension: bool) -> String {
  let stripped;
  let relative = match (strip_extension, relative.parent(), relative.file_stem()) {
    (true, Some(parent), Some(stem)) => {
      stripped = parent.join(stem);
      stripped.as_path()
    }
    _ => relative,
  };

  relative
    .components()
    .filter_map(|c| match c {
      Component::Normal(part) => Some(part.to_string_lossy()),
      _ => None,
    })
    .collect::<Vec<_>>()
    .join("/")
}
