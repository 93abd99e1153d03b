use std::path::PathBuf;

use crate::mapping::TypeMapping;
use crate::project::{GraphicsProfile, ProjectSettings, TargetPlatform};

/// Configuration for a [`ContentSession`](super::ContentSession).
#[derive(Debug, Clone)]
pub struct SessionOptions {
  /// Extra importer/processor assemblies. Relative paths are resolved against
  /// the executable's directory; strong assembly names are used as given.
  pub user_assemblies: Vec<String>,
  /// Mappings consulted before the built-in table.
  pub type_mappings: Vec<TypeMapping>,
  /// Root every content name is computed against. When unset, the nearest
  /// directory holding a `.contentproj` file is used for each file.
  pub content_root: Option<PathBuf>,
  /// Working directory to build in instead of a scratch directory.
  pub build_dir: Option<PathBuf>,
  /// Drop the file extension from content names (`foo.png` builds `foo.xnb`).
  pub strip_extensions: bool,
  pub use_default_mappings: bool,
  /// Treat files without a mapping as an error instead of skipping them.
  pub fail_on_unmapped: bool,
  pub settings: ProjectSettings,
}

impl Default for SessionOptions {
  fn default() -> Self {
    Self {
      user_assemblies: Vec::new(),
      type_mappings: Vec::new(),
      content_root: None,
      build_dir: None,
      strip_extensions: true,
      use_default_mappings: true,
      fail_on_unmapped: false,
      settings: ProjectSettings::default(),
    }
  }
}

impl SessionOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_user_assemblies<I, S>(mut self, assemblies: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.user_assemblies = assemblies.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_type_mappings(mut self, mappings: Vec<TypeMapping>) -> Self {
    self.type_mappings = mappings;
    self
  }

  pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.content_root = Some(root.into());
    self
  }

  pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.build_dir = Some(dir.into());
    self
  }

  pub fn with_strip_extensions(mut self, strip: bool) -> Self {
    self.strip_extensions = strip;
    self
  }

  pub fn with_default_mappings(mut self, enabled: bool) -> Self {
    self.use_default_mappings = enabled;
    self
  }

  pub fn with_fail_on_unmapped(mut self, fail: bool) -> Self {
    self.fail_on_unmapped = fail;
    self
  }

  pub fn with_platform(mut self, platform: TargetPlatform) -> Self {
    self.settings.platform = platform;
    self
  }

  pub fn with_profile(mut self, profile: GraphicsProfile) -> Self {
    self.settings.profile = profile;
    self
  }

  pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
    self.settings.configuration = configuration.into();
    self
  }
}
