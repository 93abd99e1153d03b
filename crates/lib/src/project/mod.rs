//! The generated build description.
//!
//! A [`ContentProject`] is the in-memory form of the MSBuild content project
//! handed to the engine: the global properties, the tool assembly references,
//! and one `Compile` item per queued content file. [`ContentProject::write`]
//! serializes it to disk.

mod settings;
mod xml;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::content::QueuedContentFile;

pub use settings::{GraphicsProfile, ProjectSettings, SettingsError, TargetPlatform};

/// Targets file that drives the content pipeline build.
pub const PIPELINE_TARGETS: &str =
  r"$(MSBuildExtensionsPath)\Microsoft\XNA Game Studio\v4.0\Microsoft.Xna.GameStudio.ContentPipeline.targets";

/// Framework version every generated project targets.
pub const FRAMEWORK_VERSION: &str = "v4.0";

const PIPELINE_VERSION: &str = ", Version=4.0.0.0, PublicKeyToken=842cf8be1de50553";

/// Built-in importer/processor assemblies referenced by every project.
pub const PIPELINE_ASSEMBLIES: &[&str] = &[
  "Microsoft.Xna.Framework.Content.Pipeline.FBXImporter",
  "Microsoft.Xna.Framework.Content.Pipeline.XImporter",
  "Microsoft.Xna.Framework.Content.Pipeline.TextureImporter",
  "Microsoft.Xna.Framework.Content.Pipeline.EffectImporter",
  "Microsoft.Xna.Framework.Content.Pipeline.AudioImporters",
  "Microsoft.Xna.Framework.Content.Pipeline.VideoImporters",
];

/// A single `Compile` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
  pub include: PathBuf,
  pub link: String,
  pub name: String,
  pub importer: Option<String>,
  pub processor: Option<String>,
}

impl From<&QueuedContentFile> for ContentItem {
  fn from(file: &QueuedContentFile) -> Self {
    Self {
      include: file.path.clone(),
      link: file.display_name(),
      name: file.content_name.clone(),
      importer: file.importer.clone(),
      processor: file.processor.clone(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentProject {
  pub path: PathBuf,
  pub imports: Vec<String>,
  pub properties: Vec<(String, String)>,
  pub references: Vec<String>,
  pub items: Vec<ContentItem>,
}

impl ContentProject {
  /// Create a project with the standard imports, properties, and pipeline references.
  ///
  /// `user_references` are appended after the built-in pipeline assemblies.
  pub fn standard(path: &Path, output_path: &Path, settings: &ProjectSettings, user_references: &[String]) -> Self {
    let properties = vec![
      ("XnaPlatform".to_string(), settings.platform.to_string()),
      ("XnaProfile".to_string(), settings.profile.to_string()),
      ("XnaFrameworkVersion".to_string(), FRAMEWORK_VERSION.to_string()),
      ("Configuration".to_string(), settings.configuration.clone()),
      ("OutputPath".to_string(), output_path.to_string_lossy().into_owned()),
    ];

    let references = PIPELINE_ASSEMBLIES
      .iter()
      .map(|name| format!("{}{}", name, PIPELINE_VERSION))
      .chain(user_references.iter().cloned())
      .collect();

    Self {
      path: path.to_path_buf(),
      imports: vec![PIPELINE_TARGETS.to_string()],
      properties,
      references,
      items: Vec::new(),
    }
  }

  pub fn add_item(&mut self, file: &QueuedContentFile) -> &ContentItem {
    self.items.push(ContentItem::from(file));
    &self.items[self.items.len() - 1]
  }

  /// Look up a global property by name.
  pub fn property(&self, name: &str) -> Option<&str> {
    self
      .properties
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn to_xml(&self) -> String {
    xml::render(self)
  }

  /// Write the project to [`ContentProject::path`].
  pub fn write(&self) -> io::Result<()> {
    fs::write(&self.path, self.to_xml())
  }
}

/// Resolve a caller-supplied assembly reference.
///
/// Strong assembly names (`Name, Version=...`) and absolute paths are used as
/// given; other paths are resolved against `base`.
pub fn resolve_reference(reference: &str, base: Option<&Path>) -> String {
  if reference.contains(',') {
    return reference.to_string();
  }

  let path = Path::new(reference);
  match base {
    Some(base) if !path.is_absolute() => base.join(path).to_string_lossy().into_owned(),
    _ => reference.to_string(),
  }
}
