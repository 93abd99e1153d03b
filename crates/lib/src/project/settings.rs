use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("unknown target platform '{0}' (expected windows, xbox360 or windowsphone)")]
  UnknownPlatform(String),

  #[error("unknown graphics profile '{0}' (expected reach or hidef)")]
  UnknownProfile(String),
}

/// Platform the compiled content targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TargetPlatform {
  #[default]
  Windows,
  Xbox360,
  WindowsPhone,
}

impl TargetPlatform {
  /// Value of the `XnaPlatform` property.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "Windows",
      Self::Xbox360 => "Xbox 360",
      Self::WindowsPhone => "Windows Phone",
    }
  }
}

impl fmt::Display for TargetPlatform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TargetPlatform {
  type Err = SettingsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let key: String = s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
    match key.as_str() {
      "windows" => Ok(Self::Windows),
      "xbox360" => Ok(Self::Xbox360),
      "windowsphone" => Ok(Self::WindowsPhone),
      _ => Err(SettingsError::UnknownPlatform(s.to_string())),
    }
  }
}

/// Graphics feature level the content is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GraphicsProfile {
  #[default]
  Reach,
  HiDef,
}

impl GraphicsProfile {
  /// Value of the `XnaProfile` property.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Reach => "Reach",
      Self::HiDef => "HiDef",
    }
  }
}

impl fmt::Display for GraphicsProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for GraphicsProfile {
  type Err = SettingsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "reach" => Ok(Self::Reach),
      "hidef" => Ok(Self::HiDef),
      _ => Err(SettingsError::UnknownProfile(s.to_string())),
    }
  }
}

/// Global properties of a generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSettings {
  pub platform: TargetPlatform,
  pub profile: GraphicsProfile,
  pub configuration: String,
}

impl Default for ProjectSettings {
  fn default() -> Self {
    Self {
      platform: TargetPlatform::default(),
      profile: GraphicsProfile::default(),
      configuration: "Release".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn platform_parsing_ignores_case_and_spaces() {
    assert_eq!("Windows".parse::<TargetPlatform>().unwrap(), TargetPlatform::Windows);
    assert_eq!("Xbox 360".parse::<TargetPlatform>().unwrap(), TargetPlatform::Xbox360);
    assert_eq!("windowsphone".parse::<TargetPlatform>().unwrap(), TargetPlatform::WindowsPhone);
    assert!("playstation".parse::<TargetPlatform>().is_err());
  }

  #[test]
  fn profile_parsing() {
    assert_eq!("HiDef".parse::<GraphicsProfile>().unwrap(), GraphicsProfile::HiDef);
    assert_eq!("reach".parse::<GraphicsProfile>().unwrap(), GraphicsProfile::Reach);
    assert!("ultra".parse::<GraphicsProfile>().is_err());
  }

  #[test]
  fn defaults_match_pipeline_defaults() {
    let settings = ProjectSettings::default();
    assert_eq!(settings.platform.as_str(), "Windows");
    assert_eq!(settings.profile.as_str(), "Reach");
    assert_eq!(settings.configuration, "Release");
  }
}
