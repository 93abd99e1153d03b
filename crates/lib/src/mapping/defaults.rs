//! Built-in mappings for the standard content pipeline importers and processors.

use std::sync::LazyLock;

use super::TypeMapping;

const DEFAULT_TABLE: &[(&str, &str, &str)] = &[
  (r".*\.fbx$", "FbxImporter", "ModelProcessor"),
  (r".*\.x$", "XImporter", "ModelProcessor"),
  (r".*\.fx$", "EffectImporter", "PassThroughProcessor"),
  (r".*\.spritefont$", "FontDescriptionImporter", "FontDescriptionProcessor"),
  (
    r".*\.(bmp|dds|dib|hdr|jpg|jpeg|pfm|png|ppm|tga)$",
    "TextureImporter",
    "TextureProcessor",
  ),
  (r".*\.wav$", "WavImporter", "SoundEffectProcessor"),
  (r".*\.mp3$", "Mp3Importer", "SoundEffectProcessor"),
  (r".*\.wma$", "WmaImporter", "SoundEffectProcessor"),
  (r".*\.wmv$", "WmvImporter", "VideoProcessor"),
];

static DEFAULT_MAPPINGS: LazyLock<Vec<TypeMapping>> = LazyLock::new(|| {
  DEFAULT_TABLE
    .iter()
    .filter_map(|(pattern, importer, processor)| TypeMapping::new(pattern, importer, processor).ok())
    .collect()
});

/// The built-in mappings, in resolution order.
pub fn default_mappings() -> &'static [TypeMapping] {
  &DEFAULT_MAPPINGS
}
