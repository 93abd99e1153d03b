//! xnacontent-lib: driving the XNA content pipeline from outside Visual Studio
//!
//! This crate provides:
//! - `TypeMapping`: filename patterns that pick an importer and processor
//! - `ContentSession`: queues content files and builds them through a `BuildEngine`
//! - `ContentProject`: the generated MSBuild project handed to the engine
//! - `ScratchSpace`: per-process working directories and the sweep that reclaims them

pub mod consts;
pub mod content;
pub mod engine;
pub mod mapping;
pub mod platform;
pub mod project;
pub mod scratch;
pub mod session;
pub mod util;

pub use content::QueuedContentFile;
pub use engine::{BuildEngine, BuildError, BuildResult, MsBuildEngine};
pub use mapping::{MappingError, TypeMapping, default_mappings};
pub use project::{ContentProject, GraphicsProfile, ProjectSettings, TargetPlatform};
pub use scratch::{ScratchSpace, SweepResult, SweepStats};
pub use session::{ContentSession, SessionError, SessionEvent, SessionOptions};
