/// Name used for the shared scratch directory under the system temp dir.
pub const APP_NAME: &str = "xnacontent";

/// Environment variable that overrides the shared scratch root.
pub const SCRATCH_ENV: &str = "XNACONTENT_SCRATCH";

/// Extension of the content project marker files used for content-root discovery.
pub const CONTENT_PROJECT_EXTENSION: &str = "contentproj";

/// File name of the generated build description inside a working directory.
pub const PROJECT_FILENAME: &str = "Content.contentproj";

/// Output path handed to the engine, relative to the working directory.
pub const BIN_DIR: &str = "bin";

/// Directory the content pipeline targets append to the output path.
pub const CONTENT_DIR: &str = "Content";
