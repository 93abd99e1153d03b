//! Platform abstractions: well-known paths and process inspection.

pub mod paths;
pub mod process;

pub use process::{current_pid, process_exists};
