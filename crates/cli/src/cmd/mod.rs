mod build;
mod mappings;
mod resolve;
mod sweep;

pub use build::{BuildArgs, cmd_build};
pub use mappings::cmd_mappings;
pub use resolve::cmd_resolve;
pub use sweep::cmd_sweep;
