mod common;

#[cfg(unix)]
mod build_tests;
mod sweep_tests;
