//! Checker process execution.

pub mod runner;

pub use runner::{resolve_executable, run, run_with_deadline, ProcessOutput};
