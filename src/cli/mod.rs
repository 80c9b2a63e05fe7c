//! Command-line interface for flowtc.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations. The CLI plays the part of a host editor:
//! it snapshots one file, runs the check pipeline and prints the result.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ConfigArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, GlobalOptions};
