//! Command-line interface for rigup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ConfigArgs, RunArgs, StatusArgs, StatusFormat};
pub use commands::{Command, CommandDispatcher, CommandResult};
