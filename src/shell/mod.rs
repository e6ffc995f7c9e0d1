//! Subprocess execution and wine invocation.

pub mod command;
pub mod wine;

pub use command::{display_command, run, run_check, CommandOptions, CommandResult};
pub use wine::{to_windows_path, Wine};
