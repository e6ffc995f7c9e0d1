//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::RigupConfig;
use crate::error::Result;
use crate::ui::Output;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing through the given output.
    fn execute(&self, output: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI subcommands to their implementations.
pub struct CommandDispatcher {
    config: RigupConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher over a resolved configuration.
    pub fn new(config: RigupConfig) -> Self {
        Self { config }
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &RigupConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    ///
    /// An absent subcommand means a full provisioning run; this is the
    /// container-startup invocation.
    pub fn dispatch(&self, cli: &Cli, output: &Output) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(&self.config, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(&self.config, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Config(args)) => {
                let cmd = super::config::ConfigCommand::new(&self.config, args.clone());
                cmd.execute(output)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(output)
            }
            None => {
                let cmd = super::run::RunCommand::new(&self.config, RunArgs::default());
                cmd.execute(output)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_holds_config() {
        let dispatcher = CommandDispatcher::new(RigupConfig::default());
        assert_eq!(dispatcher.config().api_port, 5001);
    }
}
