//! Run command implementation.
//!
//! `rigup run` executes the provisioning steps in order and exits 1 if
//! any step failed.

use crate::cli::args::RunArgs;
use crate::config::RigupConfig;
use crate::error::Result;
use crate::steps::{select_steps, Runner};
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand<'a> {
    config: &'a RigupConfig,
    args: RunArgs,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(config: &'a RigupConfig, args: RunArgs) -> Self {
        Self { config, args }
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let steps = select_steps(&self.args.only, &self.args.skip)?;
        if steps.is_empty() {
            output.warning("Nothing to do: every step was skipped");
            return Ok(CommandResult::success());
        }

        tracing::info!(
            "Provisioning {} step(s) into {}",
            steps.len(),
            self.config.wine_prefix().display()
        );
        tracing::debug!("Terminal bridge port: {}", self.config.api_port);

        let runner = Runner::new(self.config, output);
        let outcomes = runner.run(&steps);

        for outcome in &outcomes {
            tracing::debug!(
                "{} finished at {} after {:.1}s",
                outcome.step,
                outcome.finished_at.format("%H:%M:%S"),
                outcome.duration.as_secs_f64()
            );
        }

        let failed = outcomes.iter().any(|o| !o.succeeded());
        if failed {
            Ok(CommandResult::failure(1))
        } else {
            output.println("Provisioning complete");
            Ok(CommandResult::success())
        }
    }
}
