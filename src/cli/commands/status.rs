//! Status command implementation.
//!
//! `rigup status` probes every step without installing anything.

use crate::cli::args::{StatusArgs, StatusFormat};
use crate::config::RigupConfig;
use crate::error::Result;
use crate::steps::{Runner, StepKind};
use crate::ui::{Output, StatusKind};

use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand<'a> {
    config: &'a RigupConfig,
    args: StatusArgs,
}

impl<'a> StatusCommand<'a> {
    /// Create a new status command.
    pub fn new(config: &'a RigupConfig, args: StatusArgs) -> Self {
        Self { config, args }
    }
}

impl Command for StatusCommand<'_> {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let runner = Runner::new(self.config, output);
        let reports = runner.probe_all(&StepKind::ALL);

        match self.args.format {
            StatusFormat::Json => {
                let json = serde_json::to_string_pretty(&reports)
                    .map_err(|e| anyhow::anyhow!("serializing status: {}", e))?;
                println!("{}", json);
            }
            StatusFormat::Text => {
                for report in &reports {
                    let kind = if report.satisfied {
                        StatusKind::Success
                    } else {
                        StatusKind::Pending
                    };
                    output.status_line(kind, &format!("{}: {}", report.step, report.detail));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
