//! Config command implementation.
//!
//! `rigup config` prints the fully resolved configuration as YAML,
//! including env overrides, which is the quickest way to see what a
//! container will actually do.

use crate::cli::args::ConfigArgs;
use crate::config::RigupConfig;
use crate::error::Result;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand<'a> {
    config: &'a RigupConfig,
    #[allow(dead_code)]
    args: ConfigArgs,
}

impl<'a> ConfigCommand<'a> {
    /// Create a new config command.
    pub fn new(config: &'a RigupConfig, args: ConfigArgs) -> Self {
        Self { config, args }
    }
}

impl Command for ConfigCommand<'_> {
    fn execute(&self, _output: &Output) -> Result<CommandResult> {
        let yaml = serde_yaml::to_string(self.config)
            .map_err(|e| anyhow::anyhow!("serializing config: {}", e))?;
        print!("{}", yaml);
        Ok(CommandResult::success())
    }
}
