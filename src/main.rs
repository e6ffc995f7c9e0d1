//! rigup CLI entry point.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rigup::cli::{Cli, CommandDispatcher};
use rigup::config::load_config;
use rigup::ui::{Output, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// When a log path is configured, a second ANSI-free layer appends the
/// same records there, so container logs survive restarts.
fn init_tracing(debug: bool, log_path: Option<&Path>) {
    let filter = if debug {
        EnvFilter::new("rigup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rigup=info"))
    };

    let file_layer = log_path.and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            ),
            Err(e) => {
                eprintln!("Warning: could not open log file {}: {}", path.display(), e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };
    let output = Output::new(output_mode);

    // Determine project root
    let root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    // Resolve configuration once; it is immutable from here on
    let config = match load_config(cli.config.as_deref(), &root) {
        Ok(config) => config,
        Err(e) => {
            output.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    init_tracing(cli.debug, config.log_path.as_deref());
    tracing::debug!("rigup starting with args: {:?}", cli);

    // Dispatch command
    let dispatcher = CommandDispatcher::new(config);

    match dispatcher.dispatch(&cli, &output) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            output.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
