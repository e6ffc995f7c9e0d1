//! Subprocess execution.

use crate::error::{Result, RigupError};
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a subprocess.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the process succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for subprocess execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with the process env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a program with arguments.
///
/// The program is invoked directly, not through a shell, so arguments
/// never need quoting. A spawn failure maps to [`RigupError::CommandFailed`];
/// a non-zero exit is NOT an error here, callers decide what it means.
pub fn run(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|_| RigupError::CommandFailed {
        command: display_command(program, args),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Execute a program and return success/failure.
pub fn run_check(program: &str, args: &[&str], cwd: Option<&Path>) -> bool {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };

    run(program, args, &options)
        .map(|r| r.success)
        .unwrap_or(false)
}

/// Render a program invocation for error messages and logs.
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_options() -> CommandOptions {
        CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    #[test]
    fn run_successful_command() {
        let result = run("echo", &["hello"], &capture_options()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn run_failing_command_is_not_an_error() {
        let result = run("false", &[], &capture_options()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn run_missing_program_is_an_error() {
        let result = run("rigup-no-such-program", &[], &capture_options());
        assert!(matches!(
            result,
            Err(RigupError::CommandFailed { code: None, .. })
        ));
    }

    #[test]
    fn run_with_env() {
        let mut options = capture_options();
        options
            .env
            .insert("MY_VAR".to_string(), "my_value".to_string());

        let result = run("sh", &["-c", "echo $MY_VAR"], &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn run_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut options = capture_options();
        options.cwd = Some(temp.path().to_path_buf());

        let result = run("pwd", &[], &options).unwrap();

        assert!(result.success);
    }

    #[test]
    fn run_check_returns_bool() {
        assert!(run_check("true", &[], None));
        assert!(!run_check("false", &[], None));
        assert!(!run_check("rigup-no-such-program", &[], None));
    }

    #[test]
    fn run_captures_stderr() {
        let result = run("sh", &["-c", "echo oops >&2"], &capture_options()).unwrap();

        assert!(result.stderr.contains("oops"));
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn display_command_formats() {
        assert_eq!(display_command("wine", &[]), "wine");
        assert_eq!(
            display_command("wine", &["setup.exe", "/auto"]),
            "wine setup.exe /auto"
        );
    }

    #[test]
    fn command_result_tracks_duration() {
        let result = run("echo", &["fast"], &capture_options()).unwrap();
        assert!(result.duration.as_millis() < 5000);
    }
}
