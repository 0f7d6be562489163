//! Synchronous shell command execution.
//!
//! [`CommandRunner`] decouples the pipeline from real child processes; tests
//! use scripted runners that record requests without spawning anything.
//! [`execute_command`] layers the logging and fail-fast policy on top.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, error, instrument, warn};

use crate::error::{DeployError, Result};

/// One shell command plus the working directory and environment it runs with.
///
/// The working directory applies to the child only; the caller's current
/// directory is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: String,
    pub workdir: PathBuf,
    /// Variables set on top of the inherited environment.
    pub env: BTreeMap<String, OsString>,
}

/// Abstraction over process spawning.
pub trait CommandRunner {
    /// Run the command to completion and return its exit code.
    ///
    /// `None` means the process ended without a code (killed by a signal).
    fn run(&self, request: &CommandRequest) -> Result<Option<i32>>;
}

/// Runs commands through the platform shell with inherited stdio, blocking until exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    #[instrument(skip_all, fields(workdir = %request.workdir.display()))]
    fn run(&self, request: &CommandRequest) -> Result<Option<i32>> {
        let mut cmd = shell_command(&request.command);
        cmd.current_dir(&request.workdir)
            .envs(&request.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!("spawning child process");
        let status = cmd.status().map_err(|source| {
            error!(err = %source, "failed to spawn command");
            DeployError::Spawn {
                command: request.command.clone(),
                source,
            }
        })?;
        debug!(exit_code = ?status.code(), "command finished");
        Ok(status.code())
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Run `request` and turn anything but a zero exit into [`DeployError::BuildStepFailed`].
///
/// Prints a start line and a completion line to stdout for every command, so
/// long CI logs show exactly which step was running.
pub fn execute_command<R: CommandRunner>(runner: &R, request: &CommandRequest) -> Result<()> {
    execute_command_logged(runner, request, &mut std::io::stdout())
}

/// [`execute_command`] with the start and completion lines written to `log`.
pub fn execute_command_logged<R, W>(runner: &R, request: &CommandRequest, log: &mut W) -> Result<()>
where
    R: CommandRunner,
    W: Write,
{
    log_line(log, format_args!("Executing command: '{}'", request.command));
    let code = match runner.run(request) {
        Ok(code) => code,
        Err(err) => {
            log_line(log, format_args!("Command '{}' failed to start", request.command));
            return Err(err);
        }
    };
    match code {
        Some(code) => log_line(
            log,
            format_args!("Command '{}' executed with code {code}", request.command),
        ),
        None => log_line(
            log,
            format_args!("Command '{}' terminated by signal", request.command),
        ),
    }

    if code != Some(0) {
        warn!(command = %request.command, exit_code = ?code, "command failed");
        return Err(DeployError::BuildStepFailed {
            command: request.command.clone(),
            code,
        });
    }
    Ok(())
}

// A closed stdout must not abort the build, so write failures are only traced.
fn log_line<W: Write>(log: &mut W, line: fmt::Arguments<'_>) {
    if let Err(err) = writeln!(log, "{line}").and_then(|()| log.flush()) {
        warn!(error = %err, "failed to write command log line");
    }
}
