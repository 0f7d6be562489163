//! Error taxonomy for the deploy pipeline.
//!
//! Every variant is fatal: nothing in the pipeline recovers from these locally.
//! The binary maps them to stable exit codes via [`crate::exit_codes::for_error`].

use std::env::JoinPathsError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = DeployError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DeployError {
    /// The binary was started outside of the expected checkout directory.
    #[error("must run in the {expected_suffix} directory (current: {})", cwd.display())]
    WrongWorkingDirectory {
        cwd: PathBuf,
        expected_suffix: String,
    },

    #[error("recipe {} not found", path.display())]
    RecipeNotFound { path: PathBuf },

    /// The recipe exists but does not match the recipe schema.
    #[error("malformed recipe {}: {message}", path.display())]
    MalformedRecipe { path: PathBuf, message: String },

    /// An external command exited non-zero (or was killed by a signal).
    #[error("command {command} exited with code {}", display_code(code))]
    BuildStepFailed { command: String, code: Option<i32> },

    #[error("failed to start command {command}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// An archive or copy source does not exist.
    #[error("archive source {} does not exist", path.display())]
    MissingSource { path: PathBuf },

    /// The toolchain `bin` directory cannot be placed on the search path.
    #[error("cannot prepend {} to PATH", dir.display())]
    SearchPath {
        dir: PathBuf,
        #[source]
        source: JoinPathsError,
    },

    #[error("{action} {}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeployError {
    pub(crate) fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_step_failure_mentions_command_and_code() {
        let err = DeployError::BuildStepFailed {
            command: "ninja -C out/host".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "command ninja -C out/host exited with code 2");
    }

    #[test]
    fn build_step_failure_without_code_reports_signal() {
        let err = DeployError::BuildStepFailed {
            command: "gn".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
