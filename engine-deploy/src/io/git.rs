//! Git adapter used to identify the engine checkout.
//!
//! The deploy root is named after the checked-out revision, so all we need is a
//! small wrapper around `git rev-parse`.

use std::path::PathBuf;
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Return the full SHA of `HEAD`.
    #[instrument(skip_all, fields(workdir = %self.workdir.display()))]
    pub fn head_sha(&self) -> Result<String> {
        let out = self.run_capture(&["rev-parse", "HEAD"])?;
        let sha = parse_head_sha(&out)?;
        debug!(sha = %sha, "engine revision");
        Ok(sha)
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {} in {}", args.join(" "), self.workdir.display()))
    }
}

/// Extract the revision from `git rev-parse HEAD` output.
///
/// The value names a directory, so anything other than a single hex token is rejected.
fn parse_head_sha(out: &str) -> Result<String> {
    let sha = out.trim();
    if sha.is_empty() {
        return Err(anyhow!("git rev-parse HEAD printed nothing"));
    }
    if !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("unexpected revision '{sha}'"));
    }
    Ok(sha.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trailing_newline() {
        let sha = parse_head_sha("0123456789abcdef0123456789abcdef01234567\n").expect("parse");
        assert_eq!(sha, "0123456789abcdef0123456789abcdef01234567");
    }

    #[test]
    fn rejects_empty_output() {
        assert!(parse_head_sha("\n").is_err());
    }

    #[test]
    fn rejects_non_hex_output() {
        assert!(parse_head_sha("HEAD\n").is_err());
    }

    #[test]
    fn reads_head_of_fresh_repo() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        for args in [
            vec!["init", "-q"],
            vec![
                "-c",
                "user.name=Deploy Test",
                "-c",
                "user.email=deploy-test@local.invalid",
                "commit",
                "-q",
                "--allow-empty",
                "-m",
                "init",
            ],
        ] {
            let status = Command::new("git")
                .args(&args)
                .current_dir(root)
                .status()
                .expect("git");
            assert!(status.success(), "git {args:?}");
        }

        let sha = Git::new(root).head_sha().expect("head sha");
        assert_eq!(sha.len(), 40);
    }

    #[test]
    fn fails_outside_repository_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = Git::new(temp.path().join("missing")).head_sha().unwrap_err();
        assert!(format!("{err:#}").contains("spawn git rev-parse HEAD"));
    }
}
