//! Test-only helpers: a recording command runner and checkout fixtures.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::error::Result as DeployResult;
use crate::io::process::{CommandRequest, CommandRunner};

/// Command runner that records every request instead of spawning it.
///
/// Commands succeed unless they contain the configured failure pattern.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    requests: RefCell<Vec<CommandRequest>>,
    failure: Option<(String, i32)>,
}

impl RecordingRunner {
    /// Exit with `code` for the first and every later command containing `pattern`.
    pub fn failing_on(pattern: &str, code: i32) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            failure: Some((pattern.to_string(), code)),
        }
    }

    pub fn requests(&self) -> Vec<CommandRequest> {
        self.requests.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.command.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, request: &CommandRequest) -> DeployResult<Option<i32>> {
        self.requests.borrow_mut().push(request.clone());
        match &self.failure {
            Some((pattern, code)) if request.command.contains(pattern.as_str()) => Ok(Some(*code)),
            _ => Ok(Some(0)),
        }
    }
}

/// Temporary `<tmp>/engine/src` working root.
pub struct Checkout {
    _temp: TempDir,
    root: PathBuf,
}

impl Checkout {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("tempdir")?;
        let root = temp.path().join("engine").join("src");
        fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;
        Ok(Self { _temp: temp, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `contents` to `relative` under the root, creating parents.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
