//! Orchestration for a full deploy run.
//!
//! A run validates the working directory, names the deploy root after the
//! engine revision, recreates it empty, then processes every configured recipe
//! in order. Artifacts from all recipes accumulate in the same deploy root.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, instrument};

use crate::context::RunContext;
use crate::error::{DeployError, Result};
use crate::interpret::RecipeInterpreter;
use crate::io::config::{CONFIG_FILE_NAME, load_config};
use crate::io::git::Git;
use crate::io::process::CommandRunner;
use crate::io::staging::reset_deploy_root;

/// The binary must be started from the checkout's `engine/src` directory.
pub const REQUIRED_SUFFIX: &str = "engine/src";

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub deploy_root: PathBuf,
    pub recipes: usize,
}

/// Fail unless `cwd` ends with the [`REQUIRED_SUFFIX`] components.
pub fn check_working_directory(cwd: &Path) -> Result<()> {
    if cwd.ends_with(REQUIRED_SUFFIX) {
        debug!(cwd = %cwd.display(), "working directory accepted");
        return Ok(());
    }
    Err(DeployError::WrongWorkingDirectory {
        cwd: cwd.to_path_buf(),
        expected_suffix: REQUIRED_SUFFIX.to_string(),
    })
}

/// Validate `cwd`, load `deploy.toml`, and read the engine revision.
///
/// `inherited_path` is the search path child processes start from.
#[instrument(skip_all, fields(cwd = %cwd.display()))]
pub fn prepare_run(cwd: &Path, inherited_path: Option<&OsStr>) -> anyhow::Result<RunContext> {
    check_working_directory(cwd)?;
    let config = load_config(&cwd.join(CONFIG_FILE_NAME)).context("load deploy config")?;
    let engine_hash = Git::new(cwd.join(&config.engine_subtree))
        .head_sha()
        .context("compute engine hash")?;
    info!(engine_hash = %engine_hash, "engine revision");
    let ctx = RunContext::new(cwd, &engine_hash, config, inherited_path)?;
    Ok(ctx)
}

/// Recreate the deploy root and process every configured recipe, in order.
///
/// The first failure ends the run; recipes after it are never started and
/// anything already staged is left in place.
#[instrument(skip_all, fields(deploy_root = %ctx.deploy_root.display()))]
pub fn run_deploy<R: CommandRunner>(ctx: &RunContext, runner: &R) -> Result<DeployOutcome> {
    reset_deploy_root(&ctx.deploy_root)?;

    let interpreter = RecipeInterpreter::new(ctx, runner);
    for recipe in &ctx.config.recipes {
        info!(recipe = %recipe, "processing recipe");
        interpreter.process(Path::new(recipe))?;
    }

    Ok(DeployOutcome {
        deploy_root: ctx.deploy_root.clone(),
        recipes: ctx.config.recipes.len(),
    })
}
