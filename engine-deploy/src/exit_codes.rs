//! Stable exit codes for the `build-and-deploy` binary.

use crate::error::DeployError;

/// Every recipe was processed.
pub const OK: i32 = 0;
/// Unclassified failure (configuration, git, search path, or other I/O errors).
pub const FAILED: i32 = 1;
/// The binary was not started from the checkout's `engine/src` directory.
pub const WRONG_WORKING_DIRECTORY: i32 = 2;
/// A recipe file is missing or does not match the recipe schema.
pub const INVALID_RECIPE: i32 = 3;
/// A configuration tool, build executor, or generator command failed.
pub const BUILD_STEP_FAILED: i32 = 4;
/// Copying artifacts into the deploy root failed.
pub const STAGING_FAILED: i32 = 5;

/// Classify an error chain into an exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    let Some(deploy_err) = err.chain().find_map(|cause| cause.downcast_ref::<DeployError>())
    else {
        return FAILED;
    };
    match deploy_err {
        DeployError::WrongWorkingDirectory { .. } => WRONG_WORKING_DIRECTORY,
        DeployError::RecipeNotFound { .. } | DeployError::MalformedRecipe { .. } => INVALID_RECIPE,
        DeployError::BuildStepFailed { .. } | DeployError::Spawn { .. } => BUILD_STEP_FAILED,
        DeployError::MissingSource { .. } | DeployError::Filesystem { .. } => STAGING_FAILED,
        DeployError::SearchPath { .. } => FAILED,
    }
}
