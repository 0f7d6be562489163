//! Recipe loading from disk.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, instrument};

use crate::core::recipe::{Recipe, parse_recipe};
use crate::error::{DeployError, Result};

/// Read, schema-check, and decode the recipe at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_recipe(path: &Path) -> Result<Recipe> {
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DeployError::RecipeNotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::InvalidData => DeployError::MalformedRecipe {
            path: path.to_path_buf(),
            message: "recipe is not valid UTF-8".to_string(),
        },
        _ => DeployError::filesystem("read recipe", path, err),
    })?;
    let recipe = parse_recipe(&contents).map_err(|errors| DeployError::MalformedRecipe {
        path: path.to_path_buf(),
        message: errors.join("; "),
    })?;
    debug!(
        builds = recipe.builds.len(),
        tasks = recipe.generators.tasks.len(),
        archives = recipe.archives.len(),
        "recipe loaded"
    );
    Ok(recipe)
}
