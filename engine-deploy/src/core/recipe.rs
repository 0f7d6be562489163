//! Typed recipe schema.
//!
//! A recipe is decoded exactly once: the raw JSON is checked against the
//! bundled JSON Schema (so every violation is reported together), then
//! deserialized into [`Recipe`]. Unknown keys are ignored at every level.

use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const RECIPE_SCHEMA: &str = include_str!("../../schemas/recipe.schema.json");

/// One platform's build, generator, and archive steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub builds: Vec<BuildStep>,
    pub generators: Generators,
    pub archives: Vec<ArchiveCopy>,
}

impl Recipe {
    /// True when processing the recipe would do nothing.
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty() && self.generators.tasks.is_empty() && self.archives.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Generators {
    pub tasks: Vec<GeneratorTask>,
}

/// A configuration-tool run followed by a build-executor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    /// Arguments passed verbatim to the configuration tool.
    pub gn: Vec<String>,
    pub ninja: NinjaInvocation,
    /// Staged into the deploy root after the build executor succeeds.
    #[serde(default)]
    pub archives: Vec<ArchiveSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NinjaInvocation {
    /// Build configuration name, i.e. the directory under the output dir.
    pub config: String,
    pub targets: Vec<String>,
}

/// Paths to copy into the deploy root, relative-ized against `base_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSpec {
    pub base_path: String,
    pub include_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorTask {
    /// Interpreter to launch the script with; empty runs the script directly.
    #[serde(default)]
    pub language: String,
    pub script: String,
    pub parameters: Vec<String>,
}

/// Single-file copy from the working root into the deploy root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveCopy {
    pub source: String,
    pub destination: String,
}

/// Parse and validate a recipe document.
///
/// Returns the typed recipe, or every schema violation found.
pub fn parse_recipe(raw: &str) -> Result<Recipe, Vec<String>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| vec![format!("invalid json: {err}")])?;
    validate_schema(&value)?;
    serde_json::from_value(value).map_err(|err| vec![format!("unexpected recipe shape: {err}")])
}

fn validate_schema(instance: &Value) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(RECIPE_SCHEMA)
        .map_err(|err| vec![format!("parse recipe schema: {err}")])?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| vec![format!("compile recipe schema: {err}")])?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| {
            let location = match err.instance_path().as_str() {
                "" => "/",
                pointer => pointer,
            };
            format!("{location}: {err}")
        })
        .collect();
    if !messages.is_empty() {
        return Err(messages);
    }
    Ok(())
}
