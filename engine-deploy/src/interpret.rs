//! Recipe interpretation: one recipe, start to finish.
//!
//! Steps run strictly in sequence and the first failure ends the recipe:
//! every build step (configure, build, stage its archives), then every
//! generator task, then every top-level archive copy.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::context::RunContext;
use crate::core::commands::{build_command, configure_command, generator_command};
use crate::core::recipe::{BuildStep, GeneratorTask, Recipe};
use crate::error::Result;
use crate::io::process::{CommandRunner, execute_command};
use crate::io::recipe_store::load_recipe;
use crate::io::staging::{copy_archive, stage_archive};

/// Drives recipes against a shared [`RunContext`].
pub struct RecipeInterpreter<'a, R: CommandRunner> {
    ctx: &'a RunContext,
    runner: &'a R,
}

impl<'a, R: CommandRunner> RecipeInterpreter<'a, R> {
    pub fn new(ctx: &'a RunContext, runner: &'a R) -> Self {
        Self { ctx, runner }
    }

    /// Load the recipe at `recipe_path` (relative to the working root) and run it.
    ///
    /// The whole document is validated before the first command is started.
    #[instrument(skip_all, fields(recipe = %recipe_path.display()))]
    pub fn process(&self, recipe_path: &Path) -> Result<()> {
        let path = self.ctx.resolver.resolve_one(recipe_path);
        let recipe = load_recipe(&path)?;
        if recipe.is_empty() {
            debug!("recipe has no steps");
        }
        self.run(&recipe)?;
        info!("recipe complete");
        Ok(())
    }

    /// Run an already-decoded recipe.
    pub fn run(&self, recipe: &Recipe) -> Result<()> {
        for (index, build) in recipe.builds.iter().enumerate() {
            debug!(index, config = %build.ninja.config, "build step");
            self.run_build(build)?;
        }
        for task in &recipe.generators.tasks {
            self.run_task(task)?;
        }
        for archive in &recipe.archives {
            copy_archive(archive, &self.ctx.resolver, &self.ctx.deploy_root)?;
        }
        Ok(())
    }

    /// Configure, build, then stage the step's archives.
    pub fn run_build(&self, build: &BuildStep) -> Result<()> {
        let cfg = &self.ctx.config;

        let gn_tool = self.ctx.resolver.resolve_one(&cfg.gn.tool);
        let configure = configure_command(&gn_tool, &cfg.gn.flags, &build.gn);
        execute_command(
            self.runner,
            &self.ctx.command(configure, self.ctx.engine_dir()),
        )?;

        let build_cmd = build_command(&cfg.ninja.program, &cfg.ninja.out_dir, &build.ninja);
        execute_command(
            self.runner,
            &self.ctx.command(build_cmd, self.ctx.root().to_path_buf()),
        )?;

        for archive in &build.archives {
            stage_archive(archive, &self.ctx.resolver, &self.ctx.deploy_root)?;
        }
        Ok(())
    }

    /// Run one generator task from the working root.
    pub fn run_task(&self, task: &GeneratorTask) -> Result<()> {
        let command = generator_command(task, &self.ctx.resolver);
        execute_command(
            self.runner,
            &self.ctx.command(command, self.ctx.root().to_path_buf()),
        )
    }
}
