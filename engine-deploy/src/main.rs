//! `build-and-deploy`: build every platform recipe and collect the artifacts.
//!
//! Must be run from the checkout's `engine/src` directory.

use std::env;

use anyhow::{Context, Result};
use clap::Parser;

use engine_deploy::deploy::{DeployOutcome, prepare_run, run_deploy};
use engine_deploy::io::process::ShellRunner;
use engine_deploy::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "build-and-deploy",
    version,
    about = "Build every engine recipe and stage artifacts into the deploy directory"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();
    match run() {
        Ok(outcome) => {
            println!(
                "Deployed {} recipes to {}",
                outcome.recipes,
                outcome.deploy_root.display()
            );
            std::process::exit(exit_codes::OK);
        }
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::for_error(&err));
        }
    }
}

fn run() -> Result<DeployOutcome> {
    let cwd = env::current_dir().context("read current directory")?;
    let inherited_path = env::var_os("PATH");
    let ctx = prepare_run(&cwd, inherited_path.as_deref())?;
    println!("Script is running in {}", ctx.root().display());
    let outcome = run_deploy(&ctx, &ShellRunner).context("deploy run")?;
    Ok(outcome)
}
