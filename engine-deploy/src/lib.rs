//! Build-and-deploy driver for the engine checkout.
//!
//! Reads per-platform JSON recipes, runs the configuration tool and build
//! executor they describe, stages the resulting artifacts into a deploy root
//! named after the engine revision, and runs post-build generator tasks.
//!
//! - **[`core`]**: Pure logic (recipe schema, path rewriting, command lines).
//! - **[`io`]**: Side effects (filesystem staging, child processes, git, config).
//!
//! [`interpret`] runs a single recipe; [`deploy`] drives a full run.

pub mod context;
pub mod core;
pub mod deploy;
pub mod error;
pub mod exit_codes;
pub mod interpret;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
