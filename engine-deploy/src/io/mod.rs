//! I/O helpers for the deploy pipeline.

pub mod config;
pub mod git;
pub mod process;
pub mod recipe_store;
pub mod staging;
