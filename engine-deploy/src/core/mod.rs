//! Deterministic, pure logic for the deploy pipeline.
//!
//! Nothing in here touches the filesystem, the environment, or child
//! processes, so every piece is testable with in-memory values.

pub mod commands;
pub mod paths;
pub mod recipe;
