//! Run-scoped state shared by every recipe of a deploy run.
//!
//! The search path, prebuilt-toolchain flag, and checkout path are carried as
//! an environment overlay applied to each child process. The process's own
//! environment is never modified, so nothing has to be restored afterwards.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::paths::{PathResolver, prepend_search_path};
use crate::error::{DeployError, Result};
use crate::io::config::DeployConfig;
use crate::io::process::CommandRequest;

/// Value of the prebuilt-toolchain flag for the duration of a run.
const PREBUILT_FLAG_ON: &str = "True";

#[derive(Debug, Clone)]
pub struct RunContext {
    pub resolver: PathResolver,
    /// `<root>/<deploy_dir>/<engine hash>`; shared by every recipe of the run.
    pub deploy_root: PathBuf,
    pub config: DeployConfig,
    env: BTreeMap<String, OsString>,
}

impl RunContext {
    /// Build the context for a run rooted at `root`.
    ///
    /// `inherited_path` is the search path the run starts from (normally the
    /// current `PATH`); the toolchain `bin` directory is placed in front of it.
    /// Fails if that directory contains the search-path separator.
    pub fn new(
        root: impl Into<PathBuf>,
        engine_hash: &str,
        config: DeployConfig,
        inherited_path: Option<&OsStr>,
    ) -> Result<Self> {
        let resolver = PathResolver::new(root);
        let deploy_root = resolver.resolve([config.deploy_dir.as_str(), engine_hash]);

        let toolchain_bin = resolver.resolve_one(&config.toolchain.bin);
        let checkout = resolver
            .root()
            .parent()
            .unwrap_or(resolver.root())
            .as_os_str()
            .to_os_string();

        let search_path = prepend_search_path(&toolchain_bin, inherited_path).map_err(|source| {
            DeployError::SearchPath {
                dir: toolchain_bin.clone(),
                source,
            }
        })?;

        let mut env = BTreeMap::new();
        env.insert("PATH".to_string(), search_path);
        env.insert(config.toolchain.checkout_var.clone(), checkout);
        env.insert(
            config.toolchain.prebuilt_flag.clone(),
            OsString::from(PREBUILT_FLAG_ON),
        );

        Ok(Self {
            resolver,
            deploy_root,
            config,
            env,
        })
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// Directory of the engine checkout inside the working root.
    pub fn engine_dir(&self) -> PathBuf {
        self.resolver.resolve_one(&self.config.engine_subtree)
    }

    pub fn env(&self) -> &BTreeMap<String, OsString> {
        &self.env
    }

    /// A request running `command` in `workdir` with the run's environment.
    pub fn command(&self, command: String, workdir: PathBuf) -> CommandRequest {
        CommandRequest {
            command,
            workdir,
            env: self.env.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RunContext {
        let inherited = std::env::join_paths(["/usr/bin"]).expect("join");
        RunContext::new(
            "/ci/engine/src",
            "cafebabe",
            DeployConfig::default(),
            Some(&inherited),
        )
        .expect("context")
    }

    #[test]
    fn deploy_root_is_keyed_by_engine_hash() {
        assert_eq!(
            context().deploy_root,
            PathBuf::from("/ci/engine/src/deploy/cafebabe")
        );
    }

    #[test]
    fn overlay_prepends_toolchain_and_sets_flags() {
        let ctx = context();
        let path: Vec<PathBuf> = std::env::split_paths(&ctx.env()["PATH"]).collect();
        assert_eq!(
            path,
            vec![
                PathBuf::from("/ci/engine/src/flutter/third_party/dart/tools/sdks/dart-sdk/bin"),
                PathBuf::from("/usr/bin"),
            ]
        );
        assert_eq!(ctx.env()["ENGINE_CHECKOUT_PATH"], OsString::from("/ci/engine"));
        assert_eq!(ctx.env()["FLUTTER_PREBUILT_DART_SDK"], OsString::from("True"));
    }

    #[test]
    fn command_carries_overlay_and_workdir() {
        let ctx = context();
        let request = ctx.command("ninja".to_string(), ctx.engine_dir());
        assert_eq!(request.workdir, PathBuf::from("/ci/engine/src/flutter"));
        assert_eq!(&request.env, ctx.env());
    }

    #[cfg(unix)]
    #[test]
    fn root_containing_separator_is_rejected() {
        let inherited = std::env::join_paths(["/usr/bin", "/bin"]).expect("join");
        let err = RunContext::new(
            "/ci/a:b/engine/src",
            "cafebabe",
            DeployConfig::default(),
            Some(&inherited),
        )
        .unwrap_err();
        match err {
            DeployError::SearchPath { dir, .. } => assert_eq!(
                dir,
                PathBuf::from("/ci/a:b/engine/src/flutter/third_party/dart/tools/sdks/dart-sdk/bin")
            ),
            other => panic!("unexpected error: {other}"),
        }
    }
}
