//! Path arithmetic for the working root and the deploy root.

use std::env::JoinPathsError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Resolves repository-relative paths against the working root captured at startup.
///
/// The root is fixed at construction, so results never depend on the process's
/// current directory at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `components` onto the working root, in order.
    ///
    /// Follows [`Path::join`]: an absolute component replaces everything before it.
    pub fn resolve<I, P>(&self, components: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.root.clone();
        for component in components {
            path.push(component);
        }
        path
    }

    pub fn resolve_one(&self, component: impl AsRef<Path>) -> PathBuf {
        self.resolve([component])
    }
}

/// Remove the first textual occurrence of `base_path` from `include_path`.
///
/// This is substring removal, not prefix stripping: a `base_path` that occurs
/// later in `include_path` is removed from there instead.
pub fn rewrite_include_path(include_path: &str, base_path: &str) -> String {
    if base_path.is_empty() {
        return include_path.to_string();
    }
    include_path.replacen(base_path, "", 1)
}

/// Destination of a rewritten include path inside the deploy root.
///
/// Leading separators left over from the rewrite are dropped so the result
/// always stays under `deploy_root`.
pub fn deploy_destination(deploy_root: &Path, rewritten: &str) -> PathBuf {
    let relative = rewritten.trim_start_matches(['/', '\\']);
    if relative.is_empty() {
        return deploy_root.to_path_buf();
    }
    deploy_root.join(relative)
}

/// Build a search-path value with `dir` in front of `current`.
///
/// Fails when `dir` contains the platform's search-path separator, since it
/// could not be represented as a single entry.
pub fn prepend_search_path(dir: &Path, current: Option<&OsStr>) -> Result<OsString, JoinPathsError> {
    let mut entries = vec![dir.to_path_buf()];
    if let Some(current) = current {
        entries.extend(std::env::split_paths(current));
    }
    std::env::join_paths(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_components_onto_root() {
        let resolver = PathResolver::new("/work/engine/src");
        assert_eq!(
            resolver.resolve(["flutter", "tools", "gn"]),
            PathBuf::from("/work/engine/src/flutter/tools/gn")
        );
        assert_eq!(resolver.resolve_one("gen.py"), PathBuf::from("/work/engine/src/gen.py"));
    }

    #[test]
    fn resolve_with_no_components_is_root() {
        let resolver = PathResolver::new("/work/engine/src");
        assert_eq!(resolver.resolve(Vec::<&str>::new()), resolver.root());
    }

    #[test]
    fn rewrite_removes_base_prefix() {
        assert_eq!(rewrite_include_path("/a/b/c/d.txt", "/a/b"), "/c/d.txt");
        assert_eq!(
            rewrite_include_path("out/host_debug/gen/a.txt", "out/host_debug/"),
            "gen/a.txt"
        );
    }

    #[test]
    fn rewrite_removes_only_first_occurrence() {
        assert_eq!(rewrite_include_path("x/b/y/b/z", "b/"), "x/y/b/z");
    }

    #[test]
    fn rewrite_of_unrelated_path_is_unchanged() {
        assert_eq!(rewrite_include_path("out/a.txt", "gen/"), "out/a.txt");
        assert_eq!(rewrite_include_path("out/a.txt", ""), "out/a.txt");
    }

    #[test]
    fn destination_stays_under_deploy_root() {
        let root = Path::new("/deploy/abc");
        assert_eq!(
            deploy_destination(root, "/c/d.txt"),
            PathBuf::from("/deploy/abc/c/d.txt")
        );
        assert_eq!(deploy_destination(root, "c/d.txt"), PathBuf::from("/deploy/abc/c/d.txt"));
        assert_eq!(deploy_destination(root, ""), PathBuf::from("/deploy/abc"));
    }

    #[test]
    fn prepend_search_path_puts_dir_first() {
        let current = std::env::join_paths(["/usr/bin", "/bin"]).expect("join");
        let joined = prepend_search_path(Path::new("/sdk/bin"), Some(&current)).expect("prepend");
        let entries: Vec<PathBuf> = std::env::split_paths(&joined).collect();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/sdk/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn prepend_search_path_without_current_is_dir() {
        let joined = prepend_search_path(Path::new("/sdk/bin"), None).expect("prepend");
        assert_eq!(joined, OsString::from("/sdk/bin"));
    }

    #[cfg(unix)]
    #[test]
    fn prepend_search_path_rejects_dir_with_separator() {
        let current = std::env::join_paths(["/usr/bin", "/bin"]).expect("join");
        let result = prepend_search_path(Path::new("/ci/a:b/engine/src/sdk/bin"), Some(&current));
        assert!(result.is_err());
    }
}
