//! Copying build outputs into the deploy root.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::core::paths::{PathResolver, deploy_destination, rewrite_include_path};
use crate::core::recipe::{ArchiveCopy, ArchiveSpec};
use crate::error::{DeployError, Result};

/// Remove `deploy_root` if it is a directory, then create it empty.
#[instrument(skip_all, fields(deploy_root = %deploy_root.display()))]
pub fn reset_deploy_root(deploy_root: &Path) -> Result<()> {
    if deploy_root.is_dir() {
        debug!("removing previous deploy root");
        fs::remove_dir_all(deploy_root)
            .map_err(|err| DeployError::filesystem("remove deploy root", deploy_root, err))?;
    }
    fs::create_dir_all(deploy_root)
        .map_err(|err| DeployError::filesystem("create deploy root", deploy_root, err))?;
    Ok(())
}

/// Stage every include path of `spec` under `deploy_root`.
///
/// Directories are merged into existing destinations and files overwrite, so
/// staging the same spec twice leaves the same tree as staging it once.
#[instrument(skip_all, fields(base_path = %spec.base_path, includes = spec.include_paths.len()))]
pub fn stage_archive(spec: &ArchiveSpec, resolver: &PathResolver, deploy_root: &Path) -> Result<()> {
    for include_path in &spec.include_paths {
        let source = resolver.resolve_one(include_path);
        let rewritten = rewrite_include_path(include_path, &spec.base_path);
        let destination = deploy_destination(deploy_root, &rewritten);
        debug!(
            source = %source.display(),
            destination = %destination.display(),
            "staging include path"
        );

        let metadata = source_metadata(&source)?;
        create_parent(&destination)?;
        if metadata.is_dir() {
            copy_dir_recursive(&source, &destination)?;
        } else {
            copy_file(&source, &destination)?;
        }
    }
    info!(count = spec.include_paths.len(), "archive staged");
    Ok(())
}

/// Copy a single file from the working root into the deploy root.
#[instrument(skip_all, fields(source = %copy.source, destination = %copy.destination))]
pub fn copy_archive(copy: &ArchiveCopy, resolver: &PathResolver, deploy_root: &Path) -> Result<()> {
    let source = resolver.resolve_one(&copy.source);
    let destination = deploy_destination(deploy_root, &copy.destination);

    if source_metadata(&source)?.is_dir() {
        return Err(DeployError::filesystem(
            "copy archive",
            source,
            io::Error::other("source is a directory, expected a single file"),
        ));
    }
    create_parent(&destination)?;
    copy_file(&source, &destination)
}

fn source_metadata(source: &Path) -> Result<fs::Metadata> {
    fs::metadata(source).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            DeployError::MissingSource {
                path: source.to_path_buf(),
            }
        } else {
            DeployError::filesystem("inspect", source, err)
        }
    })
}

fn create_parent(destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| DeployError::filesystem("create directory", parent, err))?;
    }
    Ok(())
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination)
        .map_err(|err| DeployError::filesystem("copy", source, err))?;
    Ok(())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|err| DeployError::filesystem("create directory", dst, err))?;
    let entries = fs::read_dir(src).map_err(|err| DeployError::filesystem("read", src, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| DeployError::filesystem("read entry in", src, err))?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copy_dir_recursive(&path, &target)?;
        } else {
            copy_file(&path, &target)?;
        }
    }
    Ok(())
}
