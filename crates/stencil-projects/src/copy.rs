//! Copying a local template directory

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Version-control directories never copied out of a template
pub const IGNORED_DIRS: [&str; 2] = [".git", ".hg"];

/// What a copy wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
    pub links: usize,
}

/// Check that `source` is usable as a local template
///
/// Performs no writes.
pub fn validate_source(source: &Utf8Path) -> Result<()> {
    if !source.exists() {
        return Err(Error::source_not_found(source.as_str()));
    }
    if source.as_str() == "." {
        return Err(Error::CurrentDirectorySource);
    }
    if !source.is_dir() {
        return Err(Error::source_not_directory(source.as_str()));
    }
    Ok(())
}

/// Copy the template at `source` into `target`, skipping [`IGNORED_DIRS`]
pub async fn copy_template(source: &Utf8Path, target: &Utf8Path) -> Result<CopyStats> {
    validate_source(source)?;

    let source_root = source.canonicalize()?;
    if resolve_from_existing_ancestor(target.as_std_path())?.starts_with(&source_root) {
        return Err(Error::target_inside_source(source.as_str(), target.as_str()));
    }

    create_target_dir(target).await?;
    let target_root = target.canonicalize()?;

    info!("Copying template {} -> {}", source, target);
    let stats = tokio::task::spawn_blocking(move || copy_tree(&source_root, &target_root))
        .await
        .map_err(io::Error::other)??;

    debug!(
        "Copied {} files, {} directories, {} links",
        stats.files, stats.dirs, stats.links
    );
    Ok(stats)
}

/// Create `target` and its parents (mode 0755 on unix)
async fn create_target_dir(target: &Utf8Path) -> Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(target).await?;
    Ok(())
}

/// Canonical form of `path`, which need not exist yet
///
/// The nearest existing ancestor is canonicalized and the missing components
/// are appended unchanged.
fn resolve_from_existing_ancestor(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing.canonicalize()?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn copy_tree(source: &Path, target: &Path) -> Result<CopyStats> {
    let mut stats = CopyStats::default();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let dest = target.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dest)?;
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dest)?;
            stats.links += 1;
        } else {
            fs::copy(entry.path(), &dest)?;
            stats.files += 1;
        }
    }

    Ok(stats)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, dest: &Path) -> Result<()> {
    let pointee: PathBuf = fs::read_link(link)?;
    if dest.symlink_metadata().is_ok() {
        fs::remove_file(dest)?;
    }
    std::os::unix::fs::symlink(pointee, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, dest: &Path) -> Result<()> {
    // Without portable symlink creation, copy what the link points at
    let pointee: PathBuf = fs::canonicalize(link)?;
    if pointee.is_dir() {
        debug!("Skipping directory link {}", link.display());
        return Ok(());
    }
    fs::copy(pointee, dest)?;
    Ok(())
}
