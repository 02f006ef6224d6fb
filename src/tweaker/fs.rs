//! File system helpers for the tweaker pipeline.
//!
//! Thin wrappers over `std::fs` that create parent directories before
//! writes, tolerate already-absent removal targets where the pipeline allows
//! it, and attach path context to every error.

use std::fs;
use std::io;
use std::os::unix::fs::{symlink as unix_symlink, PermissionsExt};
use std::path::Path;

use crate::error::{ErrorExt, Result};

/// Removes the directory and its contents if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("failed to remove directory", path),
    }
}

/// Removes the file if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("failed to remove file", path),
    }
}

/// Moves `src` to `dst`, creating any missing parent directories of `dst`.
///
/// A missing source is an error; nothing is created in that case beyond the
/// destination's parents.
pub fn rename_with_parents(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).fs_context("failed to create parent directory", parent)?;
    }
    fs::rename(src, dst).fs_context("failed to rename", src)
}

/// True if the directory exists and has no entries.
pub fn is_dir_empty(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).fs_context("failed to read directory", path)?;
    Ok(entries.next().is_none())
}

/// Creates a symlink at `link` pointing to `target`.
pub fn symlink(target: &Path, link: &Path) -> Result<()> {
    unix_symlink(target, link).fs_context("failed to create symlink", link)
}

/// Replaces whatever occupies `link` with a symlink to `target`.
///
/// The existing entry may be a regular file or a directory (an archiving
/// step materializes symlinks as either). A missing entry means the tree
/// deviated from the expected installer shape and is an error.
pub fn replace_with_symlink(target: &Path, link: &Path) -> Result<()> {
    let metadata =
        fs::symlink_metadata(link).fs_context("expected a flattened symlink entry", link)?;
    if metadata.is_dir() {
        fs::remove_dir_all(link).fs_context("failed to remove flattened directory", link)?;
    } else {
        fs::remove_file(link).fs_context("failed to remove flattened entry", link)?;
    }
    symlink(target, link)
}

/// Marks the file executable (rwxr-xr-x).
pub fn set_executable(path: &Path) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .fs_context("failed to set executable permissions", path)
}
