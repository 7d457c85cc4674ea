//! Filesystem steps of a target build.
//!
//! Removal tells an absent path apart from one that could not be removed;
//! only the latter is an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::execute::BuildError;

/// What [`remove_path`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
  Removed,
  Absent,
}

/// Remove a file, symlink or directory tree.
pub fn remove_path(path: &Path) -> io::Result<Removal> {
  let metadata = match fs::symlink_metadata(path) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Removal::Absent),
    Err(e) => return Err(e),
  };

  let result = if metadata.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  };

  match result {
    Ok(()) => Ok(Removal::Removed),
    // Raced with another removal
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Removal::Absent),
    Err(e) => Err(e),
  }
}

/// Remove `path` if present and recreate it as an empty directory.
pub fn reset_dir(path: &Path) -> Result<(), BuildError> {
  let removal = remove_path(path).map_err(|source| BuildError::CleanFailed {
    path: path.to_path_buf(),
    source,
  })?;
  debug!(path = %path.display(), ?removal, "reset directory");
  fs::create_dir_all(path)?;
  Ok(())
}

/// Move every top-level entry of `from` into the directory `to`.
///
/// Returns the destination paths in name order.
pub fn move_entries(from: &Path, to: &Path) -> io::Result<Vec<PathBuf>> {
  let mut entries = fs::read_dir(from)?.collect::<Result<Vec<_>, _>>()?;
  entries.sort_by_key(|entry| entry.file_name());

  let mut moved = Vec::with_capacity(entries.len());
  for entry in entries {
    let dest = to.join(entry.file_name());
    move_path(&entry.path(), &dest)?;
    moved.push(dest);
  }
  Ok(moved)
}

/// Rename `src` to `dest`, copying then deleting when they are on different
/// filesystems.
fn move_path(src: &Path, dest: &Path) -> io::Result<()> {
  match fs::rename(src, dest) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
      debug!(src = %src.display(), dest = %dest.display(), "rename crosses devices, copying");
      copy_tree(src, dest)?;
      remove_path(src)?;
      Ok(())
    }
    Err(e) => Err(e),
  }
}

/// Recursive copy that recreates symlinks instead of following them.
fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
  let file_type = fs::symlink_metadata(src)?.file_type();
  if file_type.is_symlink() {
    return copy_link(src, dest);
  }
  if !file_type.is_dir() {
    fs::copy(src, dest)?;
    return Ok(());
  }

  for entry in WalkDir::new(src).follow_links(false) {
    let entry = entry?;
    let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
    let target = dest.join(relative);
    let file_type = entry.file_type();
    if file_type.is_symlink() {
      copy_link(entry.path(), &target)?;
    } else if file_type.is_dir() {
      fs::create_dir_all(&target)?;
    } else {
      fs::copy(entry.path(), &target)?;
    }
  }
  Ok(())
}

/// Recreate the link at `src` as `dest`, keeping its target text as is.
fn copy_link(src: &Path, dest: &Path) -> io::Result<()> {
  let link = fs::read_link(src)?;
  symlink(&link, src, dest)
}

#[cfg(unix)]
fn symlink(link: &Path, _src: &Path, dest: &Path) -> io::Result<()> {
  std::os::unix::fs::symlink(link, dest)
}

#[cfg(windows)]
fn symlink(link: &Path, src: &Path, dest: &Path) -> io::Result<()> {
  // Windows needs the link kind up front; dangling links become file links
  let resolved = match src.parent() {
    Some(parent) => parent.join(link),
    None => link.to_path_buf(),
  };
  if resolved.is_dir() {
    std::os::windows::fs::symlink_dir(link, dest)
  } else {
    std::os::windows::fs::symlink_file(link, dest)
  }
}
