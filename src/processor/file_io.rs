//! # File I/O Module
//!
//! Whole-file reads and replace-in-place writes for the processor.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the complete file content as UTF-8.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Replaces the file at `path` with `content`.
  ///
  /// The content is written to a temporary file in the same directory which
  /// then takes over the original's permissions and is renamed over it, so
  /// an interrupted run never leaves a truncated file behind. A symlink is
  /// followed so that its target is replaced and the link itself stays.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let resolved = Self::resolve_target(path)?;
    let path = resolved.as_path();
    let parent = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent)
      .with_context(|| format!("Failed to create temporary file next to: {}", path.display()))?;
    temp
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write file: {}", path.display()))?;
    temp
      .as_file()
      .sync_all()
      .with_context(|| format!("Failed to flush file: {}", path.display()))?;

    if let Ok(metadata) = std::fs::metadata(path) {
      std::fs::set_permissions(temp.path(), metadata.permissions())
        .with_context(|| format!("Failed to copy permissions of: {}", path.display()))?;
    }

    temp
      .persist(path)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;
    Ok(())
  }

  /// The file a write to `path` should replace: the canonical target when
  /// `path` is a symlink, otherwise `path` itself.
  fn resolve_target(path: &Path) -> Result<PathBuf> {
    let is_symlink = std::fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
    if !is_symlink {
      return Ok(path.to_path_buf());
    }
    std::fs::canonicalize(path).with_context(|| format!("Failed to resolve symlink: {}", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_write_replaces_content() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("core.clj");
    std::fs::write(&path, "(ns old)\n").expect("write original");

    FileIO::write_file(&path, "(ns new)\n").expect("replace");

    assert_eq!(FileIO::read_full_content(&path).expect("read"), "(ns new)\n");
    let leftovers = std::fs::read_dir(temp_dir.path()).expect("list").count();
    assert_eq!(leftovers, 1, "temporary file should have been renamed away");
  }

  #[cfg(unix)]
  #[test]
  fn test_write_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("run.sh");
    std::fs::write(&path, "#!/bin/sh\n").expect("write original");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");

    FileIO::write_file(&path, "#!/bin/sh\necho hi\n").expect("replace");

    let mode = std::fs::metadata(&path).expect("stat").permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
  }

  #[cfg(unix)]
  #[test]
  fn test_write_through_symlink_updates_target() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let real = temp_dir.path().join("real.clj");
    let link = temp_dir.path().join("link.clj");
    std::fs::write(&real, "(ns a)\n").expect("write original");
    std::os::unix::fs::symlink(&real, &link).expect("create symlink");

    FileIO::write_file(&link, ";; hdr\n(ns a)\n").expect("replace");

    let link_meta = std::fs::symlink_metadata(&link).expect("stat link");
    assert!(link_meta.file_type().is_symlink(), "symlink should be kept");
    assert_eq!(FileIO::read_full_content(&real).expect("read"), ";; hdr\n(ns a)\n");
  }

  #[test]
  fn test_read_missing_file_is_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let err = FileIO::read_full_content(&temp_dir.path().join("missing.clj")).expect_err("should fail");
    assert!(err.to_string().contains("Failed to read file"));
  }
}
