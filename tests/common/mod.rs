#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use tempfile::TempDir;

/// Header the tests expect for `;;` languages with [`HEADER_ARGS`].
pub const CLJ_HEADER: &str = ";; Copyright © 2024 ACME\n;; SPDX-License-Identifier: MIT\n";

/// Flags resolving the header settings without touching LICENSE.spdx or git.
pub const HEADER_ARGS: &[&str] = &["-s", "MIT", "-C", "ACME", "-y", "2024"];

/// Creates a scratch project: a temp dir marked as project root by `deps.edn`.
pub fn setup_project() -> Result<TempDir> {
  let temp_dir = tempfile::tempdir()?;
  fs::write(temp_dir.path().join("deps.edn"), "{}\n")?;
  Ok(temp_dir)
}

/// Writes `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// `spdxify` run from `dir`, isolated from the user's environment.
pub fn spdxify(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("spdxify")?;
  cmd
    .current_dir(dir)
    .env_remove("SPDXIFY_CONFIG")
    .env_remove("SPDXIFY_CACHE_DIR")
    .env_remove("RUST_LOG")
    .env("HOME", dir)
    .env("XDG_CONFIG_HOME", dir.join(".config"))
    .env("XDG_CACHE_HOME", dir.join(".cache"));
  Ok(cmd)
}
