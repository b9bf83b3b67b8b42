//! # Workspace Module
//!
//! Detects the project root that spdxify operates on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Version-control metadata directories that mark a project root.
const VCS_MARKERS: &[&str] = &[".git", ".hg", ".svn"];

/// Build manifests that mark a project root.
const MANIFEST_MARKERS: &[&str] = &[
  "deps.edn",
  "project.clj",
  "shadow-cljs.edn",
  "bb.edn",
  "build.boot",
  "Cargo.toml",
  "package.json",
  "pom.xml",
  "build.gradle",
  "build.gradle.kts",
  "pyproject.toml",
  "go.mod",
];

/// Directories a run is anchored to.
#[derive(Debug, Clone)]
pub struct Workspace {
  current_dir: PathBuf,
  project_root: Option<PathBuf>,
}

impl Workspace {
  pub const fn new(current_dir: PathBuf, project_root: Option<PathBuf>) -> Self {
    Self {
      current_dir,
      project_root,
    }
  }

  pub fn current_dir(&self) -> &Path {
    &self.current_dir
  }

  /// The detected project root, if any.
  pub fn project_root(&self) -> Option<&Path> {
    self.project_root.as_deref()
  }

  /// The project root, falling back to the current directory.
  pub fn root(&self) -> &Path {
    self.project_root.as_deref().unwrap_or(&self.current_dir)
  }
}

/// Resolves the workspace for the process's current directory.
pub fn resolve_workspace() -> Result<Workspace> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let project_root = find_project_root(&current_dir);
  match project_root {
    Some(ref root) => debug!("Project root: {}", root.display()),
    None => debug!("No project root found above {}", current_dir.display()),
  }
  Ok(Workspace::new(current_dir, project_root))
}

/// Walks upward from `start` to the first directory holding a VCS directory
/// or a recognised build manifest.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
  start
    .ancestors()
    .find(|dir| is_project_root(dir))
    .map(Path::to_path_buf)
}

fn is_project_root(dir: &Path) -> bool {
  VCS_MARKERS.iter().any(|marker| dir.join(marker).is_dir())
    || MANIFEST_MARKERS.iter().any(|marker| dir.join(marker).is_file())
}
