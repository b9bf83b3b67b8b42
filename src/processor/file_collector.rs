//! # File Collector Module
//!
//! Turns the paths given on the command line into the list of files the
//! processor works on:
//!
//! 1. directories are walked recursively, keeping files whose extension is in
//!    the requested set; explicit files are kept whatever their extension
//! 2. anything that is not a regular file is dropped
//! 3. paths matched by the [`ExclusionRules`] are dropped
//! 4. files whose header already matches are dropped
//!
//! Directory entries are visited in sorted order and a path reached through
//! several inputs is kept once, at its first occurrence.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::file_io::FileIO;
use crate::comment_syntax::CommentSyntax;
use crate::header::{self, HeaderSpec, HeaderState};
use crate::ignore::ExclusionRules;
use crate::settings::HeaderSettings;

/// A file selected for header processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
  /// Absolute path of the file
  pub path: PathBuf,
  /// Extension used to pick the comment prefix
  pub extension: String,
}

impl FileTarget {
  pub fn new(path: PathBuf) -> Self {
    let extension = header::extension_of(&path);
    Self { path, extension }
  }
}

/// Expands input paths into candidate files.
pub struct FileCollector {
  /// Directory relative inputs are resolved against
  current_dir: PathBuf,
  /// Extensions kept while walking directories
  extensions: HashSet<String>,
}

impl FileCollector {
  pub fn new(current_dir: PathBuf, extensions: &[String]) -> Self {
    Self {
      current_dir,
      extensions: extensions.iter().cloned().collect(),
    }
  }

  /// Expands `inputs` into files: directories recursively (extension
  /// filtered), files as themselves. Duplicates are dropped.
  pub fn collect(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
      let path = absolutize(input, &self.current_dir);
      let candidates = if path.is_dir() {
        self.traverse_directory(&path)
      } else if path.is_file() {
        vec![path]
      } else {
        warn!("Skipping {}: no such file or directory", input.display());
        continue;
      };

      for candidate in candidates {
        if seen.insert(candidate.clone()) {
          files.push(candidate);
        }
      }
    }

    files
  }

  /// Walks `dir` breadth-first and returns the files whose extension is in
  /// the requested set. Symlinks are not followed.
  pub fn traverse_directory(&self, dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut dirs_to_process = VecDeque::new();
    dirs_to_process.push_back(dir.to_path_buf());

    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();

    while let Some(current_dir) = dirs_to_process.pop_front() {
      let entries = match std::fs::read_dir(&current_dir) {
        Ok(entries) => entries,
        Err(e) => {
          warn!("Error reading directory {}: {}", current_dir.display(), e);
          continue;
        }
      };

      let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
      entries.sort_by_key(|entry| entry.file_name());

      for entry in entries {
        let Ok(file_type) = entry.file_type() else {
          continue;
        };
        let path = entry.path();

        if file_type.is_dir() {
          dirs_to_process.push_back(path);
        } else if file_type.is_file() {
          if self.extensions.contains(&header::extension_of(&path)) {
            files.push(path);
          }
        } else {
          trace!("Not following {}", path.display());
        }
      }
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }
}

/// Selects the files that need header work.
///
/// See the module docs for the individual steps. A file that cannot be read
/// while checking its header is kept so the processor reports the error.
pub fn select(
  inputs: &[PathBuf],
  collector: &FileCollector,
  rules: &ExclusionRules,
  settings: &HeaderSettings,
  syntax: &CommentSyntax,
) -> Vec<FileTarget> {
  collector
    .collect(inputs)
    .into_iter()
    .filter(|path| !path.is_dir())
    .filter(|path| !rules.is_excluded(path))
    .map(FileTarget::new)
    .filter(|target| {
      let spec = HeaderSpec::for_extension(settings, &target.extension, syntax);
      match FileIO::read_full_content(&target.path) {
        Ok(content) => header::classify(&content, &spec) != HeaderState::Matches,
        Err(e) => {
          debug!("Keeping unreadable file {}: {:#}", target.path.display(), e);
          true
        }
      }
    })
    .collect()
}

/// Resolves `path` against `current_dir` unless it is already absolute.
pub fn absolutize(path: &Path, current_dir: &Path) -> PathBuf {
  let joined = if path.is_absolute() {
    path.to_path_buf()
  } else {
    current_dir.join(path)
  };

  joined
    .components()
    .filter(|component| !matches!(component, std::path::Component::CurDir))
    .collect()
}
