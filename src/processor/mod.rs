//! # Processor Module
//!
//! Runs header reconciliation over a batch of files.
//!
//! The module is organized into submodules:
//! - [`file_io`] - whole-file reads and replace-in-place writes
//! - [`file_collector`] - expanding input paths into [`FileTarget`]s
//!
//! [`Processor::run`] handles each file on its own: a failure to read or
//! write one file is recorded in its [`ProcessResult`] and the batch carries
//! on. Check mode never writes.

pub mod file_collector;
pub mod file_io;

use std::path::{Path, PathBuf};

pub use file_collector::{FileCollector, FileTarget, select};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::comment_syntax::CommentSyntax;
use crate::diff::DiffManager;
use crate::header::{self, HeaderSpec};
use crate::output;
use crate::report::{ProcessResult, Summary};
use crate::settings::HeaderSettings;

/// What a run does with files whose header is absent or stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Report only
  Check,
  /// Insert or replace headers in place
  Fix,
}

/// Header reconciliation over [`FileTarget`]s.
pub struct Processor {
  settings: HeaderSettings,
  syntax: CommentSyntax,
  diff_manager: Option<DiffManager>,
  /// Paths are shown relative to this directory
  display_root: Option<PathBuf>,
}

impl Processor {
  pub const fn new(settings: HeaderSettings, syntax: CommentSyntax) -> Self {
    Self {
      settings,
      syntax,
      diff_manager: None,
      display_root: None,
    }
  }

  /// Shows a diff of the would-be rewrite for each file in check mode.
  pub fn with_diff_manager(mut self, diff_manager: DiffManager) -> Self {
    self.diff_manager = Some(diff_manager);
    self
  }

  pub fn with_display_root(mut self, root: PathBuf) -> Self {
    self.display_root = Some(root);
    self
  }

  /// Processes every target in order and returns the aggregate summary
  /// together with one result per target.
  pub fn run(&self, targets: &[FileTarget], mode: Mode) -> (Summary, Vec<ProcessResult>) {
    let results: Vec<ProcessResult> = targets.iter().map(|target| self.process_file(target, mode)).collect();
    let summary = Summary::from_results(&results);
    debug!(
      "Processed {} files: {} need headers, {} modified, {} errors",
      summary.total, summary.needs_header, summary.modified, summary.errors
    );
    (summary, results)
  }

  fn display_root(&self) -> Option<&Path> {
    self.display_root.as_deref()
  }

  fn process_file(&self, target: &FileTarget, mode: Mode) -> ProcessResult {
    let path = target.path.clone();

    let content = match FileIO::read_full_content(&target.path) {
      Ok(content) => content,
      Err(e) => {
        output::print_file_error(&target.path, &format!("{e:#}"), self.display_root());
        return ProcessResult::failed(path, false, &e);
      }
    };

    let spec = HeaderSpec::for_extension(&self.settings, &target.extension, &self.syntax);
    let state = header::classify(&content, &spec);
    if !state.needs_header() {
      trace!("Header OK: {}", target.path.display());
      return ProcessResult::unchanged(path);
    }

    match mode {
      Mode::Check => {
        output::print_needs_header(&target.path, &state, self.display_root());
        if let Some(ref diff_manager) = self.diff_manager {
          diff_manager.display_diff(&target.path, &content, &header::rewrite(&content, &spec));
        }
        ProcessResult::needs_header(path)
      }
      Mode::Fix => {
        let updated = header::rewrite(&content, &spec);
        match FileIO::write_file(&target.path, &updated) {
          Ok(()) => {
            output::print_fixed(&target.path, &state, self.display_root());
            ProcessResult::modified(path)
          }
          Err(e) => {
            output::print_file_error(&target.path, &format!("{e:#}"), self.display_root());
            ProcessResult::failed(path, true, &e)
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn processor() -> Processor {
    Processor::new(
      HeaderSettings {
        spdx_id: "MIT".to_string(),
        copyright: "ACME".to_string(),
        year: "2024".to_string(),
      },
      CommentSyntax::builtin(),
    )
  }

  fn target(dir: &Path, name: &str, content: &str) -> FileTarget {
    let path = dir.join(name);
    fs::write(&path, content).expect("write file");
    FileTarget::new(path)
  }

  #[test]
  fn test_check_never_writes() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let bare = target(temp_dir.path(), "bare.clj", "(ns bare)\n");
    let stale = target(
      temp_dir.path(),
      "stale.py",
      "# Copyright © 2019 Old\n# SPDX-License-Identifier: GPL-3.0\nx = 1\n",
    );

    let (summary, results) = processor().run(&[bare.clone(), stale.clone()], Mode::Check);

    assert_eq!(
      summary,
      Summary {
        total: 2,
        ok: 0,
        needs_header: 2,
        modified: 0,
        errors: 0,
      }
    );
    assert!(results.iter().all(|r| r.header_was_missing && !r.was_modified));
    assert_eq!(fs::read_to_string(&bare.path).expect("read"), "(ns bare)\n");
    assert!(fs::read_to_string(&stale.path).expect("read").contains("GPL-3.0"));
  }

  #[test]
  fn test_fix_rewrites_then_is_noop() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let targets = vec![
      target(temp_dir.path(), "a.clj", "(ns a)\n"),
      target(temp_dir.path(), "run.py", "#!/usr/bin/env python3\nprint(1)\n"),
    ];

    let (first, _) = processor().run(&targets, Mode::Fix);
    assert_eq!(first.modified, 2);

    assert_eq!(
      fs::read_to_string(&targets[1].path).expect("read"),
      "#!/usr/bin/env python3\n# Copyright © 2024 ACME\n# SPDX-License-Identifier: MIT\nprint(1)\n"
    );

    let (second, results) = processor().run(&targets, Mode::Fix);
    assert_eq!(second.modified, 0);
    assert_eq!(second.needs_header, 0);
    assert!(results.iter().all(|r| r.error.is_none()));
  }

  #[test]
  fn test_read_error_is_isolated() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = FileTarget::new(temp_dir.path().join("gone.clj"));
    let present = target(temp_dir.path(), "here.clj", "(ns here)\n");

    let (summary, results) = processor().run(&[missing, present], Mode::Fix);

    assert_eq!(summary.total, 2);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.modified, 1);
    assert!(results[0].error.as_deref().is_some_and(|e| e.contains("Failed to read file")));
  }

  #[test]
  fn test_unknown_extension_uses_fallback_prefix() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let odd = target(temp_dir.path(), "notes.zzz", "body\n");

    processor().run(std::slice::from_ref(&odd), Mode::Fix);

    assert!(
      fs::read_to_string(&odd.path)
        .expect("read")
        .starts_with(";; Copyright © 2024 ACME\n")
    );
  }
}
