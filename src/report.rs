//! # Report Module
//!
//! Per-file results of a header run, their aggregate [`Summary`], and the
//! JSON report written by `--report-json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Whether the header was absent or stale
  pub header_was_missing: bool,
  /// Whether the file was rewritten
  pub was_modified: bool,
  /// Error message if reading or writing the file failed
  #[serde(skip_serializing_if = "Option::is_none", default)]
  pub error: Option<String>,
}

impl ProcessResult {
  /// The header already matched; nothing to do.
  pub fn unchanged(path: PathBuf) -> Self {
    Self {
      path,
      header_was_missing: false,
      was_modified: false,
      error: None,
    }
  }

  /// The header is missing or stale and was left alone (check mode).
  pub fn needs_header(path: PathBuf) -> Self {
    Self {
      path,
      header_was_missing: true,
      was_modified: false,
      error: None,
    }
  }

  /// The header was missing or stale and the file was rewritten.
  pub fn modified(path: PathBuf) -> Self {
    Self {
      path,
      header_was_missing: true,
      was_modified: true,
      error: None,
    }
  }

  /// Reading or writing the file failed.
  pub fn failed(path: PathBuf, header_was_missing: bool, error: &anyhow::Error) -> Self {
    Self {
      path,
      header_was_missing,
      was_modified: false,
      error: Some(format!("{error:#}")),
    }
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Aggregate counts over a batch of [`ProcessResult`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  /// Files considered
  pub total: usize,
  /// Files whose header already matched and that had no error
  pub ok: usize,
  /// Files whose header was absent or stale
  pub needs_header: usize,
  /// Files rewritten
  pub modified: usize,
  /// Files that failed to read or write
  pub errors: usize,
}

impl Summary {
  pub fn from_results(results: &[ProcessResult]) -> Self {
    let mut summary = Self {
      total: results.len(),
      ..Self::default()
    };

    for result in results {
      if !result.header_was_missing && result.error.is_none() {
        summary.ok += 1;
      }
      if result.header_was_missing {
        summary.needs_header += 1;
      }
      if result.was_modified {
        summary.modified += 1;
      }
      if result.error.is_some() {
        summary.errors += 1;
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  summary: &'a Summary,
  files: &'a [ProcessResult],
}

/// Writes a JSON report of a run.
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Writes `{generated_at, summary, files}` as pretty-printed JSON.
  pub fn generate(&self, files: &[ProcessResult], summary: &Summary) -> Result<()> {
    let content = Self::render(files, summary)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  fn render(files: &[ProcessResult], summary: &Summary) -> Result<String> {
    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
      summary,
      files,
    };
    Ok(serde_json::to_string_pretty(&report)?)
  }
}
