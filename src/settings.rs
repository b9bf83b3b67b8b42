//! # Settings Module
//!
//! Resolves the copyright holder, SPDX id and year used for headers.
//!
//! Each value is taken from the first source that provides it:
//! 1. the explicit command-line flag
//! 2. `LICENSE.spdx` in the detected project root
//! 3. `LICENSE.spdx` in the current directory
//! 4. the git `user.name` (copyright only)
//!
//! The year falls back to the current calendar year; a missing SPDX id or
//! copyright holder is fatal.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::metadata::{METADATA_FILENAME, SpdxTags};

/// Header values resolved for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSettings {
  pub spdx_id: String,
  pub copyright: String,
  pub year: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
  #[error("No SPDX license id given; pass --spdx-id or create LICENSE.spdx (see `spdxify init`)")]
  MissingSpdxId,

  #[error("No copyright holder given; pass --copyright, set it in LICENSE.spdx, or configure git user.name")]
  MissingCopyright,

  #[error("The {field} must fit on one line, got {value:?}")]
  MultiLine { field: &'static str, value: String },
}

/// Everything [`resolve`] reads, gathered at the CLI boundary.
#[derive(Debug, Clone, Default)]
pub struct SettingsSources {
  pub spdx_id: Option<String>,
  pub copyright: Option<String>,
  pub year: Option<String>,
  pub project_root: Option<PathBuf>,
  pub current_dir: PathBuf,
  pub git_user: Option<String>,
  pub current_year: String,
}

/// Resolves [`HeaderSettings`] from `sources`.
pub fn resolve(sources: &SettingsSources) -> Result<HeaderSettings, SettingsError> {
  let documents = metadata_documents(sources.project_root.as_deref(), &sources.current_dir);

  let spdx_id = sources
    .spdx_id
    .clone()
    .or_else(|| documents.iter().find_map(|d| d.license_declared().map(str::to_string)))
    .ok_or(SettingsError::MissingSpdxId)?;

  let copyright = sources
    .copyright
    .clone()
    .or_else(|| documents.iter().find_map(|d| d.copyright_holder().map(str::to_string)))
    .or_else(|| sources.git_user.clone())
    .ok_or(SettingsError::MissingCopyright)?;

  single_line("SPDX license id", &spdx_id)?;
  single_line("copyright holder", &copyright)?;

  let year = sources.year.clone().unwrap_or_else(|| sources.current_year.clone());

  debug!("Resolved settings: spdx_id={}, copyright={}, year={}", spdx_id, copyright, year);
  Ok(HeaderSettings {
    spdx_id,
    copyright,
    year,
  })
}

/// Header lines are matched line by line, so a value with a line break
/// could never be recognised once written.
fn single_line(field: &'static str, value: &str) -> Result<(), SettingsError> {
  if value.contains(['\n', '\r']) {
    return Err(SettingsError::MultiLine {
      field,
      value: value.to_string(),
    });
  }
  Ok(())
}

/// Loads `LICENSE.spdx` from the project root, then the current directory.
///
/// Unreadable files are skipped with a warning.
fn metadata_documents(project_root: Option<&Path>, current_dir: &Path) -> Vec<SpdxTags> {
  let mut dirs: Vec<&Path> = project_root.into_iter().collect();
  if project_root != Some(current_dir) {
    dirs.push(current_dir);
  }

  dirs
    .into_iter()
    .filter_map(|dir| match SpdxTags::read(&dir.join(METADATA_FILENAME)) {
      Ok(tags) => tags,
      Err(e) => {
        warn!("{}", e);
        None
      }
    })
    .collect()
}

/// clap value parser for `--year`: exactly four ASCII digits.
pub fn parse_year(value: &str) -> Result<String, String> {
  if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
    Ok(value.to_string())
  } else {
    Err(format!("'{value}' is not a four-digit year"))
  }
}
