//! # Metadata Module
//!
//! Reading and writing the `LICENSE.spdx` tag-value file that records a
//! project's declared license and copyright holder.
//!
//! ```text
//! SPDXVersion: SPDX-2.3
//! DataLicense: CC0-1.0
//! PackageName: my-lib
//! PackageOriginator: Organization: ACME
//! PackageHomePage: https://github.com/acme/my-lib
//! PackageLicenseDeclared: MIT
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

/// File name of the metadata document.
pub const METADATA_FILENAME: &str = "LICENSE.spdx";

pub const SPDX_VERSION: &str = "SPDX-2.3";
pub const DATA_LICENSE: &str = "CC0-1.0";

const TAG_SPDX_VERSION: &str = "SPDXVersion";
const TAG_DATA_LICENSE: &str = "DataLicense";
const TAG_PACKAGE_NAME: &str = "PackageName";
const TAG_ORIGINATOR: &str = "PackageOriginator";
const TAG_HOME_PAGE: &str = "PackageHomePage";
const TAG_LICENSE_DECLARED: &str = "PackageLicenseDeclared";

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
  #[error("Failed to read {path}: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  #[error("Failed to write {path}: {source}")]
  Write { path: PathBuf, source: std::io::Error },
}

/// Parsed `Tag: Value` pairs from a metadata file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpdxTags {
  tags: Vec<(String, String)>,
}

impl SpdxTags {
  /// Parses tag-value text. Lines without a `:` and `#` comments are skipped.
  pub fn parse(content: &str) -> Self {
    let tags = content
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty() && !line.starts_with('#'))
      .filter_map(|line| line.split_once(':'))
      .map(|(tag, value)| (tag.trim().to_string(), value.trim().to_string()))
      .collect();
    Self { tags }
  }

  /// Reads and parses `path`; returns `Ok(None)` if the file does not exist.
  pub fn read(path: &Path) -> Result<Option<Self>, MetadataError> {
    match fs::read_to_string(path) {
      Ok(content) => {
        debug!("Read metadata from {}", path.display());
        Ok(Some(Self::parse(&content)))
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(source) => Err(MetadataError::Read {
        path: path.to_path_buf(),
        source,
      }),
    }
  }

  /// First non-empty value recorded for `tag`.
  pub fn get(&self, tag: &str) -> Option<&str> {
    self
      .tags
      .iter()
      .find(|(t, v)| t == tag && !v.is_empty())
      .map(|(_, v)| v.as_str())
  }

  /// The declared SPDX license id.
  pub fn license_declared(&self) -> Option<&str> {
    self.get(TAG_LICENSE_DECLARED)
  }

  /// The copyright holder, without an `Organization:` / `Person:` qualifier.
  pub fn copyright_holder(&self) -> Option<&str> {
    let originator = self.get(TAG_ORIGINATOR)?;
    let holder = ["Organization:", "Person:"]
      .iter()
      .find_map(|q| originator.strip_prefix(q))
      .unwrap_or(originator)
      .trim();
    (!holder.is_empty()).then_some(holder)
  }
}

/// The metadata written by `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxDocument {
  pub package_name: String,
  pub copyright: String,
  pub home_page: Option<String>,
  pub license_id: String,
}

impl SpdxDocument {
  /// Renders the document as tag-value text.
  pub fn render(&self) -> String {
    let mut out = String::new();
    out.push_str(&format!("{TAG_SPDX_VERSION}: {SPDX_VERSION}\n"));
    out.push_str(&format!("{TAG_DATA_LICENSE}: {DATA_LICENSE}\n"));
    out.push_str(&format!("{TAG_PACKAGE_NAME}: {}\n", self.package_name));
    out.push_str(&format!("{TAG_ORIGINATOR}: Organization: {}\n", self.copyright));
    if let Some(ref home_page) = self.home_page {
      out.push_str(&format!("{TAG_HOME_PAGE}: {home_page}\n"));
    }
    out.push_str(&format!("{TAG_LICENSE_DECLARED}: {}\n", self.license_id));
    out
  }

  /// Writes the document to `dir/LICENSE.spdx` and returns the path.
  pub fn write_to(&self, dir: &Path) -> Result<PathBuf, MetadataError> {
    let path = dir.join(METADATA_FILENAME);
    fs::write(&path, self.render()).map_err(|source| MetadataError::Write {
      path: path.clone(),
      source,
    })?;
    Ok(path)
  }
}
