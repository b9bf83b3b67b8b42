//! # Catalog Module
//!
//! Access to the SPDX license list: the index of known license ids and the
//! full text of each license.
//!
//! Documents are read from an on-disk cache first and fetched from the
//! `spdx/license-list-data` repository only when missing; freshly fetched
//! documents are written back to the cache on a best-effort basis.
//!
//! Cache layout:
//!
//! ```text
//! <cache dir>/licenses.json
//! <cache dir>/details/<SPDX-ID>.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

/// Index of all licenses in the SPDX license list.
pub const LICENSES_URL: &str = "https://raw.githubusercontent.com/spdx/license-list-data/main/json/licenses.json";

/// Directory holding one `<id>.json` document per license.
pub const DETAILS_BASE_URL: &str = "https://raw.githubusercontent.com/spdx/license-list-data/main/json/details";

/// Environment variable pointing at a pre-populated cache directory.
pub const CACHE_DIR_ENV_VAR: &str = "SPDXIFY_CACHE_DIR";

const INDEX_FILENAME: &str = "licenses.json";
const DETAILS_DIRNAME: &str = "details";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Placeholders replaced in license texts, with the value they receive.
const YEAR_PLACEHOLDERS: &[&str] = &["<year>", "<YEAR>"];
const HOLDER_PLACEHOLDERS: &[&str] = &["<copyright holder(s)>", "<COPYRIGHT HOLDERS>", "<copyright holders>"];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("Unknown SPDX license id '{0}'")]
  LicenseNotFound(String),

  #[error("Failed to fetch {url}: {source}")]
  Fetch { url: String, source: reqwest::Error },

  #[error("Failed to parse {name}: {source}")]
  Parse { name: String, source: serde_json::Error },
}

/// Where the catalog is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
  pub cache_dir: PathBuf,
}

impl CatalogOptions {
  pub fn new(cache_dir: PathBuf) -> Self {
    Self { cache_dir }
  }

  /// Uses `env_cache_dir` (from `SPDXIFY_CACHE_DIR`) when set, otherwise
  /// `<user cache dir>/spdxify`.
  pub fn resolve(env_cache_dir: Option<PathBuf>) -> Self {
    let cache_dir = env_cache_dir
      .filter(|dir| !dir.as_os_str().is_empty())
      .or_else(|| dirs::cache_dir().map(|dir| dir.join("spdxify")))
      .unwrap_or_else(|| std::env::temp_dir().join("spdxify"));
    debug!("License cache directory: {}", cache_dir.display());
    Self { cache_dir }
  }

  fn index_path(&self) -> PathBuf {
    self.cache_dir.join(INDEX_FILENAME)
  }

  fn details_path(&self, id: &str) -> PathBuf {
    self.cache_dir.join(DETAILS_DIRNAME).join(format!("{id}.json"))
  }
}

/// One entry of the license index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEntry {
  pub license_id: String,
  pub name: String,
  #[serde(default)]
  pub is_deprecated_license_id: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseIndex {
  #[serde(default)]
  license_list_version: Option<String>,
  licenses: Vec<LicenseEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicenseDetails {
  license_text: String,
}

/// The SPDX license index.
#[derive(Debug, Clone)]
pub struct LicenseCatalog {
  version: Option<String>,
  licenses: Vec<LicenseEntry>,
}

impl LicenseCatalog {
  /// Loads the index from the cache, fetching it if absent.
  pub fn load(options: &CatalogOptions) -> Result<Self, CatalogError> {
    let raw = cached_or_fetch(&options.index_path(), LICENSES_URL)?;
    let catalog = Self::from_json(&raw)?;
    info!(
      "Loaded {} licenses (list version {})",
      catalog.len(),
      catalog.version.as_deref().unwrap_or("unknown")
    );
    Ok(catalog)
  }

  /// Parses a `licenses.json` document.
  pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
    let index: LicenseIndex = serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
      name: INDEX_FILENAME.to_string(),
      source,
    })?;
    Ok(Self {
      version: index.license_list_version,
      licenses: index.licenses,
    })
  }

  pub fn len(&self) -> usize {
    self.licenses.len()
  }

  pub fn is_empty(&self) -> bool {
    self.licenses.is_empty()
  }

  /// Finds the entry with exactly this id.
  pub fn find(&self, id: &str) -> Option<&LicenseEntry> {
    self.licenses.iter().find(|entry| entry.license_id == id)
  }

  /// Like [`find`](Self::find), failing with [`CatalogError::LicenseNotFound`].
  pub fn require(&self, id: &str) -> Result<&LicenseEntry, CatalogError> {
    self.find(id).ok_or_else(|| CatalogError::LicenseNotFound(id.to_string()))
  }

  /// Up to `limit` current license ids resembling `query`, ignoring case:
  /// exact matches first, then prefix matches, then ids containing it.
  pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&str> {
    let query = query.to_ascii_lowercase();
    if query.is_empty() {
      return Vec::new();
    }

    let rank = |id: &str| {
      let id = id.to_ascii_lowercase();
      if id == query {
        Some(0)
      } else if id.starts_with(&query) {
        Some(1)
      } else if id.contains(&query) {
        Some(2)
      } else {
        None
      }
    };

    let mut ranked: Vec<(u8, &str)> = self
      .licenses
      .iter()
      .filter(|entry| !entry.is_deprecated_license_id)
      .filter_map(|entry| rank(&entry.license_id).map(|r| (r, entry.license_id.as_str())))
      .collect();
    ranked.sort();
    ranked.into_iter().take(limit).map(|(_, id)| id).collect()
  }

  /// The license text of `entry`, from the cache or fetched.
  pub fn license_text(&self, entry: &LicenseEntry, options: &CatalogOptions) -> Result<String, CatalogError> {
    let id = &entry.license_id;
    let url = format!("{DETAILS_BASE_URL}/{id}.json");
    let raw = cached_or_fetch(&options.details_path(id), &url)?;
    let details: LicenseDetails = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
      name: format!("{DETAILS_DIRNAME}/{id}.json"),
      source,
    })?;
    Ok(details.license_text)
  }
}

/// Fills the year and copyright holder placeholders of a license text.
pub fn substitute_placeholders(text: &str, year: &str, holder: &str) -> String {
  let with_year = YEAR_PLACEHOLDERS
    .iter()
    .fold(text.to_string(), |acc, placeholder| acc.replace(placeholder, year));
  HOLDER_PLACEHOLDERS
    .iter()
    .fold(with_year, |acc, placeholder| acc.replace(placeholder, holder))
}

fn cached_or_fetch(cache_path: &Path, url: &str) -> Result<String, CatalogError> {
  if let Ok(raw) = std::fs::read_to_string(cache_path) {
    debug!("Using cached {}", cache_path.display());
    return Ok(raw);
  }

  debug!("Fetching {}", url);
  let body = fetch_text(url)?;
  if let Err(e) = write_cache(cache_path, &body) {
    debug!("Could not cache {}: {}", cache_path.display(), e);
  }
  Ok(body)
}

fn fetch_text(url: &str) -> Result<String, CatalogError> {
  let fetch_error = |source| CatalogError::Fetch {
    url: url.to_string(),
    source,
  };
  let client = reqwest::blocking::Client::builder()
    .timeout(FETCH_TIMEOUT)
    .build()
    .map_err(fetch_error)?;
  let resp = client
    .get(url)
    .send()
    .and_then(reqwest::blocking::Response::error_for_status)
    .map_err(fetch_error)?;
  resp.text().map_err(fetch_error)
}

fn write_cache(path: &Path, body: &str) -> std::io::Result<()> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, body)
}
