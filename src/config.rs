//! # Configuration Module
//!
//! Optional per-project configuration in `.spdxify.toml`:
//!
//! ```toml
//! # Replaces the default extension set when no --extension is given
//! extensions = ["clj", "cljc", "cljs", "edn"]
//!
//! # Appended after --exclude patterns
//! exclude = ["resources/public/"]
//!
//! # Extension -> line-comment prefix overrides
//! [comment-styles]
//! edn = ";;"
//! ```
//!
//! The file is found via `--config`, then the `SPDXIFY_CONFIG` environment
//! variable, then the project root.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::comment_syntax::CommentSyntax;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".spdxify.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "SPDXIFY_CONFIG";

/// Contents of `.spdxify.toml`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Extensions scanned inside directories when no `--extension` is given.
  #[serde(default)]
  pub extensions: Option<Vec<String>>,

  /// Extra exclusion patterns, evaluated after the CLI ones.
  #[serde(default)]
  pub exclude: Vec<String>,

  /// Line-comment prefix overrides keyed by extension (no leading dot).
  #[serde(default, rename = "comment-styles")]
  pub comment_styles: HashMap<String, String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is present but unusable.
  #[error("Invalid entry '{key}': {message}")]
  Invalid { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} comment style overrides", config.comment_styles.len());

    Ok(config)
  }

  /// Checks that:
  /// - extensions and comment-style keys have no leading dot
  /// - extensions and prefixes are non-empty
  fn validate(&self) -> Result<(), ConfigError> {
    for ext in self.extensions.iter().flatten() {
      check_extension(ext)?;
    }

    for (ext, prefix) in &self.comment_styles {
      check_extension(ext)?;
      if prefix.trim().is_empty() {
        return Err(ConfigError::Invalid {
          key: ext.clone(),
          message: "comment prefix cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }

  /// Comment syntax table with this file's overrides applied.
  pub fn comment_syntax(&self) -> CommentSyntax {
    CommentSyntax::with_overrides(self.comment_styles.clone())
  }
}

fn check_extension(ext: &str) -> Result<(), ConfigError> {
  if ext.is_empty() {
    return Err(ConfigError::Invalid {
      key: ext.to_string(),
      message: "extension cannot be empty".to_string(),
    });
  }
  if ext.starts_with('.') {
    return Err(ConfigError::Invalid {
      key: ext.to_string(),
      message: "extension should not include leading dot".to_string(),
    });
  }
  Ok(())
}

/// Discover the configuration file path.
///
/// Order: `explicit_path` (from `--config`), then `env_path` (from
/// `SPDXIFY_CONFIG`), then `.spdxify.toml` in `root`.
pub fn discover_config_path(explicit_path: Option<&Path>, env_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Some(path) = env_path {
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, path.display());
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using project config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load the discovered configuration, or `None` if there is none or
/// `no_config` is set.
pub fn load_config(
  explicit_path: Option<&Path>,
  env_path: Option<&Path>,
  root: &Path,
  no_config: bool,
) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, env_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
