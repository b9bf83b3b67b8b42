//! # Ignore Module
//!
//! Decides whether a candidate file is excluded from header processing.
//!
//! Patterns come from two sources, evaluated in order:
//! - the `.gitignore` in the base directory (one pattern per non-blank,
//!   non-comment line)
//! - user-supplied `--exclude` patterns (and `.spdxify.toml` excludes)
//!
//! A path is excluded as soon as any pattern matches its path relative to the
//! base directory. See [`pattern`] for the matching rules.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use spdxify::ignore::ExclusionRules;
//!
//! let rules = ExclusionRules::load(Path::new("."), &["*.generated.clj".to_string()]);
//! assert!(rules.is_excluded(Path::new("src/foo.generated.clj")));
//! ```

pub mod pattern;

use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub use pattern::{Pattern, matches};
use tracing::{debug, trace};

/// Name of the ignore file read from the base directory.
pub const GITIGNORE_FILENAME: &str = ".gitignore";

/// Ordered exclusion patterns scoped to one base directory.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
  /// Directory that candidate paths are relativized against
  base_dir: PathBuf,
  /// Raw pattern text alongside its compiled form, gitignore entries first
  patterns: Vec<(String, Pattern)>,
}

impl ExclusionRules {
  /// Builds the rule set from `base_dir/.gitignore` followed by
  /// `extra_patterns`.
  ///
  /// A missing or unreadable `.gitignore` contributes no patterns.
  pub fn load(base_dir: &Path, extra_patterns: &[String]) -> Self {
    let mut raw = read_gitignore(base_dir);
    raw.extend(extra_patterns.iter().cloned());
    Self::from_patterns(base_dir, raw)
  }

  /// Builds the rule set from an explicit pattern list.
  pub fn from_patterns(base_dir: &Path, patterns: Vec<String>) -> Self {
    let patterns = patterns
      .into_iter()
      .map(|raw| {
        let compiled = Pattern::parse(&raw);
        (raw, compiled)
      })
      .collect();

    Self {
      base_dir: base_dir.to_path_buf(),
      patterns,
    }
  }

  /// Number of patterns in the rule set, including inert ones.
  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Returns `true` if any pattern matches `path` relative to the base
  /// directory.
  pub fn is_excluded(&self, path: &Path) -> bool {
    let relative = relative_path_string(path, &self.base_dir);
    for (raw, pattern) in &self.patterns {
      if pattern.matches(&relative) {
        trace!("Excluding: {} (matches '{}')", relative, raw);
        return true;
      }
    }
    false
  }
}

/// One-shot form of [`ExclusionRules::is_excluded`]; re-reads `.gitignore` on
/// every call.
pub fn is_excluded(path: &Path, base_dir: &Path, extra_patterns: &[String]) -> bool {
  ExclusionRules::load(base_dir, extra_patterns).is_excluded(path)
}

fn read_gitignore(base_dir: &Path) -> Vec<String> {
  let path = base_dir.join(GITIGNORE_FILENAME);
  match fs::read_to_string(&path) {
    Ok(content) => {
      let patterns: Vec<String> = content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim_start().is_empty() && !line.trim_start().starts_with('#'))
        .map(str::to_string)
        .collect();
      debug!("Loaded {} patterns from {}", patterns.len(), path.display());
      patterns
    }
    Err(e) => {
      trace!("No usable {}: {}", path.display(), e);
      Vec::new()
    }
  }
}

/// Renders `path` relative to `base_dir` with `/` separators.
///
/// Relative inputs are taken as already relative to `base_dir`; a leading
/// `./` is dropped.
pub fn relative_path_string(path: &Path, base_dir: &Path) -> String {
  let relative: Cow<'_, Path> = if path.is_absolute() {
    match pathdiff::diff_paths(path, base_dir) {
      Some(rel) => Cow::Owned(rel),
      None => Cow::Borrowed(path),
    }
  } else {
    Cow::Borrowed(path)
  };

  let parts: Vec<String> = relative
    .components()
    .filter(|c| !matches!(c, Component::CurDir))
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect();
  parts.join("/")
}
