//! Gitignore-style pattern matching against relative paths.
//!
//! This is a deliberately loose subset of gitignore:
//! - blank and `#` lines never match
//! - `dir/` matches any path containing `dir` as a substring
//! - patterns with `*` or `?` become a regex anchored only at the end, so they
//!   match a suffix of the path
//! - anything else must equal the relative path exactly
//!
//! There is no `!` negation and no `**` special-casing.

use regex::Regex;
use tracing::debug;

/// A single compiled exclusion pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
  /// Blank line or comment; never matches
  Inert,
  /// Trailing-slash pattern, stored without the slash
  Directory(String),
  /// Wildcard pattern compiled to an end-anchored regex
  Wildcard(Regex),
  /// Plain pattern compared for equality
  Exact(String),
}

impl Pattern {
  /// Compiles a raw pattern line.
  ///
  /// A wildcard pattern whose translated expression is not a valid regex
  /// compiles to [`Pattern::Inert`].
  pub fn parse(raw: &str) -> Self {
    if raw.trim().is_empty() || raw.starts_with('#') {
      return Pattern::Inert;
    }

    if let Some(dir) = raw.strip_suffix('/') {
      return Pattern::Directory(dir.to_string());
    }

    if raw.contains('*') || raw.contains('?') {
      return match Regex::new(&wildcard_to_regex(raw)) {
        Ok(regex) => Pattern::Wildcard(regex),
        Err(e) => {
          debug!("Ignoring unusable pattern '{}': {}", raw, e);
          Pattern::Inert
        }
      };
    }

    Pattern::Exact(raw.to_string())
  }

  /// Returns `true` if `relative_path` is matched by this pattern.
  pub fn matches(&self, relative_path: &str) -> bool {
    match self {
      Pattern::Inert => false,
      Pattern::Directory(dir) => relative_path.contains(dir.as_str()),
      Pattern::Wildcard(regex) => regex.is_match(relative_path),
      Pattern::Exact(exact) => relative_path == exact,
    }
  }
}

/// Translates `*` and `?` to regex and escapes `.`; the result is anchored at
/// the end only.
fn wildcard_to_regex(pattern: &str) -> String {
  let mut expr = String::with_capacity(pattern.len() + 8);
  for c in pattern.chars() {
    match c {
      '.' => expr.push_str("\\."),
      '*' => expr.push_str(".*"),
      '?' => expr.push('.'),
      other => expr.push(other),
    }
  }
  expr.push('$');
  expr
}

/// Evaluates `relative_path` against a single raw pattern.
pub fn matches(relative_path: &str, pattern: &str) -> bool {
  Pattern::parse(pattern).matches(relative_path)
}
