//! # Git Module
//!
//! Reads the bits of git configuration spdxify uses as fallbacks: the user's
//! name (copyright holder) and the `origin` remote (project home page).

use std::path::Path;

use git2::{Config, Repository};
use tracing::{debug, trace};

/// Returns `user.name` from the repository containing `dir`, or from the
/// user's global git configuration when `dir` is not inside a repository.
pub fn user_name(dir: &Path) -> Option<String> {
  let config = match Repository::discover(dir) {
    Ok(repo) => repo.config(),
    Err(e) => {
      trace!("No repository at {}: {}", dir.display(), e.message());
      Config::open_default()
    }
  };

  let name = config.ok()?.get_string("user.name").ok()?;
  let name = name.trim();
  if name.is_empty() {
    return None;
  }
  debug!("Using git user.name '{}'", name);
  Some(name.to_string())
}

/// Returns the URL of the `origin` remote of the repository containing `dir`.
pub fn origin_url(dir: &Path) -> Option<String> {
  let repo = Repository::discover(dir).ok()?;
  let remote = repo.find_remote("origin").ok()?;
  remote.url().map(str::to_string)
}

/// Turns a remote URL into a browsable `https://` home page.
///
/// Handles `https://` URLs and `git@host:owner/repo` shorthands; a trailing
/// `.git` is dropped. Anything else yields `None`.
pub fn homepage_from_remote(url: &str) -> Option<String> {
  let url = url.trim();
  let https = if url.starts_with("https://") {
    url.to_string()
  } else if let Some(rest) = url.strip_prefix("git@") {
    let (host, path) = rest.split_once(':')?;
    format!("https://{host}/{path}")
  } else {
    return None;
  };
  Some(https.strip_suffix(".git").unwrap_or(&https).to_string())
}
