//! # Header Module
//!
//! Rendering, classification and rewriting of the two-line copyright/SPDX
//! header:
//!
//! ```text
//! ;; Copyright © 2024 ACME
//! ;; SPDX-License-Identifier: Apache-2.0
//! ```
//!
//! A leading shebang line is always kept as the first line; the header goes
//! directly below it.
//!
//! ## Example
//!
//! ```rust
//! use spdxify::header::{HeaderSpec, HeaderState, classify, rewrite};
//!
//! let spec = HeaderSpec::new("ACME", "2024", "Apache-2.0", "#");
//! let fixed = rewrite("#!/usr/bin/env python3\nprint(1)\n", &spec);
//! assert_eq!(
//!   fixed,
//!   "#!/usr/bin/env python3\n# Copyright © 2024 ACME\n# SPDX-License-Identifier: Apache-2.0\nprint(1)\n"
//! );
//! assert_eq!(classify(&fixed, &spec), HeaderState::Matches);
//! ```

use std::path::Path;

use crate::comment_syntax::CommentSyntax;
use crate::settings::HeaderSettings;

const COPYRIGHT_MARKER: &str = "Copyright";
const SPDX_MARKER: &str = "SPDX-License-Identifier";
const SHEBANG: &str = "#!";

/// The exact header expected for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
  pub copyright: String,
  pub year: String,
  pub spdx_id: String,
  pub comment_prefix: String,
}

impl HeaderSpec {
  pub fn new(copyright: &str, year: &str, spdx_id: &str, comment_prefix: &str) -> Self {
    Self {
      copyright: copyright.to_string(),
      year: year.to_string(),
      spdx_id: spdx_id.to_string(),
      comment_prefix: comment_prefix.to_string(),
    }
  }

  /// Builds the spec for `extension`, taking the prefix from `syntax`.
  pub fn for_extension(settings: &HeaderSettings, extension: &str, syntax: &CommentSyntax) -> Self {
    Self::new(
      &settings.copyright,
      &settings.year,
      &settings.spdx_id,
      syntax.prefix_for(extension),
    )
  }

  fn copyright_line(&self) -> String {
    format!("{} {} © {} {}", self.comment_prefix, COPYRIGHT_MARKER, self.year, self.copyright)
  }

  fn spdx_line(&self) -> String {
    format!("{} {}: {}", self.comment_prefix, SPDX_MARKER, self.spdx_id)
  }
}

/// Header state of a file's content relative to a [`HeaderSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderState {
  /// No recognisable header; one will be inserted
  Absent,
  /// Header present and identical to the expected one
  Matches,
  /// Header-shaped lines with different content; they will be replaced
  StaleReplaceable { line1: String, line2: String },
}

impl HeaderState {
  pub const fn needs_header(&self) -> bool {
    !matches!(self, HeaderState::Matches)
  }
}

/// Renders the two header lines, each terminated by `\n`.
pub fn render(spec: &HeaderSpec) -> String {
  format!("{}\n{}\n", spec.copyright_line(), spec.spdx_line())
}

/// Returns the extension used for comment-syntax lookup: the case-sensitive
/// text after the last `.` of the file name, or an empty string when the
/// name has no `.`.
pub fn extension_of(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy())
    .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
    .unwrap_or_default()
}

fn has_shebang(content: &str) -> bool {
  content.starts_with(SHEBANG)
}

/// Classifies the header state of `content`.
///
/// The candidate header is lines 0 and 1, or lines 1 and 2 when the first
/// line is a shebang.
pub fn classify(content: &str, spec: &HeaderSpec) -> HeaderState {
  let offset = usize::from(has_shebang(content));
  let mut candidates = content.lines().skip(offset);

  let (Some(line1), Some(line2)) = (candidates.next(), candidates.next()) else {
    return HeaderState::Absent;
  };

  if line1 == spec.copyright_line() && line2 == spec.spdx_line() {
    return HeaderState::Matches;
  }

  let prefix = spec.comment_prefix.as_str();
  if line1.contains(COPYRIGHT_MARKER) && line1.contains(prefix) && line2.contains(SPDX_MARKER) && line2.contains(prefix)
  {
    return HeaderState::StaleReplaceable {
      line1: line1.to_string(),
      line2: line2.to_string(),
    };
  }

  HeaderState::Absent
}

/// Splits off the shebang line (including its newline, if any).
fn split_shebang(content: &str) -> (&str, &str) {
  if !has_shebang(content) {
    return ("", content);
  }
  match content.find('\n') {
    Some(end) => content.split_at(end + 1),
    None => (content, ""),
  }
}

/// Drops the first `count` lines (and their newlines) from `content`.
fn skip_lines(content: &str, count: usize) -> &str {
  let mut rest = content;
  for _ in 0..count {
    rest = match rest.find('\n') {
      Some(end) => &rest[end + 1..],
      None => "",
    };
  }
  rest
}

/// Returns `content` with the expected header inserted or a stale one
/// replaced.
///
/// Content that already matches is returned unchanged. Every byte outside the
/// two header lines is preserved.
pub fn rewrite(content: &str, spec: &HeaderSpec) -> String {
  let state = classify(content, spec);
  let (shebang, body) = split_shebang(content);

  let body = match state {
    HeaderState::Matches => return content.to_string(),
    HeaderState::StaleReplaceable { .. } => skip_lines(body, 2),
    HeaderState::Absent => body,
  };

  let header = render(spec);
  let mut out = String::with_capacity(shebang.len() + header.len() + body.len() + 1);
  out.push_str(shebang);
  if !shebang.is_empty() && !shebang.ends_with('\n') {
    out.push('\n');
  }
  out.push_str(&header);
  out.push_str(body);
  out
}
