//! # Diff Module
//!
//! Line diffs between a file's current content and what `fix` would write,
//! shown by `check --show-diff`.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Renders header diffs to stderr.
pub struct DiffManager {
  /// Whether to show diffs in check mode
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Prints the diff between `original` and `new` for `path` to stderr,
  /// if diffs are enabled.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    eprintln!("Diff for {}:", path.display());
    for (tag, line) in diff_lines(original, new) {
      match tag {
        ChangeTag::Delete => eprint!("{}", line.if_supports_color(Stream::Stderr, |l| l.red())),
        ChangeTag::Insert => eprint!("{}", line.if_supports_color(Stream::Stderr, |l| l.green())),
        ChangeTag::Equal => eprint!("{}", line),
      }
    }
    eprintln!();
  }
}

/// Each change as `(tag, "<sign><line>")`; lines missing a trailing newline
/// get one so the output stays line-oriented.
fn diff_lines(original: &str, new: &str) -> Vec<(ChangeTag, String)> {
  TextDiff::from_lines(original, new)
    .iter_all_changes()
    .map(|change| {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      let mut line = format!("{}{}", sign, change.value());
      if change.missing_newline() {
        line.push('\n');
      }
      (change.tag(), line)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn render(original: &str, new: &str) -> String {
    diff_lines(original, new).into_iter().map(|(_, line)| line).collect()
  }

  #[test]
  fn test_inserted_header() {
    let original = "(ns a)\n";
    let new = ";; Copyright © 2024 ACME\n;; SPDX-License-Identifier: MIT\n(ns a)\n";

    assert_eq!(
      render(original, new),
      concat!(
        "+;; Copyright © 2024 ACME\n",
        "+;; SPDX-License-Identifier: MIT\n",
        " (ns a)\n",
      )
    );
  }

  #[test]
  fn test_replaced_header_without_trailing_newline() {
    let original = ";; Copyright © 2019 Old\n;; SPDX-License-Identifier: EPL-2.0\n(ns a)";
    let new = ";; Copyright © 2024 ACME\n;; SPDX-License-Identifier: MIT\n(ns a)";

    let diff = render(original, new);
    assert!(diff.contains("-;; Copyright © 2019 Old\n"));
    assert!(diff.contains("+;; SPDX-License-Identifier: MIT\n"));
    assert!(diff.ends_with(" (ns a)\n"));
  }
}
