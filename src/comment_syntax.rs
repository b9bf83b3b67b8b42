//! # Comment Syntax Module
//!
//! Maps a file extension to the line-comment prefix used for that language.
//! Headers are always rendered as single-line comments, so only the prefix is
//! needed (no block markers).
//!
//! ## Example
//!
//! ```rust
//! use spdxify::comment_syntax::{CommentSyntax, FALLBACK_PREFIX};
//!
//! let syntax = CommentSyntax::builtin();
//! assert_eq!(syntax.prefix_for("py"), "#");
//! assert_eq!(syntax.prefix_for("clj"), ";;");
//! assert_eq!(syntax.prefix_for("unknown"), FALLBACK_PREFIX);
//! ```

use std::collections::HashMap;

use tracing::trace;

/// Prefix used for any extension without a registered comment token.
pub const FALLBACK_PREFIX: &str = ";;";

/// Returns the builtin line-comment token for `extension`, if one is
/// registered.
///
/// Matching is case-sensitive, like extension matching elsewhere.
pub fn builtin_prefix(extension: &str) -> Option<&'static str> {
  let prefix = match extension {
    "clj" | "cljc" | "cljs" | "cljd" | "edn" | "bb" | "el" | "lisp" | "scm" | "rkt" | "fnl" => ";;",
    "c" | "h" | "cc" | "cpp" | "hpp" | "cs" | "go" | "rs" | "java" | "kt" | "kts" | "scala" | "swift" | "dart"
    | "groovy" | "proto" | "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" | "php" | "zig" => "//",
    "py" | "sh" | "bash" | "zsh" | "rb" | "pl" | "yaml" | "yml" | "toml" | "tf" | "r" | "nix" | "ex" | "exs"
    | "cmake" => "#",
    "hs" | "sql" | "lua" | "elm" | "ada" => "--",
    "erl" | "hrl" | "tex" => "%",
    "asm" | "s" => ";",
    "f90" | "f95" => "!",
    _ => return None,
  };
  Some(prefix)
}

/// Extension to comment-prefix table with optional user overrides.
///
/// Overrides (from `.spdxify.toml`) are consulted before the builtin table;
/// anything unregistered in both resolves to [`FALLBACK_PREFIX`].
#[derive(Debug, Clone, Default)]
pub struct CommentSyntax {
  overrides: HashMap<String, String>,
}

impl CommentSyntax {
  /// Builtin table only.
  pub fn builtin() -> Self {
    Self::default()
  }

  /// Builtin table with the given extension overrides layered on top.
  pub const fn with_overrides(overrides: HashMap<String, String>) -> Self {
    Self { overrides }
  }

  /// Returns the line-comment prefix for `extension`.
  pub fn prefix_for(&self, extension: &str) -> &str {
    if let Some(prefix) = self.overrides.get(extension) {
      trace!("Using configured comment prefix for .{}", extension);
      return prefix;
    }
    builtin_prefix(extension).unwrap_or(FALLBACK_PREFIX)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clojure_family_uses_double_semicolon() {
    let syntax = CommentSyntax::builtin();
    for ext in ["clj", "cljc", "cljs", "edn"] {
      assert_eq!(syntax.prefix_for(ext), ";;", "extension {ext}");
    }
  }

  #[test]
  fn test_common_languages() {
    let syntax = CommentSyntax::builtin();
    assert_eq!(syntax.prefix_for("rs"), "//");
    assert_eq!(syntax.prefix_for("py"), "#");
    assert_eq!(syntax.prefix_for("sql"), "--");
    assert_eq!(syntax.prefix_for("erl"), "%");
  }

  #[test]
  fn test_unknown_and_case_sensitive_fall_back() {
    let syntax = CommentSyntax::builtin();
    assert_eq!(syntax.prefix_for("xyz"), FALLBACK_PREFIX);
    assert_eq!(syntax.prefix_for("PY"), FALLBACK_PREFIX);
    assert_eq!(syntax.prefix_for(""), FALLBACK_PREFIX);
  }

  #[test]
  fn test_overrides_take_precedence() {
    let mut overrides = HashMap::new();
    overrides.insert("py".to_string(), "##".to_string());
    overrides.insert("xyz".to_string(), "!!".to_string());
    let syntax = CommentSyntax::with_overrides(overrides);

    assert_eq!(syntax.prefix_for("py"), "##");
    assert_eq!(syntax.prefix_for("xyz"), "!!");
    assert_eq!(syntax.prefix_for("rs"), "//");
  }

  #[test]
  fn test_table_size() {
    let registered = [
      "clj", "cljc", "cljs", "cljd", "edn", "bb", "el", "lisp", "scm", "rkt", "fnl", "c", "h", "cc", "cpp", "hpp", "cs",
      "go", "rs", "java", "kt", "kts", "scala", "swift", "dart", "groovy", "proto", "js", "mjs", "cjs", "jsx", "ts",
      "tsx", "php", "zig", "py", "sh", "bash", "zsh", "rb", "pl", "yaml", "yml", "toml", "tf", "r", "nix", "ex", "exs",
      "cmake", "hs", "sql", "lua", "elm", "ada", "erl", "hrl", "tex", "asm", "s", "f90", "f95",
    ];
    assert!(registered.iter().all(|ext| builtin_prefix(ext).is_some()));
  }
}
