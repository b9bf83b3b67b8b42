//! # Output Module
//!
//! User-facing terminal output for spdxify: consistent symbols and colours,
//! silenced by `-q` (apart from the bare path lists scripts rely on) and
//! expanded by `-v`.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::header::HeaderState;
use crate::logging::{is_quiet, is_verbose};
use crate::processor::Mode;
use crate::report::Summary;

/// Symbols used in output
pub mod symbols {
  /// Header present / written
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header missing / failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Stale header replaced
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Print the initial "Checking N files..." or "Fixing N files..." message.
pub fn print_start_message(file_count: usize, mode: Mode) {
  if is_quiet() {
    return;
  }

  let verb = match mode {
    Mode::Check => "Checking",
    Mode::Fix => "Fixing",
  };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Check-mode diagnostic for a file whose header is absent or stale.
///
/// In quiet mode only the path is printed, for scripting.
pub fn print_needs_header(path: &Path, state: &HeaderState, root: Option<&Path>) {
  let display_path = make_relative_path(path, root);
  if is_quiet() {
    println!("{}", display_path);
    return;
  }

  let reason = match state {
    HeaderState::StaleReplaceable { .. } => "stale header",
    _ => "missing header",
  };
  println!(
    "{} {} ({})",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    display_path,
    reason
  );

  if is_verbose()
    && let HeaderState::StaleReplaceable { line1, line2 } = state
  {
    println!("    {}", line1.if_supports_color(Stream::Stdout, |s| s.dimmed()));
    println!("    {}", line2.if_supports_color(Stream::Stdout, |s| s.dimmed()));
  }
}

/// Fix-mode line for a rewritten file.
pub fn print_fixed(path: &Path, state: &HeaderState, root: Option<&Path>) {
  if is_quiet() {
    return;
  }

  let display_path = make_relative_path(path, root);
  match state {
    HeaderState::StaleReplaceable { .. } => println!(
      "{} Replaced header: {}",
      symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
      display_path
    ),
    _ => println!(
      "{} Added header: {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      display_path
    ),
  }
}

/// Per-file failure, always shown on stderr.
pub fn print_file_error(path: &Path, error: &str, root: Option<&Path>) {
  eprintln!(
    "{} {}: {}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    make_relative_path(path, root),
    error
  );
}

/// Print the success message when no file needs a header.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have license headers.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the run summary.
///
/// - check: "Summary: X OK, Y missing, Z errors"
/// - fix: "Summary: X modified, Y errors"
pub fn print_summary(summary: &Summary, mode: Mode, elapsed: std::time::Duration) {
  if is_quiet() {
    return;
  }

  let errors_str = colour_count(summary.errors, |s| s.red().to_string());
  let mut summary_line = match mode {
    Mode::Check => {
      format!(
        "Summary: {} OK, {} missing, {} errors",
        summary.ok.if_supports_color(Stream::Stdout, |s| s.cyan()),
        colour_count(summary.needs_header, |s| s.red().to_string()),
        errors_str
      )
    }
    Mode::Fix => format!(
      "Summary: {} modified, {} errors",
      summary.modified.if_supports_color(Stream::Stdout, |s| s.cyan()),
      errors_str
    ),
  };

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", elapsed.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

fn colour_count(count: usize, highlight: impl Fn(&usize) -> String) -> String {
  if count > 0 {
    count.if_supports_color(Stream::Stdout, highlight).to_string()
  } else {
    count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  }
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Make a path relative to `root` for display.
pub fn make_relative_path(path: &Path, root: Option<&Path>) -> String {
  if let Some(root) = root {
    path
      .strip_prefix(root)
      .map(|p| p.to_string_lossy().to_string())
      .unwrap_or_else(|_| path.to_string_lossy().to_string())
  } else {
    path.to_string_lossy().to_string()
  }
}
