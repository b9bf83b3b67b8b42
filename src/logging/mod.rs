//! # Logging Module
//!
//! Output plumbing for spdxify:
//! - `info_log!` for user-facing lines on stdout (silenced by `--quiet`)
//! - `verbose_log!` for extra detail on stderr (only with `--verbose`)
//! - a `tracing` subscriber for structured diagnostics
//!
//! ## Example
//!
//! ```rust
//! use spdxify::logging::{ColorMode, set_verbose};
//! use spdxify::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! verbose_log!("Scanning: {}", "src/");
//! info_log!("Header added: {}", "src/core.clj");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an [`info_log!`] line, yellow when colours are enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
