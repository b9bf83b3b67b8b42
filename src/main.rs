//! # spdxify
//!
//! Keeps SPDX license metadata and copyright headers in source files up to
//! date.

use std::process;

use spdxify::cli::Cli;

fn main() {
  let cli = Cli::parse_args();

  match cli.run() {
    Ok(code) => process::exit(code),
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      process::exit(1);
    }
  }
}
