//! # CLI Module
//!
//! Command-line interface: `spdxify init`, `spdxify check` and
//! `spdxify fix`, parsed with clap.
//!
//! Everything read from the environment (current directory, git identity,
//! `SPDXIFY_*` variables) is gathered here and handed to the library as plain
//! values.

mod headers;
mod init;

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use headers::{CheckArgs, FixArgs, run_check, run_fix};
pub use init::{InitArgs, run_init};

use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::settings::parse_year;

/// Extensions scanned inside directories when neither `--extension` nor the
/// config file names any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["clj", "cljc", "cljs"];

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Create LICENSE and LICENSE.spdx for the project
  spdxify init MIT

  # Report source files without a matching header (exit 1 if any)
  spdxify check src test

  # Insert or replace headers, scanning Python files too
  spdxify fix -x clj -x py src

  # Preview the rewrite without touching files
  spdxify check --show-diff src

  # Skip generated code
  spdxify fix -e \"*.generated.clj\" -e \"resources/\" src
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Write LICENSE and LICENSE.spdx for an SPDX license id
  Init(InitArgs),
  /// Report files whose header is missing or stale
  Check(CheckArgs),
  /// Insert or replace headers in place
  Fix(FixArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
  /// SPDX license identifier (default: PackageLicenseDeclared in LICENSE.spdx)
  #[arg(long, short = 's', value_name = "SPDX-ID")]
  pub spdx_id: Option<String>,

  /// Copyright holder (default: LICENSE.spdx, then git user.name)
  #[arg(long, short = 'C', value_name = "HOLDER")]
  pub copyright: Option<String>,

  /// Copyright year (default: current year)
  #[arg(long, short = 'y', value_parser = parse_year)]
  pub year: Option<String>,

  /// Exclude paths matching this pattern (repeatable)
  #[arg(long, short = 'e', value_name = "PATTERN")]
  pub exclude: Vec<String>,

  /// Scan files with this extension inside directories (repeatable)
  /// [default: clj, cljc, cljs]
  #[arg(long, short = 'x', value_name = "EXT")]
  pub extension: Vec<String>,

  /// Path to config file (default: .spdxify.toml in the project root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl CommonArgs {
  /// Sets up tracing, output mode and colours.
  pub fn init_output(&self) {
    init_tracing(self.quiet, self.verbose);

    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();
  }
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Runs the selected subcommand and returns the process exit code.
  pub fn run(self) -> anyhow::Result<i32> {
    match self.command {
      Command::Init(args) => run_init(args),
      Command::Check(args) => run_check(args),
      Command::Fix(args) => run_fix(args),
    }
  }
}

/// Reads a path-valued environment variable, treating an empty value as
/// unset.
fn env_path(name: &str) -> Option<PathBuf> {
  std::env::var_os(name)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
}
