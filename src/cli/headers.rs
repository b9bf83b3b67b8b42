//! # Check and Fix Commands
//!
//! `spdxify check` reports files whose header is missing or stale and exits
//! 1 if there are any; `spdxify fix` rewrites them.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use super::{CommonArgs, DEFAULT_EXTENSIONS, env_path};
use crate::comment_syntax::CommentSyntax;
use crate::config::{CONFIG_ENV_VAR, Config, load_config};
use crate::diff::DiffManager;
use crate::git;
use crate::ignore::ExclusionRules;
use crate::info_log;
use crate::output::{print_all_files_ok, print_hint, print_start_message, print_summary};
use crate::processor::{FileCollector, Mode, Processor, select};
use crate::report::{ReportGenerator, Summary};
use crate::settings::{self, HeaderSettings, SettingsSources};
use crate::workspace::{Workspace, resolve_workspace};

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Files or directories to check [default: .]
  pub paths: Vec<PathBuf>,

  /// Print a diff of the header each file would receive
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of the run to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Arguments for the fix command
#[derive(Args, Debug, Default)]
pub struct FixArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Files or directories to fix [default: .]
  pub paths: Vec<PathBuf>,

  /// Write a JSON report of the run to this path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,
}

/// Run the check command; exits 1 if any file needs a header.
pub fn run_check(args: CheckArgs) -> Result<i32> {
  let summary = run_headers(
    &args.common,
    &args.paths,
    Mode::Check,
    args.show_diff,
    args.report_json.as_deref(),
  )?;
  Ok(i32::from(summary.needs_header > 0))
}

/// Run the fix command; per-file errors do not change the exit code.
pub fn run_fix(args: FixArgs) -> Result<i32> {
  run_headers(&args.common, &args.paths, Mode::Fix, false, args.report_json.as_deref())?;
  Ok(0)
}

/// Resolves header settings for a check/fix run.
pub(super) fn resolve_settings(common: &CommonArgs, workspace: &Workspace) -> Result<HeaderSettings> {
  let git_user = if common.copyright.is_none() {
    git::user_name(workspace.current_dir())
  } else {
    None
  };

  let sources = SettingsSources {
    spdx_id: common.spdx_id.clone(),
    copyright: common.copyright.clone(),
    year: common.year.clone(),
    project_root: workspace.project_root().map(Path::to_path_buf),
    current_dir: workspace.current_dir().to_path_buf(),
    git_user,
    current_year: chrono::Local::now().year().to_string(),
  };

  Ok(settings::resolve(&sources)?)
}

/// The extension set for directory scans: `-x` flags, else the config file's
/// list, else the defaults.
fn effective_extensions(common: &CommonArgs, config: Option<&Config>) -> Vec<String> {
  if !common.extension.is_empty() {
    return common.extension.clone();
  }
  config
    .and_then(|c| c.extensions.clone())
    .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
}

fn run_headers(
  common: &CommonArgs,
  paths: &[PathBuf],
  mode: Mode,
  show_diff: bool,
  report_json: Option<&Path>,
) -> Result<Summary> {
  common.init_output();

  let workspace = resolve_workspace()?;
  let current_dir = workspace.current_dir().to_path_buf();

  let config = load_config(
    common.config.as_deref(),
    env_path(CONFIG_ENV_VAR).as_deref(),
    workspace.root(),
    common.no_config,
  )?;

  let settings = resolve_settings(common, &workspace)?;

  let extensions = effective_extensions(common, config.as_ref());
  let mut excludes = common.exclude.clone();
  if let Some(ref config) = config {
    excludes.extend(config.exclude.iter().cloned());
  }
  let syntax = config
    .as_ref()
    .map_or_else(CommentSyntax::builtin, Config::comment_syntax);
  debug!("Extensions: {:?}, excludes: {:?}", extensions, excludes);

  let paths = if paths.is_empty() {
    vec![PathBuf::from(".")]
  } else {
    paths.to_vec()
  };

  let rules = ExclusionRules::load(&current_dir, &excludes);
  if rules.is_empty() {
    debug!("No exclusion patterns");
  } else {
    debug!("{} exclusion patterns", rules.len());
  }
  let collector = FileCollector::new(current_dir.clone(), &extensions);
  let targets = select(&paths, &collector, &rules, &settings, &syntax);

  print_start_message(targets.len(), mode);

  let start_time = Instant::now();
  let mut processor = Processor::new(settings, syntax).with_display_root(current_dir);
  if mode == Mode::Check {
    processor = processor.with_diff_manager(DiffManager::new(show_diff));
  }
  let (summary, results) = processor.run(&targets, mode);
  let elapsed = start_time.elapsed();

  if summary.needs_header == 0 && summary.errors == 0 {
    print_all_files_ok();
  }
  print_summary(&summary, mode, elapsed);
  if mode == Mode::Check && summary.needs_header > 0 {
    print_hint("Run `spdxify fix` to add missing headers.");
  }

  if let Some(output_path) = report_json {
    if let Err(e) = ReportGenerator::new(output_path).generate(&results, &summary) {
      eprintln!("Error generating JSON report: {:#}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  Ok(summary)
}
