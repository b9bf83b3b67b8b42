//! # Init Command
//!
//! Writes `LICENSE` (the license text from the SPDX catalog with year and
//! holder filled in) and `LICENSE.spdx` into the project root.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use super::headers::resolve_settings;
use super::{CommonArgs, env_path};
use crate::catalog::{CACHE_DIR_ENV_VAR, CatalogOptions, LicenseCatalog, substitute_placeholders};
use crate::metadata::SpdxDocument;
use crate::output::print_hint;
use crate::workspace::resolve_workspace;
use crate::{git, info_log};

/// File name of the generated license text.
pub const LICENSE_FILENAME: &str = "LICENSE";

/// Maximum number of similar ids suggested for an unknown license id.
const MAX_SUGGESTIONS: usize = 5;

/// Arguments for the init command
#[derive(Args, Debug, Default)]
pub struct InitArgs {
  /// SPDX license identifier, e.g. MIT or Apache-2.0 (or use --spdx-id)
  #[arg(value_name = "SPDX-ID")]
  pub license_id: Option<String>,

  /// Project home page for LICENSE.spdx (default: derived from the origin
  /// git remote)
  #[arg(long, value_name = "URL")]
  pub homepage: Option<String>,

  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run the init command.
pub fn run_init(args: InitArgs) -> Result<i32> {
  args.common.init_output();

  let Some(license_id) = args.license_id.clone().or_else(|| args.common.spdx_id.clone()) else {
    bail!("Missing required argument: <SPDX-ID>");
  };

  let workspace = resolve_workspace()?;
  let root = workspace.root();

  let options = CatalogOptions::resolve(env_path(CACHE_DIR_ENV_VAR));
  let catalog = LicenseCatalog::load(&options).with_context(|| "Failed to load the SPDX license list")?;

  if catalog.is_empty() {
    bail!("The SPDX license list is empty; remove the cached copy in {}", options.cache_dir.display());
  }

  let entry = match catalog.require(&license_id) {
    Ok(entry) => entry,
    Err(e) => {
      let suggestions = catalog.suggestions(&license_id, MAX_SUGGESTIONS);
      if !suggestions.is_empty() {
        print_hint(&format!("Did you mean: {}?", suggestions.join(", ")));
      }
      return Err(e.into());
    }
  };
  debug!("Using license '{}' ({})", entry.license_id, entry.name);

  let common = CommonArgs {
    spdx_id: Some(entry.license_id.clone()),
    ..args.common.clone()
  };
  let settings = resolve_settings(&common, &workspace)?;

  let text = catalog.license_text(entry, &options)?;
  let text = substitute_placeholders(&text, &settings.year, &settings.copyright);
  let license_path = root.join(LICENSE_FILENAME);
  std::fs::write(&license_path, text).with_context(|| format!("Failed to write {}", license_path.display()))?;
  info_log!("Wrote {}", license_path.display());

  let home_page = args.homepage.clone().or_else(|| {
    git::origin_url(root)
      .as_deref()
      .and_then(git::homepage_from_remote)
  });
  let document = SpdxDocument {
    package_name: package_name(root),
    copyright: settings.copyright,
    home_page,
    license_id: settings.spdx_id,
  };
  let metadata_path = document.write_to(root)?;
  info_log!("Wrote {}", metadata_path.display());

  Ok(0)
}

/// The project directory's name.
fn package_name(root: &Path) -> String {
  root
    .file_name()
    .map(|name| name.to_string_lossy().to_string())
    .unwrap_or_else(|| "project".to_string())
}
