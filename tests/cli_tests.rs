mod common;

use std::fs;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{CLJ_HEADER, HEADER_ARGS, setup_project, spdxify, write_file};
use predicates::prelude::*;

#[test]
fn test_fix_twice_modifies_then_noop() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/acme/core.clj", "(ns acme.core)\n")?;
  write_file(root, "src/acme/ui.cljs", "(ns acme.ui)\n")?;
  write_file(root, "src/acme/shared.cljc", "(ns acme.shared)\n")?;
  write_file(root, "README.md", "# readme\n")?;

  spdxify(root)?
    .arg("fix")
    .args(HEADER_ARGS)
    .arg("src")
    .assert()
    .success()
    .stdout(predicate::str::contains("Summary: 3 modified, 0 errors"));

  assert_eq!(
    fs::read_to_string(root.join("src/acme/core.clj"))?,
    format!("{CLJ_HEADER}(ns acme.core)\n")
  );
  assert_eq!(fs::read_to_string(root.join("README.md"))?, "# readme\n");

  spdxify(root)?
    .arg("fix")
    .args(HEADER_ARGS)
    .arg("src")
    .assert()
    .success()
    .stdout(predicate::str::contains("Summary: 0 modified, 0 errors"));

  Ok(())
}

#[test]
fn test_check_all_matching_exits_zero() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/a.clj", &format!("{CLJ_HEADER}(ns a)\n"))?;
  write_file(root, "src/b.clj", &format!("{CLJ_HEADER}(ns b)\n"))?;

  spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .arg("src")
    .assert()
    .success()
    .stdout(predicate::str::contains("All files have license headers."));

  Ok(())
}

#[test]
fn test_check_reports_missing_and_stale_without_writing() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/bare.clj", "(ns bare)\n")?;
  let stale = ";; Copyright © 2019 Old Corp\n;; SPDX-License-Identifier: EPL-2.0\n(ns stale)\n";
  write_file(root, "src/stale.clj", stale)?;

  spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .arg("src")
    .assert()
    .code(1)
    .stdout(predicate::str::contains("src/bare.clj (missing header)"))
    .stdout(predicate::str::contains("src/stale.clj (stale header)"));

  assert_eq!(fs::read_to_string(root.join("src/bare.clj"))?, "(ns bare)\n");
  assert_eq!(fs::read_to_string(root.join("src/stale.clj"))?, stale);

  Ok(())
}

#[test]
fn test_check_show_diff_does_not_write() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "core.clj", "(ns core)\n")?;

  spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .args(["--show-diff", "core.clj"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("+;; SPDX-License-Identifier: MIT"));

  assert_eq!(fs::read_to_string(root.join("core.clj"))?, "(ns core)\n");

  Ok(())
}

#[test]
fn test_gitignore_and_exclude_patterns() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, ".gitignore", "# build output\ntarget/*\n")?;
  write_file(root, "target/out.clj", "(ns out)\n")?;
  write_file(root, "foo.generated.clj", "(ns gen)\n")?;
  write_file(root, "resources/public/app.cljs", "(ns app)\n")?;
  write_file(root, "src/core.clj", "(ns core)\n")?;

  spdxify(root)?
    .arg("fix")
    .args(HEADER_ARGS)
    .args(["-e", "*.generated.clj", "-e", "resources/"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Summary: 1 modified"));

  assert!(fs::read_to_string(root.join("src/core.clj"))?.starts_with(CLJ_HEADER));
  assert_eq!(fs::read_to_string(root.join("target/out.clj"))?, "(ns out)\n");
  assert_eq!(fs::read_to_string(root.join("foo.generated.clj"))?, "(ns gen)\n");
  assert_eq!(fs::read_to_string(root.join("resources/public/app.cljs"))?, "(ns app)\n");

  Ok(())
}

#[test]
fn test_explicit_file_keeps_shebang() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "bin/run.py", "#!/usr/bin/env python3\nprint(1)\n")?;

  spdxify(root)?
    .arg("fix")
    .args(["-s", "Apache-2.0", "-C", "ACME", "-y", "2024", "bin/run.py"])
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(root.join("bin/run.py"))?,
    "#!/usr/bin/env python3\n# Copyright © 2024 ACME\n# SPDX-License-Identifier: Apache-2.0\nprint(1)\n"
  );

  Ok(())
}

#[test]
fn test_settings_from_license_spdx() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(
    root,
    "LICENSE.spdx",
    "SPDXVersion: SPDX-2.3\nPackageOriginator: Organization: ACME\nPackageLicenseDeclared: MIT\n",
  )?;
  write_file(root, "src/core.clj", "(ns core)\n")?;

  spdxify(root)?.args(["fix", "-y", "2024", "src"]).assert().success();

  assert_eq!(
    fs::read_to_string(root.join("src/core.clj"))?,
    format!("{CLJ_HEADER}(ns core)\n")
  );

  Ok(())
}

#[test]
fn test_missing_spdx_id_is_fatal() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/core.clj", "(ns core)\n")?;

  spdxify(root)?
    .args(["check", "-C", "ACME", "src"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("ERROR: No SPDX license id"));

  spdxify(root)?
    .args(["fix", "-C", "ACME", "src"])
    .assert()
    .code(1);

  assert_eq!(fs::read_to_string(root.join("src/core.clj"))?, "(ns core)\n");

  Ok(())
}

#[test]
fn test_missing_copyright_is_fatal() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/core.clj", "(ns core)\n")?;

  spdxify(root)?
    .args(["fix", "-s", "MIT", "src"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("ERROR: No copyright holder"));

  Ok(())
}

#[test]
fn test_multi_line_copyright_is_fatal() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/core.clj", "(ns core)\n")?;

  spdxify(root)?
    .args(["fix", "-s", "MIT", "-C", "ACME\nInc", "src"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("must fit on one line"));

  assert_eq!(fs::read_to_string(root.join("src/core.clj"))?, "(ns core)\n");
  Ok(())
}

#[test]
fn test_config_file_extensions_and_comment_styles() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(
    root,
    ".spdxify.toml",
    "extensions = [\"edn\", \"xyz\"]\nexclude = [\"skip/\"]\n\n[comment-styles]\nxyz = \"##\"\n",
  )?;
  write_file(root, "conf/app.edn", "{:a 1}\n")?;
  write_file(root, "conf/data.xyz", "payload\n")?;
  write_file(root, "skip/other.edn", "{}\n")?;
  write_file(root, "src/core.clj", "(ns core)\n")?;

  spdxify(root)?.arg("fix").args(HEADER_ARGS).assert().success();

  assert!(fs::read_to_string(root.join("conf/app.edn"))?.starts_with(CLJ_HEADER));
  assert!(fs::read_to_string(root.join("conf/data.xyz"))?.starts_with("## Copyright © 2024 ACME\n"));
  assert_eq!(fs::read_to_string(root.join("skip/other.edn"))?, "{}\n");
  assert_eq!(fs::read_to_string(root.join("src/core.clj"))?, "(ns core)\n");

  spdxify(root)?
    .arg("fix")
    .args(HEADER_ARGS)
    .arg("--no-config")
    .assert()
    .success();
  assert!(fs::read_to_string(root.join("src/core.clj"))?.starts_with(CLJ_HEADER));

  Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, ".spdxify.toml", "extensions = [\".clj\"]\n")?;

  spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .assert()
    .code(1)
    .stderr(predicate::str::contains("ERROR: Failed to load config"));

  Ok(())
}

#[test]
fn test_report_json() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/a.clj", "(ns a)\n")?;
  write_file(root, "src/b.clj", "(ns b)\n")?;

  spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .args(["--report-json", "report.json", "src"])
    .assert()
    .code(1);

  let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(root.join("report.json"))?)?;
  assert_eq!(report["summary"]["total"], 2);
  assert_eq!(report["summary"]["needs_header"], 2);
  assert_eq!(report["summary"]["modified"], 0);
  assert_eq!(report["files"].as_array().map(Vec::len), Some(2));

  Ok(())
}

#[test]
fn test_quiet_check_lists_paths_only() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/a.clj", "(ns a)\n")?;

  let output = spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .args(["-q", "src"])
    .output()?;

  assert_eq!(output.status.code(), Some(1));
  let stdout = String::from_utf8(output.stdout)?;
  assert_eq!(stdout.trim(), format!("src{}a.clj", std::path::MAIN_SEPARATOR));

  Ok(())
}

#[test]
fn test_colors_never_has_no_escape_codes() -> Result<()> {
  let project = setup_project()?;
  let root = project.path();
  write_file(root, "src/a.clj", "(ns a)\n")?;

  let output = spdxify(root)?
    .arg("check")
    .args(HEADER_ARGS)
    .args(["--colors", "never", "-v", "src"])
    .output()?;

  let stdout = String::from_utf8(output.stdout)?;
  assert!(!stdout.contains("\x1b["));
  assert!(stdout.contains("missing header"));

  Ok(())
}
