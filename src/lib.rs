//! # spdxify
//!
//! Manages SPDX license metadata and copyright headers across a source tree.
//!
//! Every source file gets a two-line header in its language's line-comment
//! syntax:
//!
//! ```text
//! ;; Copyright © 2024 ACME
//! ;; SPDX-License-Identifier: MIT
//! ```
//!
//! `spdxify check` reports files whose header is missing or stale,
//! `spdxify fix` inserts or replaces it (keeping a shebang line first), and
//! `spdxify init` writes `LICENSE` and `LICENSE.spdx` from the SPDX license
//! list.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use spdxify::comment_syntax::CommentSyntax;
//! use spdxify::ignore::ExclusionRules;
//! use spdxify::processor::{FileCollector, Mode, Processor, select};
//! use spdxify::settings::HeaderSettings;
//!
//! let settings = HeaderSettings {
//!   spdx_id: "MIT".to_string(),
//!   copyright: "ACME".to_string(),
//!   year: "2024".to_string(),
//! };
//! let syntax = CommentSyntax::builtin();
//! let cwd = std::env::current_dir().expect("current dir");
//!
//! let rules = ExclusionRules::load(&cwd, &[]);
//! let collector = FileCollector::new(cwd.clone(), &["clj".to_string()]);
//! let targets = select(&[PathBuf::from("src")], &collector, &rules, &settings, &syntax);
//!
//! let (summary, _results) = Processor::new(settings, syntax).run(&targets, Mode::Fix);
//! println!("{} files modified", summary.modified);
//! ```
//!
//! ## Modules
//!
//! * [`header`] - header rendering, classification and rewriting
//! * [`processor`] - file selection and the check/fix driver
//! * [`ignore`] - `.gitignore` and `--exclude` handling
//! * [`catalog`] - the SPDX license list

pub mod catalog;
pub mod cli;
pub mod comment_syntax;
pub mod config;
pub mod diff;
pub mod git;
pub mod header;
pub mod ignore;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod processor;
pub mod report;
pub mod settings;
pub mod workspace;
