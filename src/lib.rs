//! sitemig: one-shot migration of a legacy documentation tree to Hugo
//!
//! The migration copies the Jekyll-era `docs/` and `blog/` trees into Hugo's
//! `content/<lang>/` layout, generates glossary and section pages from the
//! sidecar YAML data, and rewrites every content file through an ordered
//! chain of text fixers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sitemig::{MigrationConfig, Migrator, Result};
//!
//! fn main() -> Result<()> {
//!     let migrator = Migrator::new(MigrationConfig::default(), "website", true)?;
//!     let report = migrator.run()?;
//!     println!("{} changes", report.changes.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Fixers
//!
//! A [`Fixer`] is a named function from `(path, text)` to new text. Front
//! matter is located textually and additions are spliced in before the
//! closing delimiter, so everything else in the file is preserved byte for
//! byte.
//!
//! ```rust
//! use sitemig::core::inject::add_weight;
//! use sitemig::core::dates::fix_dates;
//! use sitemig::FixerChain;
//! use std::path::Path;
//!
//! let chain = FixerChain::new().with(fix_dates()).with(add_weight(10));
//! let outcome = chain.apply(Path::new("blog/post.md"), "---\ndate: Friday, July 02, 2015\n---\nBody\n");
//! assert_eq!(outcome.text, "---\ndate: 2015-07-02\nweight: 10\n---\nBody\n");
//! assert!(outcome.is_clean());
//! ```
//!
//! # Architecture
//!
//! - [`core`]: pure text transformations and the sidecar record types
//! - [`io`]: workspace file operations, directory walks and the change report
//! - [`migrate`]: the migration steps and their orchestrator
//! - [`config`]: every path, table and rule the steps use
//! - [`error`]: fatal and per-file error types

pub use config::MigrationConfig;
pub use crate::core::{ChainOutcome, FixFailure, Fixer, FixerChain};
pub use error::{FixError, FixResult, MigrateError, Result};
pub use io::{ChangeKind, ChangeRecord, ReportFormat, StepReport, Workspace};
pub use migrate::Migrator;

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod migrate;
