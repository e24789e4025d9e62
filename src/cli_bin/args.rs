//! Command-line argument definitions

use clap::{Parser, ValueEnum};
use sitemig::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sitemig",
    version,
    about = "Migrate a legacy documentation content tree to Hugo",
    long_about = "sitemig copies the legacy docs and blog trees into Hugo's content layout, \
                  generates glossary and section pages from the YAML data files, and rewrites \
                  Liquid tags, callouts and dates in every content file."
)]
pub struct Cli {
    /// Trial run: log and report every change without writing anything
    #[arg(long = "try", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Root of the site project (contains docs/, blog/ and data/)
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// YAML file overriding the default migration configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Format of the change report
    #[arg(long, value_enum, default_value_t = ReportStyle::Table)]
    pub report_format: ReportStyle,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// Two column From/To table
    Table,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl From<ReportStyle> for ReportFormat {
    fn from(style: ReportStyle) -> Self {
        match style {
            ReportStyle::Table => ReportFormat::Table,
            ReportStyle::Json => ReportFormat::Json,
            ReportStyle::Yaml => ReportFormat::Yaml,
        }
    }
}
