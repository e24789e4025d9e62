//! Change records and the end-of-run report
//!
//! Every operation that touches the filesystem returns the changes it made
//! (or would make, in dry-run mode) instead of pushing them into shared state.
//! The orchestrator merges the per-step reports into one [`StepReport`].

use crate::core::fixer::FixFailure;
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of filesystem change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Copy,
    Move,
    Rename,
    Create,
    Rewrite,
    Remove,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Rename => "rename",
            Self::Create => "create",
            Self::Rewrite => "rewrite",
            Self::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// One logged change, from origin to destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub from: PathBuf,
    pub to: PathBuf,
}

impl ChangeRecord {
    pub fn new(kind: ChangeKind, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }

    /// A change that affects one path in place (create, rewrite, remove)
    pub fn in_place(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(kind, path.clone(), path)
    }
}

/// Changes and fixer failures produced by one step or a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub changes: Vec<ChangeRecord>,
    pub failures: Vec<FixFailure>,
}

impl StepReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, change: ChangeRecord) {
        self.changes.push(change);
    }

    pub fn fail(&mut self, failure: FixFailure) {
        self.failures.push(failure);
    }

    /// Append another report's changes and failures
    pub fn merge(&mut self, other: StepReport) {
        self.changes.extend(other.changes);
        self.failures.extend(other.failures);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.failures.is_empty()
    }
}

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Render the report in the requested format
///
/// Paths are shown relative to `root` when they live under it.
pub fn render(report: &StepReport, root: &Path, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(render_table(report, root)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
    }
}

fn display_rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Two column From/To table, padded to the widest origin path
pub fn render_table(report: &StepReport, root: &Path) -> String {
    let rows: Vec<(String, String)> = report
        .changes
        .iter()
        .map(|c| (display_rel(&c.from, root), display_rel(&c.to, root)))
        .collect();

    let width = rows
        .iter()
        .map(|(from, _)| from.chars().count())
        .chain(std::iter::once("FROM".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("  {:<width$}  {}\n", "FROM", "TO"));
    out.push_str(&format!("  {:-<width$}  {:-<4}\n", "", ""));
    for (from, to) in rows {
        out.push_str(&format!("  {from:<width$}  {to}\n"));
    }

    if !report.failures.is_empty() {
        out.push('\n');
        out.push_str(&format!("  {} file(s) need manual follow-up:\n", report.failures.len()));
        for failure in &report.failures {
            out.push_str(&format!("  {failure}\n"));
        }
    }
    out
}
