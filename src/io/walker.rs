//! Directory walks that rewrite or rename the files they select

use crate::core::fixer::{FixFailure, FixerChain};
use crate::error::{FixError, Result};
use crate::io::fs::{read_text, Workspace};
use crate::io::report::StepReport;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks one subtree and selects regular files by a regex over their full path
#[derive(Debug, Clone)]
pub struct ContentWalker {
    root: PathBuf,
}

impl ContentWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Matching files, sorted by path
    ///
    /// A missing root yields no files.
    pub fn files(&self, pattern: &Regex) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            warn!("{}: directory does not exist, skipping", self.root.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if pattern.is_match(&entry.path().to_string_lossy()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

fn first_fixer(chain: &FixerChain) -> String {
    chain.names().first().map(|n| n.to_string()).unwrap_or_default()
}

/// Record a per-file failure that kept the whole chain from running
fn skip_file(report: &mut StepReport, path: &Path, chain: &FixerChain, err: &FixError) {
    warn!("{}\t{}", path.display(), err);
    report.fail(FixFailure::new(path, first_fixer(chain), err));
}

/// Run `chain` over every file under `dir` whose path matches `pattern`
///
/// Only files whose text changed are written back. Fixer failures end up in
/// the report, never in the returned error.
pub fn apply_fixers(
    ws: &Workspace,
    dir: impl AsRef<Path>,
    pattern: &Regex,
    chain: &FixerChain,
) -> Result<StepReport> {
    let walker = ContentWalker::new(ws.abs(dir));
    let mut report = StepReport::new();

    for path in walker.files(pattern)? {
        let original = match read_text(&path)? {
            Ok(text) => text,
            Err(err) => {
                skip_file(&mut report, &path, chain, &err);
                continue;
            }
        };
        let outcome = chain.apply(&path, &original);
        report.failures.extend(outcome.failures);

        if outcome.text != original {
            report.record(ws.rewrite_file(&path, &outcome.text)?);
        } else {
            debug!("{}: unchanged", path.display());
        }
    }
    Ok(report)
}

/// Apply `chain` to one project file
///
/// A missing file is a per-file failure attributed to the first fixer.
pub fn apply_to_file(ws: &Workspace, rel: impl AsRef<Path>, chain: &FixerChain) -> Result<StepReport> {
    let path = ws.abs(rel);
    let mut report = StepReport::new();

    if !path.is_file() {
        skip_file(&mut report, &path, chain, &FixError::MissingTarget);
        return Ok(report);
    }

    let original = match read_text(&path)? {
        Ok(text) => text,
        Err(err) => {
            skip_file(&mut report, &path, chain, &err);
            return Ok(report);
        }
    };
    let outcome = chain.apply(&path, &original);
    report.failures.extend(outcome.failures);
    if outcome.text != original {
        report.record(ws.rewrite_file(&path, &outcome.text)?);
    }
    Ok(report)
}

/// Rename files with a given name, optionally only under paths containing a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    /// Exact file name to match
    pub file_name: String,
    /// Substring the path below the walk root must contain
    #[serde(default)]
    pub path_contains: Option<String>,
    /// New file name, in the same directory
    pub rename_to: String,
}

impl RenameRule {
    pub fn new(file_name: impl Into<String>, rename_to: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            path_contains: None,
            rename_to: rename_to.into(),
        }
    }

    pub fn under(mut self, fragment: impl Into<String>) -> Self {
        self.path_contains = Some(fragment.into());
        self
    }

    /// Whether the rule applies; `path` is matched relative to the walk root
    pub fn matches(&self, path: &Path) -> bool {
        let name_matches = path
            .file_name()
            .map(|name| name == self.file_name.as_str())
            .unwrap_or(false);
        name_matches
            && self
                .path_contains
                .as_deref()
                .map_or(true, |fragment| path.to_string_lossy().contains(fragment))
    }

    /// Destination for a matching path
    pub fn target(&self, path: &Path) -> PathBuf {
        path.with_file_name(&self.rename_to)
    }
}

/// Apply the first matching rule to every file under `dir`
///
/// The file list is collected before any rename happens.
pub fn rename_matching(ws: &Workspace, dir: impl AsRef<Path>, rules: &[RenameRule]) -> Result<StepReport> {
    let walker = ContentWalker::new(ws.abs(dir));
    let any_file = Regex::new(".*")?;
    let mut report = StepReport::new();

    for path in walker.files(&any_file)? {
        let rel = path.strip_prefix(walker.root()).unwrap_or(&path);
        let Some(rule) = rules.iter().find(|rule| rule.matches(rel)) else {
            continue;
        };
        let target = rule.target(&path);
        if target.exists() {
            warn!("{}: {} already exists, not renaming", path.display(), target.display());
            continue;
        }
        report.record(ws.rename(&path, &target)?);
    }
    Ok(report)
}
