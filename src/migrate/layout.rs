//! Steps that move whole directories: start fresh, copy and rename, final copy

use crate::config::{MigrationConfig, PathPair};
use crate::error::Result;
use crate::io::fs::Workspace;
use crate::io::report::StepReport;
use crate::io::walker::rename_matching;
use log::{debug, warn};

/// Remove the target content root; skipped entirely in dry-run mode
pub fn start_fresh(ws: &Workspace, config: &MigrationConfig) -> Result<StepReport> {
    if ws.is_dry_run() {
        debug!("dry run, keeping {}", config.content_dir.display());
        return Ok(StepReport::new());
    }
    let mut report = StepReport::new();
    if let Some(change) = ws.remove(&config.content_dir)? {
        report.record(change);
    }
    Ok(report)
}

fn copy_all(ws: &Workspace, pairs: &[PathPair]) -> Result<StepReport> {
    let mut report = StepReport::new();
    for pair in pairs {
        if !ws.exists(&pair.from) {
            warn!("{}: source does not exist, skipping copy", pair.from.display());
            continue;
        }
        report.record(ws.copy_dir(&pair.from, &pair.to)?);
    }
    Ok(report)
}

/// Copy the legacy trees into the content root and rename bundle indexes
pub fn copy_and_rename(ws: &Workspace, config: &MigrationConfig) -> Result<StepReport> {
    let mut report = copy_all(ws, &config.copies)?;

    for pair in &config.moves {
        if !ws.exists(&pair.from) {
            warn!("{}: source does not exist, skipping move", pair.from.display());
            continue;
        }
        report.record(ws.move_dir(&pair.from, &pair.to)?);
    }

    report.merge(rename_matching(ws, &config.content_dir, &config.rename_rules)?);

    for pair in &config.renames {
        if !ws.exists(&pair.from) {
            warn!("{}: does not exist, skipping rename", pair.from.display());
            continue;
        }
        report.record(ws.rename(&ws.abs(&pair.from), &ws.abs(&pair.to))?);
    }
    Ok(report)
}

/// Copy hand-maintained content over the migrated tree
pub fn final_copy(ws: &Workspace, config: &MigrationConfig) -> Result<StepReport> {
    copy_all(ws, &config.final_copies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::report::ChangeKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> (TempDir, Workspace) {
        let temp_dir = TempDir::new().unwrap();
        let ws = Workspace::open(temp_dir.path(), false).unwrap();
        for dir in ["docs/foo", "docs/reference/generated", "blog", "content/stale"] {
            fs::create_dir_all(ws.abs(dir)).unwrap();
        }
        fs::write(ws.abs("docs/foo/index.md"), "---\ntitle: Foo\n---\n").unwrap();
        fs::write(ws.abs("docs/foo/notindex.md"), "x").unwrap();
        fs::write(ws.abs("docs/index.html"), "<p>").unwrap();
        fs::write(ws.abs("docs/reference/generated/kubectl.html"), "<p>").unwrap();
        fs::write(ws.abs("blog/index.html"), "---\ntitle: Blog\n---\n").unwrap();
        fs::write(ws.abs("content/stale/old.md"), "old").unwrap();
        (temp_dir, ws)
    }

    #[test]
    fn test_start_fresh_removes_content() {
        let (_tmp, ws) = project();
        let report = start_fresh(&ws, &MigrationConfig::default()).unwrap();
        assert_eq!(report.changes[0].kind, ChangeKind::Remove);
        assert!(!ws.exists("content"));
    }

    #[test]
    fn test_start_fresh_skipped_in_dry_run() {
        let (tmp, _ws) = project();
        let ws = Workspace::open(tmp.path(), true).unwrap();
        let report = start_fresh(&ws, &MigrationConfig::default()).unwrap();
        assert!(report.is_empty());
        assert!(ws.exists("content/stale/old.md"));
    }

    #[test]
    fn test_copy_and_rename() {
        let (_tmp, ws) = project();
        let config = MigrationConfig::default();
        start_fresh(&ws, &config).unwrap();
        let report = copy_and_rename(&ws, &config).unwrap();

        assert!(ws.exists("content/en/docs/foo/_index.md"));
        assert!(ws.exists("content/en/docs/foo/notindex.md"));
        assert!(ws.exists("content/en/docs/_index.html"));
        assert!(ws.exists("static/reference/generated/kubectl.html"));
        assert!(!ws.exists("content/en/docs/reference/generated"));
        assert!(ws.exists("content/en/blog/_index.md"));
        assert!(!ws.exists("content/en/blog/index.html"));

        let kinds: Vec<ChangeKind> = report.changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Copy,
                ChangeKind::Copy,
                ChangeKind::Move,
                ChangeKind::Rename,
                ChangeKind::Rename,
                ChangeKind::Rename,
            ]
        );
    }

    #[test]
    fn test_final_copy_overwrites() {
        let (_tmp, ws) = project();
        fs::create_dir_all(ws.abs("work/content/en/docs")).unwrap();
        fs::write(ws.abs("work/content/en/docs/new.md"), "new").unwrap();
        fs::create_dir_all(ws.abs("content/en/docs")).unwrap();
        fs::write(ws.abs("content/en/docs/new.md"), "migrated").unwrap();

        let report = final_copy(&ws, &MigrationConfig::default()).unwrap();
        assert_eq!(report.changes.len(), 1);
        assert_eq!(fs::read_to_string(ws.abs("content/en/docs/new.md")).unwrap(), "new");
    }
}
