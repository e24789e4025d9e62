//! Filesystem operations rooted at the project directory
//!
//! [`Workspace`] resolves project-relative paths and performs every mutating
//! call. In dry-run mode the mutation is skipped but logged, and the same
//! [`ChangeRecord`] is returned, so the report reads the same either way.

use crate::error::{FixError, FixResult, MigrateError, Result};
use crate::io::report::{ChangeKind, ChangeRecord};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Read a text file
///
/// I/O failures are fatal; a file that is not UTF-8 is a per-file failure.
pub fn read_text(path: &Path) -> Result<FixResult<String>> {
    let bytes = fs::read(path).map_err(|e| MigrateError::io_at(path, e))?;
    Ok(String::from_utf8(bytes).map_err(|e| FixError::Encoding {
        reason: e.utf8_error().to_string(),
    }))
}

/// Replace `path` with `content` through a temp file in the same directory
///
/// Existing file permissions are carried over.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|e| MigrateError::io_at(parent_dir, e))?;

    let permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| MigrateError::io_at(parent_dir, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| MigrateError::io_at(path, e))?;
    temp_file.flush().map_err(|e| MigrateError::io_at(path, e))?;

    if let Some(permissions) = permissions {
        fs::set_permissions(temp_file.path(), permissions)
            .map_err(|e| MigrateError::io_at(path, e))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| MigrateError::io_at(path, e.error))?;
    Ok(())
}

/// Recursively copy `from` into `to`, overwriting files that exist
///
/// Returns the number of files copied.
pub fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| MigrateError::config(format!("{} escapes {}", entry.path().display(), from.display())))?;
        let target = to.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| MigrateError::io_at(&target, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| MigrateError::io_at(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| MigrateError::io_at(entry.path(), e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Move a directory, replacing whatever is at `to`
pub fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        fs::remove_dir_all(to).map_err(|e| MigrateError::io_at(to, e))?;
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| MigrateError::io_at(parent, e))?;
    }
    fs::rename(from, to).map_err(|e| MigrateError::io_at(from, e))
}

/// Project root plus the dry-run switch
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    dry_run: bool,
}

impl Workspace {
    /// Use `root` as the project root
    ///
    /// The root must exist and must not be the filesystem root, since the
    /// migration deletes and recreates directories below it.
    pub fn open(root: impl AsRef<Path>, dry_run: bool) -> Result<Self> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .map_err(|e| MigrateError::project_root(root, e.to_string()))?;
        if root.parent().is_none() {
            return Err(MigrateError::project_root(&root, "refusing to migrate the filesystem root"));
        }
        if !root.is_dir() {
            return Err(MigrateError::project_root(&root, "not a directory"));
        }
        Ok(Self { root, dry_run })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Absolute path of a project-relative path
    pub fn abs(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.abs(rel).exists()
    }

    fn log(&self, change: &ChangeRecord) {
        let mode = if self.dry_run { "[dry-run] " } else { "" };
        if change.from == change.to {
            info!("{}{} {}", mode, change.kind, change.from.display());
        } else {
            info!(
                "{}{} {} -> {}",
                mode,
                change.kind,
                change.from.display(),
                change.to.display()
            );
        }
    }

    /// Record a change, running `apply` unless this is a dry run
    fn perform<F>(&self, change: ChangeRecord, apply: F) -> Result<ChangeRecord>
    where
        F: FnOnce() -> Result<()>,
    {
        self.log(&change);
        if !self.dry_run {
            apply()?;
        }
        Ok(change)
    }

    /// Copy a project directory into another one
    pub fn copy_dir(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<ChangeRecord> {
        let (from, to) = (self.abs(from), self.abs(to));
        let change = ChangeRecord::new(ChangeKind::Copy, &from, &to);
        self.perform(change, || {
            let copied = copy_dir(&from, &to)?;
            debug!("copied {} files into {}", copied, to.display());
            Ok(())
        })
    }

    pub fn move_dir(&self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<ChangeRecord> {
        let (from, to) = (self.abs(from), self.abs(to));
        let change = ChangeRecord::new(ChangeKind::Move, &from, &to);
        self.perform(change, || move_dir(&from, &to))
    }

    /// Rename absolute paths inside the project
    pub fn rename(&self, from: &Path, to: &Path) -> Result<ChangeRecord> {
        let change = ChangeRecord::new(ChangeKind::Rename, from, to);
        self.perform(change, || {
            fs::rename(from, to).map_err(|e| MigrateError::io_at(from, e))
        })
    }

    /// Write a generated file, creating parent directories
    pub fn create_file(&self, rel: impl AsRef<Path>, content: &str) -> Result<ChangeRecord> {
        let path = self.abs(rel);
        let change = ChangeRecord::in_place(ChangeKind::Create, &path);
        self.perform(change, || write_atomic(&path, content))
    }

    /// Overwrite an existing file with rewritten content
    pub fn rewrite_file(&self, path: &Path, content: &str) -> Result<ChangeRecord> {
        let change = ChangeRecord::in_place(ChangeKind::Rewrite, path);
        self.perform(change, || write_atomic(path, content))
    }

    /// Remove a file or directory tree; `None` when there is nothing to remove
    pub fn remove(&self, rel: impl AsRef<Path>) -> Result<Option<ChangeRecord>> {
        let path = self.abs(rel);
        if !path.exists() {
            return Ok(None);
        }
        let change = ChangeRecord::in_place(ChangeKind::Remove, &path);
        self.perform(change, || {
            let result = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            result.map_err(|e| MigrateError::io_at(&path, e))
        })
        .map(Some)
    }
}
