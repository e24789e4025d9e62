//! Error types for the sitemig library
//!
//! Two classes of failure exist. [`MigrateError`] covers setup and I/O problems
//! that make the run's preconditions unmet; these abort the migration.
//! [`FixError`] covers a single fixer failing on a single file; these are
//! logged, recorded in the report and the run continues.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort the migration run
#[derive(Error, Debug)]
pub enum MigrateError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path
    #[error("I/O error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The project root cannot be resolved or is unsafe to operate on
    #[error("Invalid project root {path}: {reason}")]
    ProjectRoot { path: PathBuf, reason: String },

    /// A sidecar data file could not be decoded into its record shape
    #[error("Invalid data file {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid migration configuration
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MigrateError>;

impl MigrateError {
    /// Create an I/O error carrying the path it happened on
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Create a new project root error
    pub fn project_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProjectRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new data file error
    pub fn data_file(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::DataFile {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Non-fatal failure of one fixer on one file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    /// A front matter field did not hold the expected long-form date
    #[error("{field}: cannot parse {value:?} as a long-form date: {reason}")]
    DateFormat {
        field: String,
        value: String,
        reason: String,
    },

    /// A callout annotation appeared while another callout was still open
    #[error("line {line}: {found} callout overlaps open {open} callout")]
    OverlappingCallout {
        line: usize,
        open: String,
        found: String,
    },

    /// The file a front matter edit targets does not exist
    #[error("target file does not exist")]
    MissingTarget,

    /// The file is not valid UTF-8 and was left untouched
    #[error("not valid UTF-8: {reason}")]
    Encoding { reason: String },
}

impl FixError {
    /// Create a new date format error
    pub fn date_format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::DateFormat {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for a single fixer application
pub type FixResult<T> = std::result::Result<T, FixError>;
