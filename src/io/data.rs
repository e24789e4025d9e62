//! Sidecar YAML data files

use crate::error::{MigrateError, Result};
use log::debug;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yml" || ext == "yaml")
        .unwrap_or(false)
}

/// Decode every YAML file directly inside `dir`, keyed by file stem
///
/// Subdirectories and non-YAML files are ignored. A file that does not
/// decode into `T` is an error naming that file.
pub fn read_data_dir<T: DeserializeOwned>(dir: &Path) -> Result<BTreeMap<String, T>> {
    let entries = fs::read_dir(dir).map_err(|e| MigrateError::io_at(dir, e))?;
    let mut records = BTreeMap::new();

    for entry in entries {
        let entry = entry.map_err(|e| MigrateError::io_at(dir, e))?;
        let path = entry.path();
        if !path.is_file() || !is_yaml(&path) {
            continue;
        }
        let Some(key) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let text = fs::read_to_string(&path).map_err(|e| MigrateError::io_at(&path, e))?;
        let record = serde_yaml::from_str(&text).map_err(|e| MigrateError::data_file(&path, e))?;
        debug!("loaded {}", path.display());
        records.insert(key, record);
    }
    Ok(records)
}
