//! Glossary bundle generated from term data files

use crate::config::MigrationConfig;
use crate::core::glossary::{GlossaryEntry, EXAMPLE_KEY, GLOSSARY_INDEX};
use crate::error::Result;
use crate::io::data::read_data_dir;
use crate::io::fs::Workspace;
use crate::io::report::StepReport;
use log::info;
use std::collections::BTreeMap;

pub fn create_glossary(ws: &Workspace, config: &MigrationConfig) -> Result<StepReport> {
    let data_dir = ws.abs(&config.glossary.data_dir);
    info!("Read data from {}", data_dir.display());
    let entries: BTreeMap<String, GlossaryEntry> = read_data_dir(&data_dir)?;

    let output_dir = &config.glossary.output_dir;
    let mut report = StepReport::new();
    report.record(ws.create_file(output_dir.join("index.md"), GLOSSARY_INDEX)?);

    for (key, entry) in entries.iter().filter(|(key, _)| key.as_str() != EXAMPLE_KEY) {
        let page = entry.render(&config.glossary.date);
        report.record(ws.create_file(output_dir.join(format!("{key}.md")), &page)?);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_glossary() {
        let temp_dir = TempDir::new().unwrap();
        let ws = Workspace::open(temp_dir.path(), false).unwrap();
        fs::create_dir_all(ws.abs("data/glossary")).unwrap();
        fs::write(ws.abs("data/glossary/_example.yml"), "name: Example\n").unwrap();
        fs::write(
            ws.abs("data/glossary/pod.yml"),
            "name: Pod\nid: pod\nshort-description: Smallest unit.\ntags:\n- fundamental\n",
        )
        .unwrap();

        let report = create_glossary(&ws, &MigrationConfig::default()).unwrap();
        assert_eq!(report.changes.len(), 2);

        let dir = ws.abs("content/en/docs/reference/glossary");
        assert_eq!(fs::read_to_string(dir.join("index.md")).unwrap(), GLOSSARY_INDEX);
        assert!(!dir.join("_example.md").exists());

        let pod = fs::read_to_string(dir.join("pod.md")).unwrap();
        assert!(pod.starts_with("---\ntitle: Pod\nid: pod\ndate: 2018-04-12\n"));
        assert!(pod.contains("tags:\n- fundamental\n---\nSmallest unit.\n<!--more-->\n"));
    }

    #[test]
    fn test_missing_data_dir_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let ws = Workspace::open(temp_dir.path(), false).unwrap();
        assert!(create_glossary(&ws, &MigrationConfig::default()).is_err());
    }
}
