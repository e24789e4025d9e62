//! Migration steps and the orchestrator that runs them in order
//!
//! Each step takes the workspace and configuration and returns the changes it
//! made as a [`StepReport`]. [`Migrator::run`] merges them into one report.

pub mod glossary;
pub mod layout;
pub mod replacements;
pub mod sections;

use crate::config::MigrationConfig;
use crate::error::Result;
use crate::io::fs::Workspace;
use crate::io::report::StepReport;
use log::info;
use std::path::Path;

pub type Step = fn(&Workspace, &MigrationConfig) -> Result<StepReport>;

/// Steps in the order they run
pub const STEPS: [(&str, Step); 6] = [
    ("Start Fresh", layout::start_fresh),
    ("Copy And Rename", layout::copy_and_rename),
    ("Create Glossary", glossary::create_glossary),
    ("Replacement", replacements::apply_replacements),
    ("Create Sections", sections::create_sections),
    ("Final", layout::final_copy),
];

#[derive(Debug)]
pub struct Migrator {
    config: MigrationConfig,
    workspace: Workspace,
}

impl Migrator {
    pub fn new(config: MigrationConfig, root: impl AsRef<Path>, dry_run: bool) -> Result<Self> {
        config.validate()?;
        let workspace = Workspace::open(root, dry_run)?;
        Ok(Self { config, workspace })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Run every step; the first fatal error stops the run
    pub fn run(&self) -> Result<StepReport> {
        if self.workspace.is_dry_run() {
            info!("trial mode on");
        }

        let mut report = StepReport::new();
        for (name, step) in STEPS {
            info!("Start {} Step …", name);
            report.merge(step(&self.workspace, &self.config)?);
        }

        info!(
            "Done. {} changes, {} file(s) need manual follow-up",
            report.changes.len(),
            report.failures.len()
        );
        Ok(report)
    }
}
