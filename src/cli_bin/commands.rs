//! Bridges parsed arguments to the library migrator

use crate::cli_bin::args::Cli;
use anyhow::{Context, Result};
use log::{debug, warn};
use sitemig::io::report::render;
use sitemig::{MigrationConfig, Migrator};

fn load_config(cli: &Cli) -> Result<MigrationConfig> {
    match &cli.config {
        Some(path) => MigrationConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(MigrationConfig::default()),
    }
}

/// Run the migration and print the report when asked for one
pub fn migrate_command(cli: &Cli) -> Result<()> {
    debug!("Executing migration with args: {:?}", cli);

    let config = load_config(cli)?;
    let migrator = Migrator::new(config, &cli.project_root, cli.dry_run)
        .with_context(|| format!("opening project root {}", cli.project_root.display()))?;
    let report = migrator.run()?;

    if cli.dry_run {
        let rendered = render(&report, migrator.workspace().root(), cli.report_format.into())?;
        print!("{rendered}");
    }

    if !report.failures.is_empty() {
        warn!(
            "{} file(s) could not be fully migrated and need manual follow-up",
            report.failures.len()
        );
    }
    Ok(())
}
