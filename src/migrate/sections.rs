//! Section indexes and page weights driven by the toc data files

use crate::config::MigrationConfig;
use crate::core::fixer::FixerChain;
use crate::core::inject::{add_key_value, add_weight};
use crate::core::toc::{section_index_content, SectionAction, SectionPlan, SectionPlanner, TocSection};
use crate::error::Result;
use crate::io::data::read_data_dir;
use crate::io::fs::Workspace;
use crate::io::report::StepReport;
use crate::io::walker::{apply_to_file, ContentWalker};
use log::{info, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// Plan every section from the toc data files
pub fn plan_sections(ws: &Workspace, config: &MigrationConfig) -> Result<SectionPlan> {
    let data_dir = ws.abs(&config.sections.data_dir);
    info!("Read data from {}", data_dir.display());
    let sections: BTreeMap<String, TocSection> = read_data_dir(&data_dir)?;

    let exists = |rel: &Path| ws.exists(rel);
    let mut planner = SectionPlanner::new(&config.sections.locale_dir, &exists);
    for section in sections.values() {
        planner.plan_section(section);
    }
    Ok(planner.finish())
}

fn execute(ws: &Workspace, plan: &SectionPlan) -> Result<StepReport> {
    let mut report = StepReport::new();
    for action in &plan.actions {
        match action {
            SectionAction::CreateIndex { path, title, weight } => {
                report.record(ws.create_file(path, &section_index_content(title, *weight))?);
            }
            SectionAction::SetWeight { path, weight } => {
                report.merge(apply_to_file(ws, path, &FixerChain::new().with(add_weight(*weight)))?);
            }
            SectionAction::MissingPage { path } => {
                warn!("content file in toc does not exist: {}", path.display());
            }
        }
    }
    Ok(report)
}

/// Add `toc_hide: true` to section indexes no toc mentions
fn hide_untracked(ws: &Workspace, config: &MigrationConfig, plan: &SectionPlan) -> Result<StepReport> {
    let locale_root = ws.abs(&config.sections.locale_dir);
    let walker = ContentWalker::new(ws.abs(&config.sections.docs_dir));
    let section_index = Regex::new(r"/_index[^/]*$")?;
    let hide = FixerChain::new().with(add_key_value("toc_hide", true));

    let mut report = StepReport::new();
    for path in walker.files(&section_index)? {
        let Some(dir) = path.parent().and_then(|d| d.strip_prefix(&locale_root).ok()) else {
            continue;
        };
        if plan.is_hidden(dir) {
            report.merge(apply_to_file(ws, &path, &hide)?);
        }
    }
    Ok(report)
}

pub fn create_sections(ws: &Workspace, config: &MigrationConfig) -> Result<StepReport> {
    let plan = plan_sections(ws, config)?;
    let mut report = execute(ws, &plan)?;
    report.merge(hide_untracked(ws, config, &plan)?);
    Ok(report)
}
