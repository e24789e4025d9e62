//! Front matter edits and the content fixer chains

use crate::config::MigrationConfig;
use crate::core::callout::CalloutConverter;
use crate::core::dates::fix_dates;
use crate::core::fixer::{Fixer, FixerChain};
use crate::core::inject::{add_link_title, add_to_docs_main_menu};
use crate::core::shortcodes::{include_to_front_matter, liquid_to_shortcodes, replace_literal};
use crate::error::Result;
use crate::io::fs::Workspace;
use crate::io::report::StepReport;
use crate::io::walker::{apply_fixers, apply_to_file};
use log::warn;

/// Liquid translations followed by callout conversion
pub fn main_chain(config: &MigrationConfig) -> FixerChain {
    liquid_to_shortcodes()
        .into_iter()
        .chain(std::iter::once(
            CalloutConverter::with_exclusions(config.callout_exclusions.iter().cloned()).into_fixer(),
        ))
        .collect()
}

pub fn blog_chain() -> FixerChain {
    FixerChain::new().with(fix_dates())
}

fn edit_file(ws: &Workspace, rel: &std::path::Path, fixer: Fixer) -> Result<StepReport> {
    apply_to_file(ws, rel, &FixerChain::new().with(fixer))
}

pub fn apply_replacements(ws: &Workspace, config: &MigrationConfig) -> Result<StepReport> {
    let mut report = StepReport::new();

    for link in &config.link_titles {
        report.merge(edit_file(ws, &link.file, add_link_title(&link.title))?);
    }

    for (i, file) in config.main_menu.iter().enumerate() {
        let weight = config.main_menu_weight(i);
        report.merge(edit_file(ws, file, add_to_docs_main_menu(weight))?);
    }

    for replacement in &config.literal_replacements {
        let fixer = replace_literal(replacement.from.as_str(), replacement.to.as_str());
        report.merge(edit_file(ws, &replacement.file, fixer)?);
    }

    for rel in &config.removals {
        match ws.remove(rel)? {
            Some(change) => report.record(change),
            None => warn!("{}: does not exist, nothing to remove", rel.display()),
        }
    }

    let content_re = config.content_regex()?;
    report.merge(apply_fixers(ws, &config.content_dir, &content_re, &main_chain(config))?);
    report.merge(apply_fixers(
        ws,
        &config.content_dir,
        &config.blog_regex()?,
        &blog_chain(),
    )?);

    let includes: FixerChain = config
        .include_templates
        .iter()
        .map(|t| include_to_front_matter(&t.include, &t.key, &t.value))
        .collect();
    if !includes.names().is_empty() {
        report.merge(apply_fixers(ws, &config.content_dir, &content_re, &includes)?);
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
    fn test_main_chain_order() {
        let chain = main_chain(&MigrationConfig::default());
        assert_eq!(
            chain.names(),
            vec![
                "broken tooltip",
                "glossary tooltip",
                "glossary definition",
                "code include",
                "capture",
                "callouts",
            ]
        );
    }

    #[test]
    fn test_apply_replacements() {
        let temp_dir = TempDir::new().unwrap();
        let ws = Workspace::open(temp_dir.path(), false).unwrap();
        let docs = ws.abs("content/en/docs");
        fs::create_dir_all(docs.join("home")).unwrap();
        fs::create_dir_all(docs.join("reference")).unwrap();
        fs::create_dir_all(ws.abs("content/en/blog")).unwrap();
        fs::write(docs.join("home/_index.md"), "---\ntitle: Home\nlayout: docsportal\n---\nhi\n").unwrap();
        fs::write(docs.join("reference/_index.md"), "---\ntitle: Reference\n---\n").unwrap();
        fs::write(docs.join("reference/glossary.md"), "old").unwrap();
        fs::write(
            docs.join("page.md"),
            "---\ntitle: Page\n---\n{% include templates/tutorial.md %}\nSee {% glossary_tooltip term_id=\"pod\" %}.\n",
        )
        .unwrap();
        fs::write(
            ws.abs("content/en/blog/post.md"),
            "---\ndate: Friday, July 02, 2015\n---\n",
        )
        .unwrap();

        let report = apply_replacements(&ws, &MigrationConfig::default()).unwrap();

        assert_eq!(
            fs::read_to_string(docs.join("home/_index.md")).unwrap(),
            "---\ntitle: Home\nlayout: docsportal_home\nlinkTitle: \"Home\"\nmain_menu: true\nweight: 20\n---\nhi\n"
        );
        assert_eq!(
            fs::read_to_string(docs.join("reference/_index.md")).unwrap(),
            "---\ntitle: Reference\nlinkTitle: \"Reference\"\nmain_menu: true\nweight: 70\n---\n"
        );
        assert!(!docs.join("reference/glossary.md").exists());
        assert_eq!(
            fs::read_to_string(docs.join("page.md")).unwrap(),
            "---\ntitle: Page\ncontent_template: templates/tutorial\n---\n\nSee {{< glossary_tooltip term_id=\"pod\" >}}.\n"
        );
        assert_eq!(
            fs::read_to_string(ws.abs("content/en/blog/post.md")).unwrap(),
            "---\ndate: 2015-07-02\n---\n"
        );

        // setup, concepts, tasks and tutorials indexes are absent
        assert_eq!(report.failures.len(), 4);
        assert!(report.failures.iter().all(|f| f.fixer == "add main menu"));
    }
}
