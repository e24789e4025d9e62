//! Table of contents records and section planning
//!
//! Each data file at the root of the data directory describes one top-level
//! section as a tree of pages and nested sections. Planning walks that tree
//! and decides which section index files to create and which pages get an
//! ordering weight, without touching the filesystem itself; existence checks
//! go through a caller supplied closure.

use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// One top-level section data file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TocSection {
    pub bigheader: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub landing_page: Option<String>,
    pub toc: Vec<TocEntry>,
}

/// A node in the table of contents
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TocEntry {
    /// Path of a content page, relative to the locale root (e.g. `docs/concepts/pods.md`)
    Page(String),
    /// Titled group of further entries
    Section(TocNode),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TocNode {
    pub title: Option<String>,
    pub landing_page: Option<String>,
    pub section: Vec<TocEntry>,
}

/// Filesystem change decided by the planner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionAction {
    /// Write a section index with a title and weight
    CreateIndex {
        path: PathBuf,
        title: String,
        weight: u32,
    },
    /// Add an ordering weight to an existing page
    SetWeight { path: PathBuf, weight: u32 },
    /// A page listed in the toc is not in the content tree
    MissingPage { path: PathBuf },
}

/// Output of planning all sections
#[derive(Debug, Clone, Default)]
pub struct SectionPlan {
    pub actions: Vec<SectionAction>,
    /// Directories (relative to the locale root) that appear in some toc
    pub toc_dirs: BTreeSet<PathBuf>,
}

impl SectionPlan {
    /// Whether a section directory is absent from every toc
    ///
    /// A directory is shown when it holds toc pages itself or is an ancestor
    /// of a directory that does.
    pub fn is_hidden(&self, dir: &Path) -> bool {
        !self.toc_dirs.iter().any(|toc_dir| toc_dir.starts_with(dir))
    }
}

/// Ordering weight for the entry at `index` (0-based) among its siblings
pub fn weight_for(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX / 10) * 10
}

/// Title derived from a directory name: `access-control` becomes `Access Control`
pub fn title_from_dir(dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Walks toc trees and accumulates a [`SectionPlan`]
pub struct SectionPlanner<'a> {
    content_prefix: PathBuf,
    exists: &'a dyn Fn(&Path) -> bool,
    added: HashSet<PathBuf>,
    plan: SectionPlan,
}

impl<'a> SectionPlanner<'a> {
    /// `content_prefix` is the locale root relative to the project (e.g. `content/en`);
    /// `exists` answers whether a project-relative path exists
    pub fn new(content_prefix: impl Into<PathBuf>, exists: &'a dyn Fn(&Path) -> bool) -> Self {
        Self {
            content_prefix: content_prefix.into(),
            exists,
            added: HashSet::new(),
            plan: SectionPlan::default(),
        }
    }

    /// Plan every nested section of one top-level section
    pub fn plan_section(&mut self, section: &TocSection) {
        for (index, entry) in section.toc.iter().enumerate() {
            if let TocEntry::Section(node) = entry {
                self.plan_node(index, node);
            }
        }
    }

    fn plan_node(&mut self, index: usize, node: &TocNode) {
        let mut title = node.title.clone().unwrap_or_default();
        let section_weight = weight_for(index);
        let mut index_planned = false;

        for (i, entry) in node.section.iter().enumerate() {
            let page = match entry {
                TocEntry::Section(child) => {
                    self.plan_node(i, child);
                    continue;
                }
                TocEntry::Page(page) => page.trim(),
            };

            if !page.starts_with("docs") {
                debug!("skip toc file: {}", page);
                continue;
            }
            if page.ends_with("index.md") || page.contains("generated") {
                continue;
            }

            let page = Path::new(page);
            let dir = page.parent().map(Path::to_path_buf).unwrap_or_default();
            self.plan.toc_dirs.insert(dir.clone());

            if !index_planned {
                index_planned = true;
                self.plan_index(&dir, &mut title, section_weight);
            }

            let rel = self.content_prefix.join(page);
            if !(self.exists)(&rel) {
                self.plan.actions.push(SectionAction::MissingPage { path: rel });
                continue;
            }
            self.plan.actions.push(SectionAction::SetWeight {
                path: rel,
                weight: weight_for(i),
            });
        }
    }

    fn plan_index(&mut self, dir: &Path, title: &mut String, weight: u32) {
        let section_dir = self.content_prefix.join(dir);
        let index_md = section_dir.join("_index.md");
        let index_html = section_dir.join("_index.html");

        let claimed_twice = self.added.contains(&index_md);
        if claimed_twice {
            *title = title_from_dir(&section_dir);
            warn!(
                "{} section already added, ambiguous; using title {:?}",
                index_md.display(),
                title
            );
        }

        if claimed_twice || (!(self.exists)(&index_md) && !(self.exists)(&index_html)) {
            self.added.insert(index_md.clone());
            self.plan.actions.push(SectionAction::CreateIndex {
                path: index_md,
                title: title.clone(),
                weight,
            });
        }
    }

    pub fn finish(self) -> SectionPlan {
        self.plan
    }
}

/// Front matter of a generated section index
pub fn section_index_content(title: &str, weight: u32) -> String {
    format!("---\ntitle: {title:?}\nweight: {weight}\n---\n\n")
}
