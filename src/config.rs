//! Migration configuration
//!
//! Every path, table and rule the migration uses lives in [`MigrationConfig`].
//! The defaults describe the legacy Kubernetes docs layout; a YAML file can
//! override any subset of fields.

use crate::error::{MigrateError, Result};
use crate::io::walker::RenameRule;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A source and destination, both relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPair {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl PathPair {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// `linkTitle` to add to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTitle {
    pub file: PathBuf,
    pub title: String,
}

/// Literal replacement confined to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralReplacement {
    pub file: PathBuf,
    pub from: String,
    pub to: String,
}

/// Include directive that becomes a front matter entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeTemplate {
    pub include: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryConfig {
    /// Directory of term data files
    pub data_dir: PathBuf,
    /// Bundle directory the term pages are written to
    pub output_dir: PathBuf,
    /// Date stamped on every generated term page
    pub date: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            data_dir: "data/glossary".into(),
            output_dir: "content/en/docs/reference/glossary".into(),
            date: "2018-04-12".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Directory holding one toc data file per top-level section
    pub data_dir: PathBuf,
    /// Locale root that toc page paths are relative to
    pub locale_dir: PathBuf,
    /// Subtree whose section indexes are hidden when no toc mentions them
    pub docs_dir: PathBuf,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            locale_dir: "content/en".into(),
            docs_dir: "content/en/docs".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Target content root, removed at the start of a run
    pub content_dir: PathBuf,
    pub copies: Vec<PathPair>,
    pub moves: Vec<PathPair>,
    /// Tree-wide renames under `content_dir`
    pub rename_rules: Vec<RenameRule>,
    /// One-off renames applied after the rules
    pub renames: Vec<PathPair>,
    pub glossary: GlossaryConfig,
    pub link_titles: Vec<LinkTitle>,
    /// Section indexes placed in the docs main menu, in menu order
    pub main_menu: Vec<PathBuf>,
    pub main_menu_first_weight: u32,
    pub main_menu_weight_step: u32,
    pub literal_replacements: Vec<LiteralReplacement>,
    pub removals: Vec<PathBuf>,
    /// Files the main fixer chain runs on
    pub content_pattern: String,
    /// Files the date fixer runs on
    pub blog_pattern: String,
    /// Path fragments excluded from callout conversion
    pub callout_exclusions: Vec<String>,
    pub include_templates: Vec<IncludeTemplate>,
    pub sections: SectionsConfig,
    /// Copied over the result as the last step
    pub final_copies: Vec<PathPair>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".into(),
            copies: vec![
                PathPair::new("docs", "content/en/docs"),
                PathPair::new("blog", "content/en/blog"),
                PathPair::new("cn/docs", "content/cn/docs"),
            ],
            moves: vec![PathPair::new(
                "content/en/docs/reference/generated",
                "static/reference/generated",
            )],
            rename_rules: vec![
                RenameRule::new("index.md", "_index.md"),
                RenameRule::new("index.html", "_index.html").under("doc"),
            ],
            renames: vec![PathPair::new(
                "content/en/blog/index.html",
                "content/en/blog/_index.md",
            )],
            glossary: GlossaryConfig::default(),
            link_titles: vec![
                LinkTitle {
                    file: "content/en/docs/home/_index.md".into(),
                    title: "Home".to_string(),
                },
                LinkTitle {
                    file: "content/en/docs/reference/_index.md".into(),
                    title: "Reference".to_string(),
                },
            ],
            main_menu: ["home", "setup", "concepts", "tasks", "tutorials", "reference"]
                .iter()
                .map(|section| PathBuf::from(format!("content/en/docs/{section}/_index.md")))
                .collect(),
            main_menu_first_weight: 20,
            main_menu_weight_step: 10,
            literal_replacements: vec![LiteralReplacement {
                file: "content/en/docs/home/_index.md".into(),
                from: "layout: docsportal".to_string(),
                to: "layout: docsportal_home".to_string(),
            }],
            removals: vec!["content/en/docs/reference/glossary.md".into()],
            content_pattern: "md$".to_string(),
            blog_pattern: ".*blog/.*md$".to_string(),
            callout_exclusions: vec!["style-guide".to_string()],
            include_templates: vec![IncludeTemplate {
                include: "{% include templates/tutorial.md %}".to_string(),
                key: "content_template".to_string(),
                value: "templates/tutorial".to_string(),
            }],
            sections: SectionsConfig::default(),
            final_copies: vec![
                PathPair::new("work/content", "content"),
                PathPair::new("work/content_preserved", "content"),
            ],
        }
    }
}

impl MigrationConfig {
    /// Load overrides from a YAML file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MigrateError::io_at(path, e))?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the patterns compile and every path stays inside the project
    pub fn validate(&self) -> Result<()> {
        self.content_regex()?;
        self.blog_regex()?;

        let relative = [&self.content_dir, &self.glossary.output_dir, &self.sections.docs_dir];
        for path in relative {
            if path.is_absolute() || path.as_os_str().is_empty() {
                return Err(MigrateError::config(format!(
                    "{} must be a non-empty path relative to the project root",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn content_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.content_pattern)?)
    }

    pub fn blog_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.blog_pattern)?)
    }

    /// Main menu weight of the entry at `index`
    pub fn main_menu_weight(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.main_menu_first_weight
            .saturating_add(index.saturating_mul(self.main_menu_weight_step))
    }
}
