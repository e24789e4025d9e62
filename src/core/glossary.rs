//! Glossary term records and the pages generated from them

use serde::Deserialize;
use std::fmt;

/// Data file key that holds the template entry, never rendered
pub const EXAMPLE_KEY: &str = "_example";

/// Front matter of the glossary bundle index
pub const GLOSSARY_INDEX: &str = "---
approvers:
- chenopis
- abiogenesis-now
title: Standardized Glossary
layout: glossary
noedit: true
default_active_tag: fundamental
weight: 5
---

";

/// One glossary term, decoded from `data/glossary/<key>.yml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlossaryEntry {
    pub name: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "short-description")]
    pub short_description: Option<String>,
    #[serde(rename = "long-description")]
    pub long_description: Option<String>,
    #[serde(rename = "full-link")]
    pub full_link: Option<String>,
    pub aka: Option<Aka>,
    pub tags: Option<Vec<String>>,
}

/// Alternative names, written either as one string or as a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Aka {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for Aka {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aka::One(name) => f.write_str(name),
            Aka::Many(names) => f.write_str(&names.join(", ")),
        }
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

impl GlossaryEntry {
    /// Render the content page for this term
    pub fn render(&self, date: &str) -> String {
        let aka = self.aka.as_ref().map(ToString::to_string).unwrap_or_default();
        let tags: String = self
            .tags
            .iter()
            .flatten()
            .map(|tag| format!("- {tag}\n"))
            .collect();

        let mut page = String::from("---\n");
        page.push_str(&field("title", text(&self.name)));
        page.push_str(&field("id", text(&self.id)));
        page.push_str(&field("date", date));
        page.push_str(&field("full_link", text(&self.full_link)));
        page.push_str(&field("aka", &aka));
        page.push_str("tags:\n");
        page.push_str(&tags);
        page.push_str("---\n");
        page.push_str(text(&self.short_description));
        page.push_str("\n<!--more-->\n\n");
        page.push_str(text(&self.long_description));
        page.push('\n');
        page
    }
}

fn field(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{key}:\n")
    } else {
        format!("{key}: {value}\n")
    }
}
