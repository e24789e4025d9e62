//! Fixers that add lines to a document's front matter
//!
//! Each constructor builds the text of the addition once and returns a
//! [`Fixer`] that splices it in with [`append_to_front_matter`]. None of these
//! can fail; documents without front matter pass through unchanged.

use crate::core::fixer::Fixer;
use crate::core::front_matter::append_to_front_matter;
use std::fmt::Display;

/// Append an arbitrary `key: value` line
pub fn add_key_value(key: &str, value: impl Display) -> Fixer {
    add_lines(format!("add {key}"), format!("{key}: {value}"))
}

/// Append an ordering weight
pub fn add_weight(weight: u32) -> Fixer {
    add_lines("add weight", format!("weight: {weight}"))
}

/// Append a quoted `linkTitle`
pub fn add_link_title(title: &str) -> Fixer {
    add_lines("add linkTitle", format!("linkTitle: {title:?}"))
}

/// Place the document in the docs main menu at `weight`
pub fn add_to_docs_main_menu(weight: u32) -> Fixer {
    add_lines(
        "add main menu",
        format!("main_menu: true\nweight: {weight}"),
    )
}

fn add_lines(name: impl Into<String>, addition: String) -> Fixer {
    Fixer::infallible(name.into(), move |text| {
        append_to_front_matter(text, &addition)
    })
}
