//! Front matter location and insertion
//!
//! The front matter block is never parsed as YAML here. It is treated as an
//! opaque run of lines between a `---` line at offset zero and the next `---`
//! line, and additions are spliced in as text right before the closing
//! delimiter. Everything outside the inserted lines is preserved byte for byte.

use std::ops::Range;

/// Delimiter line that opens and closes a front matter block
pub const DELIMITER: &str = "---";

/// Byte offsets of a front matter block inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterSpan {
    /// Lines between the two delimiters, including the last body line's newline
    pub body: Range<usize>,
    /// The closing delimiter line, including its newline if present
    pub closing: Range<usize>,
}

impl FrontMatterSpan {
    /// Whole block, from the opening delimiter to the end of the closing one
    pub fn full(&self) -> Range<usize> {
        0..self.closing.end
    }

    /// Body text of the block inside `text`
    pub fn body_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.body.clone()]
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}

/// Find the front matter block at the start of `text`
///
/// Returns `None` when the first line is not a delimiter or when no closing
/// delimiter line follows it.
pub fn locate(text: &str) -> Option<FrontMatterSpan> {
    let mut lines = text.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_delimiter(opening) || !opening.ends_with('\n') {
        return None;
    }

    let body_start = opening.len();
    let mut offset = body_start;
    for line in lines {
        if is_delimiter(line) {
            return Some(FrontMatterSpan {
                body: body_start..offset,
                closing: offset..offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}

/// Insert `addition` as new lines immediately before the closing delimiter
///
/// Documents without front matter are returned unchanged.
pub fn append_to_front_matter(text: &str, addition: &str) -> String {
    let Some(span) = locate(text) else {
        return text.to_string();
    };

    let addition = addition.trim_end_matches('\n');
    let insert_at = span.closing.start;

    let mut out = String::with_capacity(text.len() + addition.len() + 1);
    out.push_str(&text[..insert_at]);
    out.push_str(addition);
    out.push('\n');
    out.push_str(&text[insert_at..]);
    out
}
