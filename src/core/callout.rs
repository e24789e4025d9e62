//! Kramdown callout annotations to Hugo block shortcodes
//!
//! Legacy pages mark callouts with an inline attribute line such as
//! `{: .note}`. When the annotation is the first line of a paragraph, the
//! callout covers the lines that follow it up to the next paragraph boundary.
//! When it comes after other lines, it closes over the paragraph it trails.
//!
//! The conversion is a line-oriented state machine. [`State::transition`] is
//! the whole transition table; [`convert_callouts`] only executes the actions
//! it returns against the paragraph and output buffers. Every line that is not
//! an annotation is emitted with its content and position intact.

use crate::core::fixer::Fixer;
use crate::core::front_matter::DELIMITER;
use crate::error::{FixError, FixResult};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Substring every annotation line contains
pub const ANNOTATION_MARKER: &str = "{:";

/// Annotation classes that become callouts
pub const CALLOUT_KINDS: &[&str] = &["note", "caution", "warning"];

/// Path fragments of files whose callouts are left for manual handling
pub const DEFAULT_EXCLUSIONS: &[&str] = &["style-guide"];

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{:\s*\.([^}]*)\}").unwrap());

/// Kind and indentation of one callout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub indent: String,
    pub kind: String,
}

impl Callout {
    pub fn new(indent: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            kind: kind.into(),
        }
    }

    pub fn open_marker(&self) -> String {
        format!("{}{{{{< {} >}}}}\n", self.indent, self.kind)
    }

    pub fn close_marker(&self) -> String {
        format!("{}{{{{< /{} >}}}}\n", self.indent, self.kind)
    }
}

/// How a single input line is seen by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// Blank line or a bare `---` line
    Boundary,
    /// Callout annotation, with any text around it on the same line
    Annotation {
        callout: Callout,
        leading: Option<&'a str>,
        trailing: Option<&'a str>,
    },
    /// Any other line
    Text,
}

impl<'a> LineEvent<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == DELIMITER {
            return Self::Boundary;
        }
        if !line.contains(ANNOTATION_MARKER) {
            return Self::Text;
        }

        let Some(caps) = ANNOTATION_RE.captures(line) else {
            return Self::Text;
        };
        let (Some(whole), Some(class)) = (caps.get(0), caps.get(1)) else {
            return Self::Text;
        };
        let kind = class.as_str().trim();
        if !CALLOUT_KINDS.contains(&kind) {
            return Self::Text;
        }

        let indent = &line[..line.len() - line.trim_start().len()];
        let leading = line[..whole.start()].trim_end();
        let trailing = line[whole.end()..].trim();
        Self::Annotation {
            callout: Callout::new(indent, kind),
            leading: (!leading.trim().is_empty()).then_some(leading),
            trailing: (!trailing.is_empty()).then_some(trailing),
        }
    }
}

/// Position of the scanner relative to paragraphs and callouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Between paragraphs; the paragraph buffer is empty
    Idle,
    /// Inside a paragraph; `wrapped` is set once a trailing annotation closed it
    InParagraph { wrapped: Option<String> },
    /// A callout opened on the paragraph's first line is still open
    SpanOpen(Callout),
}

/// What to do with the current line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append the line to the paragraph buffer
    Append,
    /// Emit the event's open marker; the span stays open
    Open,
    /// Emit open marker, the buffered paragraph and close marker
    Wrap,
    /// Append the boundary line and flush the paragraph
    Flush,
    /// Close the open span, append the boundary line and flush
    CloseAndFlush,
    /// Close the open span on a repeated annotation of the same kind
    Close,
}

impl State {
    /// Transition table of the converter
    ///
    /// `line` is the 1-based line number, used only for error reporting.
    pub fn transition(&self, event: &LineEvent<'_>, line: usize) -> FixResult<(State, Action)> {
        let next = match (self, event) {
            (State::Idle, LineEvent::Text) => (State::InParagraph { wrapped: None }, Action::Append),
            (State::Idle, LineEvent::Annotation { callout, .. }) => {
                (State::SpanOpen(callout.clone()), Action::Open)
            }
            (State::Idle | State::InParagraph { .. }, LineEvent::Boundary) => {
                (State::Idle, Action::Flush)
            }
            (State::InParagraph { wrapped }, LineEvent::Text) => (
                State::InParagraph {
                    wrapped: wrapped.clone(),
                },
                Action::Append,
            ),
            (State::InParagraph { wrapped: None }, LineEvent::Annotation { callout, .. }) => (
                State::InParagraph {
                    wrapped: Some(callout.kind.clone()),
                },
                Action::Wrap,
            ),
            (State::InParagraph { wrapped: Some(open) }, LineEvent::Annotation { callout, .. }) => {
                return Err(FixError::OverlappingCallout {
                    line,
                    open: open.clone(),
                    found: callout.kind.clone(),
                });
            }
            (State::SpanOpen(open), LineEvent::Text) => (State::SpanOpen(open.clone()), Action::Append),
            (State::SpanOpen(open), LineEvent::Annotation { callout, .. })
                if open.kind == callout.kind =>
            {
                (
                    State::InParagraph {
                        wrapped: Some(open.kind.clone()),
                    },
                    Action::Close,
                )
            }
            (State::SpanOpen(open), LineEvent::Annotation { callout, .. }) => {
                return Err(FixError::OverlappingCallout {
                    line,
                    open: open.kind.clone(),
                    found: callout.kind.clone(),
                });
            }
            (State::SpanOpen(_), LineEvent::Boundary) => (State::Idle, Action::CloseAndFlush),
        };
        Ok(next)
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

/// Convert every callout annotation in `text` into block shortcodes
///
/// Text without any annotation marker is returned unchanged. Whether the
/// input ended with a newline is preserved.
pub fn convert_callouts(text: &str) -> FixResult<String> {
    if !text.contains(ANNOTATION_MARKER) {
        return Ok(text.to_string());
    }

    let ends_with_newline = text.ends_with('\n');
    let body = text.strip_suffix('\n').unwrap_or(text);

    let mut out = String::with_capacity(text.len() + 64);
    let mut paragraph = String::new();
    let mut state = State::Idle;

    for (idx, line) in body.split('\n').enumerate() {
        let event = LineEvent::classify(line);
        let (next, action) = state.transition(&event, idx + 1)?;

        match (action, &event) {
            (Action::Append, _) => push_line(&mut paragraph, line),
            (Action::Open, LineEvent::Annotation { callout, leading, trailing }) => {
                out.push_str(&callout.open_marker());
                for text in [leading, trailing].into_iter().flatten() {
                    push_line(&mut paragraph, &format!("{}{}", callout.indent, text.trim_start()));
                }
            }
            (Action::Wrap, LineEvent::Annotation { callout, leading, trailing }) => {
                if let Some(leading) = leading {
                    push_line(&mut paragraph, leading);
                }
                out.push_str(&callout.open_marker());
                out.push_str(&paragraph);
                out.push_str(&callout.close_marker());
                paragraph.clear();
                if let Some(trailing) = trailing {
                    push_line(&mut paragraph, &format!("{}{}", callout.indent, trailing));
                }
            }
            (Action::Close, LineEvent::Annotation { leading, trailing, .. }) => {
                if let Some(leading) = leading {
                    push_line(&mut paragraph, leading);
                }
                out.push_str(&paragraph);
                if let State::SpanOpen(open) = &state {
                    out.push_str(&open.close_marker());
                }
                paragraph.clear();
                if let (Some(trailing), State::SpanOpen(open)) = (trailing, &state) {
                    push_line(&mut paragraph, &format!("{}{}", open.indent, trailing));
                }
            }
            (Action::Flush, _) => {
                push_line(&mut paragraph, line);
                out.push_str(&paragraph);
                paragraph.clear();
            }
            (Action::CloseAndFlush, _) => {
                if let State::SpanOpen(open) = &state {
                    paragraph.push_str(&open.close_marker());
                }
                push_line(&mut paragraph, line);
                out.push_str(&paragraph);
                paragraph.clear();
            }
            (Action::Open | Action::Wrap | Action::Close, _) => push_line(&mut paragraph, line),
        }

        state = next;
    }

    if let State::SpanOpen(open) = &state {
        paragraph.push_str(&open.close_marker());
    }
    out.push_str(&paragraph);

    if !ends_with_newline && out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// Callout conversion that skips excluded paths
#[derive(Debug, Clone)]
pub struct CalloutConverter {
    exclusions: Vec<String>,
}

impl Default for CalloutConverter {
    fn default() -> Self {
        Self {
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CalloutConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclusions<I, S>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclusions: exclusions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.exclusions.iter().any(|fragment| path.contains(fragment.as_str()))
    }

    pub fn convert(&self, path: &Path, text: &str) -> FixResult<String> {
        if self.is_excluded(path) {
            return Ok(text.to_string());
        }
        convert_callouts(text)
    }

    pub fn into_fixer(self) -> Fixer {
        Fixer::new("callouts", move |path, text| self.convert(path, text))
    }
}
