//! Composable text fixers
//!
//! A [`Fixer`] maps a file's path and current text to new text, or fails with
//! a [`FixError`]. A [`FixerChain`] applies fixers in order. When one fails,
//! its output is discarded, the failure is recorded and the next fixer runs on
//! the text as it stood before the failing one.

use crate::error::{FixError, FixResult};
use log::warn;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

type FixFn = dyn Fn(&Path, &str) -> FixResult<String>;

/// A named text-to-text transformation
pub struct Fixer {
    name: Cow<'static, str>,
    func: Box<FixFn>,
}

impl Fixer {
    /// Create a fixer from a name and a function
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&Path, &str) -> FixResult<String> + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }

    /// Create a fixer that cannot fail and ignores the path
    pub fn infallible<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        Self::new(name, move |_, text| Ok(func(text)))
    }

    /// Name used in logs and reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply this fixer to one document
    pub fn apply(&self, path: &Path, text: &str) -> FixResult<String> {
        (self.func)(path, text)
    }
}

impl fmt::Debug for Fixer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fixer").field("name", &self.name).finish()
    }
}

/// A fixer failure recorded for manual follow-up
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FixFailure {
    pub path: PathBuf,
    pub fixer: String,
    pub error: String,
}

impl FixFailure {
    pub fn new(path: impl Into<PathBuf>, fixer: impl Into<String>, error: &FixError) -> Self {
        Self {
            path: path.into(),
            fixer: fixer.into(),
            error: error.to_string(),
        }
    }
}

impl fmt::Display for FixFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}: {}", self.path.display(), self.fixer, self.error)
    }
}

/// Text produced by a chain together with the failures along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub text: String,
    pub failures: Vec<FixFailure>,
}

impl ChainOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered list of fixers applied to each file
#[derive(Debug, Default)]
pub struct FixerChain {
    fixers: Vec<Fixer>,
}

impl FixerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fixer to the end of the chain
    pub fn with(mut self, fixer: Fixer) -> Self {
        self.fixers.push(fixer);
        self
    }

    /// Names of the fixers, in application order
    pub fn names(&self) -> Vec<&str> {
        self.fixers.iter().map(Fixer::name).collect()
    }

    /// Run every fixer in order over `text`
    pub fn apply(&self, path: &Path, text: &str) -> ChainOutcome {
        let mut current = text.to_string();
        let mut failures = Vec::new();

        for fixer in &self.fixers {
            match fixer.apply(path, &current) {
                Ok(fixed) => current = fixed,
                Err(err) => {
                    warn!("{}\t{}", path.display(), err);
                    failures.push(FixFailure::new(path, fixer.name(), &err));
                }
            }
        }

        ChainOutcome {
            text: current,
            failures,
        }
    }
}

impl FromIterator<Fixer> for FixerChain {
    fn from_iter<I: IntoIterator<Item = Fixer>>(iter: I) -> Self {
        Self {
            fixers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing() -> Fixer {
        Fixer::new("failing", |_, text| {
            Err(FixError::date_format("date", text.trim(), "boom"))
        })
    }

    #[test]
    fn test_chain_applies_in_order() {
        let chain = FixerChain::new()
            .with(Fixer::infallible("a", |s| format!("{s}a")))
            .with(Fixer::infallible("b", |s| format!("{s}b")));

        let outcome = chain.apply(Path::new("x.md"), "_");
        assert_eq!(outcome.text, "_ab");
        assert!(outcome.is_clean());
        assert_eq!(chain.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_failed_fixer_output_is_discarded() {
        let chain = FixerChain::new()
            .with(Fixer::infallible("upper", |s| s.to_uppercase()))
            .with(failing())
            .with(Fixer::infallible("suffix", |s| format!("{s}!")));

        let outcome = chain.apply(Path::new("blog/post.md"), "text");
        assert_eq!(outcome.text, "TEXT!");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].fixer, "failing");
        assert_eq!(outcome.failures[0].path, PathBuf::from("blog/post.md"));
    }

    #[test]
    fn test_fixer_receives_path() {
        let fixer = Fixer::new("path", |path, _| Ok(path.display().to_string()));
        assert_eq!(fixer.apply(Path::new("a/b.md"), "").unwrap(), "a/b.md");
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let outcome = FixerChain::new().apply(Path::new("x.md"), "unchanged");
        assert_eq!(outcome.text, "unchanged");
    }
}
