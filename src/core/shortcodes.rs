//! Liquid tag to Hugo shortcode translation
//!
//! Each fixer handles one known legacy tag. Arguments between the tag name and
//! the closing `%}` are carried over untouched. The Hugo forms never match the
//! Liquid patterns, so running a translation twice is a no-op.

use crate::core::fixer::Fixer;
use crate::core::inject::add_key_value;
use regex::Regex;
use std::sync::LazyLock;

/// A tooltip that was escaped for Jekyll and breaks the shortcode parser
pub const BROKEN_CLUSTER_TOOLTIP: &str =
    r#"{{ "{% glossary_tooltip text=" }}"cluster" term_id="cluster" %}"#;

/// Replacement for [`BROKEN_CLUSTER_TOOLTIP`] that the tooltip rule can match
pub const FIXED_CLUSTER_TOOLTIP: &str = r#"{% glossary_tooltip text=" term_id="cluster" %}"#;

static GLOSSARY_TOOLTIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% glossary_tooltip(.*?)%\}").unwrap());

static GLOSSARY_DEFINITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% glossary_definition(.*?)%\}").unwrap());

static CODE_INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% include code\.html(.*?)%\}").unwrap());

static CAPTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{% capture (.*?) %\}(.*?)\{% endcapture %\}").unwrap()
});

/// Repair the one malformed tooltip construct; must run before [`glossary_tooltip`]
pub fn broken_tooltip() -> Fixer {
    Fixer::infallible("broken tooltip", |text| {
        text.replacen(BROKEN_CLUSTER_TOOLTIP, FIXED_CLUSTER_TOOLTIP, 1)
    })
}

/// `{% glossary_tooltip ARGS%}` to `{{< glossary_tooltip ARGS>}}`
pub fn glossary_tooltip() -> Fixer {
    Fixer::infallible("glossary tooltip", |text| {
        GLOSSARY_TOOLTIP_RE
            .replace_all(text, "{{< glossary_tooltip${1}>}}")
            .into_owned()
    })
}

/// `{% glossary_definition ARGS%}` to `{{< glossary_definition ARGS>}}`
pub fn glossary_definition() -> Fixer {
    Fixer::infallible("glossary definition", |text| {
        GLOSSARY_DEFINITION_RE
            .replace_all(text, "{{< glossary_definition${1}>}}")
            .into_owned()
    })
}

/// `{% include code.html ARGS%}` to `{{< code ARGS>}}`
pub fn code_include() -> Fixer {
    Fixer::infallible("code include", |text| {
        CODE_INCLUDE_RE
            .replace_all(text, "{{< code${1}>}}")
            .into_owned()
    })
}

/// Paired `{% capture NAME %}...{% endcapture %}` to `{{% capture NAME %}}...{{% /capture %}}`
pub fn captures() -> Fixer {
    Fixer::infallible("capture", |text| {
        CAPTURE_RE
            .replace_all(text, "{{% capture ${1} %}}${2}{{% /capture %}}")
            .into_owned()
    })
}

/// Replace every occurrence of `old` with `new`
pub fn replace_literal(old: impl Into<String>, new: impl Into<String>) -> Fixer {
    let old = old.into();
    let new = new.into();
    Fixer::infallible(format!("replace {old:?}"), move |text| {
        text.replace(&old, &new)
    })
}

/// Turn an include directive into a front matter entry
///
/// Documents containing `include` get `key: value` appended to their front
/// matter and every occurrence of the directive removed. Other documents are
/// returned unchanged.
pub fn include_to_front_matter(include: &str, key: &str, value: &str) -> Fixer {
    let include = include.to_string();
    let add = add_key_value(key, value);
    Fixer::new(format!("include {include}"), move |path, text| {
        if !text.contains(&include) {
            return Ok(text.to_string());
        }
        let with_key = add.apply(path, text)?;
        Ok(with_key.replace(&include, ""))
    })
}

/// The Liquid translations in the order they must run
pub fn liquid_to_shortcodes() -> Vec<Fixer> {
    vec![
        broken_tooltip(),
        glossary_tooltip(),
        glossary_definition(),
        code_include(),
        captures(),
    ]
}
