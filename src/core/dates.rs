//! Long-form date normalization for blog front matter
//!
//! Legacy posts carry dates like `date: Friday, July 02, 2015`. Hugo wants
//! `date: 2015-07-02`. Only `date:` lines inside the front matter block are
//! touched.

use crate::core::fixer::Fixer;
use crate::core::front_matter::locate;
use crate::error::{FixError, FixResult};
use chrono::{NaiveDate, Weekday};
use regex::Regex;
use std::sync::LazyLock;

static DATE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(date):[ \t]*([^\r\n]*?)[ \t]*\r?$").unwrap());

/// Output format for normalized dates
pub const NORMALIZED_FORMAT: &str = "%Y-%m-%d";

/// Parse `Weekday, Month D, YYYY`
///
/// The weekday has to be a real weekday name, but it is not checked against
/// the date itself.
pub fn parse_long_date(value: &str) -> Result<NaiveDate, String> {
    let (weekday, rest) = value
        .split_once(',')
        .ok_or_else(|| "expected \"Weekday, Month D, YYYY\"".to_string())?;
    weekday
        .trim()
        .parse::<Weekday>()
        .map_err(|_| format!("unknown weekday {:?}", weekday.trim()))?;
    NaiveDate::parse_from_str(rest.trim(), "%B %d, %Y").map_err(|e| e.to_string())
}

/// Rewrite every front matter `date:` line to `YYYY-MM-DD`
///
/// Fails on the first value that is not a long-form date.
pub fn normalize_dates(text: &str) -> FixResult<String> {
    let Some(span) = locate(text) else {
        return Ok(text.to_string());
    };
    let body = span.body_str(text);

    let mut fixed = String::with_capacity(body.len());
    let mut last = 0;
    for caps in DATE_LINE_RE.captures_iter(body) {
        let (Some(field), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let field = field.as_str();
        let date = parse_long_date(value.as_str())
            .map_err(|reason| FixError::date_format(field, value.as_str(), reason))?;

        fixed.push_str(&body[last..value.start()]);
        fixed.push_str(&date.format(NORMALIZED_FORMAT).to_string());
        last = value.end();
    }
    fixed.push_str(&body[last..]);

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..span.body.start]);
    out.push_str(&fixed);
    out.push_str(&text[span.body.end..]);
    Ok(out)
}

/// Fixer wrapper around [`normalize_dates`]
pub fn fix_dates() -> Fixer {
    Fixer::new("dates", |_, text| normalize_dates(text))
}
