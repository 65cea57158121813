//! Reading `display set relative` output.
//!
//! The device answers `show configuration <path> | display set relative` with
//! one `set` statement per line, relative to `<path>`, wrapped in
//! `<configuration-output>` tags. [`config_lines`] strips that framing and
//! the `set ` prefix so resource decoders only see keyword paths.

use crate::error::{Error, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Marker preceding configuration output.
pub const START_MARKER: &str = "<configuration-output>";

/// Marker following configuration output.
pub const END_MARKER: &str = "</configuration-output>";

/// Prefix of every configuration statement.
pub const SET_PREFIX: &str = "set ";

/// Build the command fetching the configuration under `path`.
pub fn show_configuration(path: &str) -> String {
    format!("show configuration {} | display set relative", path)
}

/// Iterator over the statements of a framed configuration output.
#[derive(Debug, Clone)]
pub struct ConfigLines<'a> {
    lines: std::str::Lines<'a>,
    finished: bool,
}

impl<'a> Iterator for ConfigLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        for line in self.lines.by_ref() {
            if line.contains(END_MARKER) {
                self.finished = true;
                return None;
            }
            if line.contains(START_MARKER) {
                continue;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Some(line.strip_prefix(SET_PREFIX).unwrap_or(line));
        }
        self.finished = true;
        None
    }
}

/// Iterate the statements of `raw`, without framing and `set ` prefix.
pub fn config_lines(raw: &str) -> ConfigLines<'_> {
    ConfigLines {
        lines: raw.lines(),
        finished: false,
    }
}

/// Strip `keyword` from the start of `line` at a word boundary.
///
/// Returns the remainder (possibly empty) when `line` is exactly `keyword`
/// or continues with a space after it.
pub fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ').map(str::trim_start)
    }
}

/// Resolve `line` against a keyword table using the longest matching keyword.
///
/// Matching is word-bounded, so `ipv6-extension-header` never captures
/// `ipv6-extension-header-limit 8`, and among nested paths such as
/// `vrf-target` / `vrf-target auto` the most specific one wins regardless of
/// table order.
pub fn split_keyword<'a, 'k>(line: &'a str, keywords: &[&'k str]) -> Option<(&'k str, &'a str)> {
    keywords
        .iter()
        .filter_map(|keyword| strip_keyword(line, keyword).map(|rest| (*keyword, rest)))
        .max_by_key(|(keyword, _)| keyword.len())
}

/// Remove exactly one layer of surrounding double quotes, resolving escapes.
pub fn trim_quotes(value: &str) -> String {
    let value = value.trim();
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                        continue;
                    }
                }
                out.push(c);
            }
            out
        }
        None => value.to_string(),
    }
}

/// Split the first word off `rest`, honouring double quotes.
pub fn next_word(rest: &str) -> Option<(String, &str)> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    let mut in_quotes = false;
    let mut escaped = false;
    let mut end = rest.len();
    for (idx, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                end = idx;
                break;
            }
            _ => {}
        }
    }
    Some((trim_quotes(&rest[..end]), rest[end..].trim_start()))
}

/// Like [`next_word`], failing with a structural error naming `what`.
pub fn require_word<'a>(rest: &'a str, line: &str, what: &str) -> Result<(String, &'a str)> {
    next_word(rest).ok_or_else(|| Error::structural(line, format!("can't find {}", what)))
}

/// Convert a numeric value read from `line`.
pub fn parse_number<T>(value: &str, line: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse::<T>().map_err(|e| {
        Error::parse(
            line,
            format!("failed to convert value from '{}' to integer: {}", value, e),
        )
    })
}
