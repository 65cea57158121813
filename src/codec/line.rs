//! Set-line emission and CLI word handling.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// Wrap a value in double quotes, escaping embedded quotes and backslashes.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn needs_quotes(word: &str) -> bool {
    word.is_empty()
        || word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\\' | ';' | '{' | '}' | '#'))
}

/// Split a CLI statement into words.
///
/// Double-quoted sections form a single word with the quotes removed and
/// `\"` / `\\` escapes resolved.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }

    words
}

/// Join words back into a statement, quoting the ones that need it.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| {
            let w = w.as_ref();
            if needs_quotes(w) {
                quote(w)
            } else {
                w.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered builder of `set` statements sharing a common prefix.
///
/// The prefix carries its trailing space (`"set snmp "`), and every emitter
/// appends one statement made of the prefix, a keyword path and an optional
/// value. Emitters skip unset values so callers can pass model fields
/// straight through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLines {
    prefix: String,
    lines: Vec<String>,
}

impl SetLines {
    /// Create an empty builder for `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            lines: Vec::new(),
        }
    }

    /// The prefix every line of this builder starts with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// An empty builder whose prefix extends this one with `path`.
    pub fn child(&self, path: impl AsRef<str>) -> Self {
        Self::new(format!("{}{} ", self.prefix, path.as_ref()))
    }

    /// Append `prefix + statement`. An empty statement emits the bare prefix.
    pub fn push(&mut self, statement: impl AsRef<str>) {
        let statement = statement.as_ref();
        if statement.is_empty() {
            self.lines.push(self.prefix.trim_end().to_string());
        } else {
            self.lines.push(format!("{}{}", self.prefix, statement));
        }
    }

    /// Emit `keyword` when `enabled`.
    pub fn flag(&mut self, enabled: bool, keyword: &str) {
        if enabled {
            self.push(keyword);
        }
    }

    /// Emit `keyword "value"` for a set, non-empty string.
    pub fn string(&mut self, keyword: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.push(format!("{} {}", keyword, quote(value)));
        }
    }

    /// Emit `keyword value` without quoting, for enumerated CLI keywords.
    pub fn word(&mut self, keyword: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.push(format!("{} {}", keyword, value));
        }
    }

    /// Emit `keyword N` when the number is set.
    pub fn number<T: Display>(&mut self, keyword: &str, value: Option<T>) {
        if let Some(value) = value {
            self.push(format!("{} {}", keyword, value));
        }
    }

    /// Emit one quoted `keyword "value"` line per non-empty item, in
    /// iteration order.
    pub fn strings<'a, I>(&mut self, keyword: &str, values: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for value in values.into_iter().filter(|v| !v.is_empty()) {
            self.push(format!("{} {}", keyword, quote(value)));
        }
    }

    /// Append the lines of a nested block, failing if it emitted nothing.
    pub fn block(&mut self, name: &str, child: SetLines) -> Result<()> {
        if child.is_empty() {
            return Err(Error::EmptyBlock(name.to_string()));
        }
        self.append(child);
        Ok(())
    }

    /// Append the lines of a nested builder.
    pub fn append(&mut self, child: SetLines) {
        self.lines.extend(child.lines);
    }

    /// Number of emitted lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Emitted lines, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the builder.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Key tracker rejecting duplicate entries of a repeated block.
#[derive(Debug)]
pub struct UniqueKeys<K> {
    block: &'static str,
    seen: HashSet<K>,
}

impl<K: Hash + Eq> UniqueKeys<K> {
    /// Track keys of the repeated block named `block`.
    pub fn new(block: &'static str) -> Self {
        Self {
            block,
            seen: HashSet::new(),
        }
    }

    /// Record `key`; `describe` renders it for the error message, e.g. `slot '0'`.
    pub fn check<F>(&mut self, key: K, describe: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if self.seen.insert(key) {
            Ok(())
        } else {
            Err(Error::duplicate_block(self.block, describe()))
        }
    }
}
