use super::{Session, SessionError, SessionResult};
use crate::codec::{join_words, next_word, quote, split_words, END_MARKER, START_MARKER};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

type Statement = Vec<Word>;

/// One word of a stored statement, remembering whether it was quoted.
///
/// Equality ignores the quoting, so `"trust"` and `trust` address the same
/// configuration.
#[derive(Debug, Clone)]
struct Word {
    text: String,
    quoted: bool,
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Word {}

impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialEq<String> for Word {
    fn eq(&self, other: &String) -> bool {
        &self.text == other
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            f.write_str(&quote(&self.text))
        } else {
            f.write_str(&join_words(std::slice::from_ref(&self.text)))
        }
    }
}

fn words(line: &str) -> Statement {
    let mut words = Vec::new();
    let mut rest = line;
    while let Some((text, tail)) = next_word(rest) {
        let quoted = rest.trim_start().starts_with('"');
        words.push(Word { text, quoted });
        rest = tail;
    }
    words
}

fn has_prefix(statement: &[Word], path: &[String]) -> bool {
    statement.len() >= path.len() && statement.iter().zip(path).all(|(word, p)| word == p)
}

/// One commit accepted by a [`MemoryDevice`].
#[derive(Debug, Clone)]
pub struct CommitRecord {
    /// Commit log comment
    pub comment: String,
    /// When the commit happened
    pub committed_at: DateTime<Utc>,
    /// Number of statements in the committed configuration
    pub statements: usize,
}

/// In-memory configuration store with Junos-like `set` semantics.
///
/// Statements are kept word by word without their `set` keyword. Quoting
/// differences (`"trust"` vs `trust`) do not make two statements distinct,
/// but each word is shown back the way it was first written. Setting an
/// identical statement twice keeps it once. The store has no schema:
/// setting a leaf twice with different values keeps both statements.
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    name: String,
    running: IndexSet<Statement>,
    candidate: IndexSet<Statement>,
    locked: bool,
    lock_denials: u32,
    rejected: Vec<String>,
    commits: Vec<CommitRecord>,
}

impl MemoryDevice {
    /// Create an empty device.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running: IndexSet::new(),
            candidate: IndexSet::new(),
            locked: false,
            lock_denials: 0,
            rejected: Vec::new(),
            commits: Vec::new(),
        }
    }

    /// Create a device whose running configuration holds the `set`
    /// statements of `text`. Blank lines and `#` comments are skipped.
    pub fn from_set_text(name: impl Into<String>, text: &str) -> Self {
        let mut device = Self::new(name);
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut words = words(line);
            if words.first().is_some_and(|w| w.text == "set") && words.len() > 1 {
                words.remove(0);
                device.running.insert(words);
            }
        }
        device.candidate = device.running.clone();
        device
    }

    /// Refuse the next `count` lock attempts, as if another user held the lock.
    pub fn with_lock_denials(mut self, count: u32) -> Self {
        self.lock_denials = count;
        self
    }

    /// Refuse any statement containing `pattern`.
    pub fn with_rejected_statement(mut self, pattern: impl Into<String>) -> Self {
        self.rejected.push(pattern.into());
        self
    }

    /// Running configuration as `set` statements, one per line.
    pub fn running_config(&self) -> String {
        render(self.running.iter(), &[])
    }

    /// Whether the candidate lock is held.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Commits accepted so far.
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Whether the candidate differs from the running configuration.
    pub fn has_uncommitted_changes(&self) -> bool {
        self.candidate != self.running
    }

    fn show(&self, path: &[String], relative: bool) -> String {
        let matching = self
            .running
            .iter()
            .filter(|statement| has_prefix(statement, path));
        let strip = if relative { path } else { &[] };
        let body = render(matching, strip);
        if body.is_empty() {
            format!("\n{}\n{}\n", START_MARKER, END_MARKER)
        } else {
            format!("\n{}\n{}\n{}\n", START_MARKER, body, END_MARKER)
        }
    }

    fn apply_line(&mut self, line: &str) -> SessionResult<()> {
        if let Some(pattern) = self.rejected.iter().find(|p| line.contains(p.as_str())) {
            return Err(SessionError::ApplyFailed {
                line: line.to_string(),
                message: format!("syntax error, rejected '{}'", pattern),
            });
        }
        let mut words = words(line);
        if words.len() < 2 {
            return Err(SessionError::ApplyFailed {
                line: line.to_string(),
                message: "missing statement".to_string(),
            });
        }
        let action = words.remove(0).text;
        match action.as_str() {
            "set" => {
                self.candidate.insert(words);
            }
            "delete" => {
                self.candidate.retain(|statement| !statement.starts_with(&words));
            }
            _ => {
                return Err(SessionError::ApplyFailed {
                    line: line.to_string(),
                    message: format!("unknown command '{}'", action),
                })
            }
        }
        Ok(())
    }
}

fn render<'a, I>(statements: I, strip: &[String]) -> String
where
    I: Iterator<Item = &'a Statement>,
{
    statements
        .map(|statement| {
            let words: Vec<String> = statement[strip.len()..].iter().map(Word::to_string).collect();
            format!("set {}", words.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Session for MemoryDevice {
    fn identifier(&self) -> &str {
        &self.name
    }

    async fn command_exec(&mut self, command: &str) -> SessionResult<String> {
        let unknown = || SessionError::CommandFailed(format!("unknown command '{}'", command));
        let rest = command
            .trim()
            .strip_prefix("show configuration")
            .ok_or_else(unknown)?;
        let (path, pipe) = match rest.rsplit_once('|') {
            Some((path, pipe)) => (path, pipe.trim()),
            None => (rest, ""),
        };
        let relative = match pipe {
            "display set relative" => true,
            "display set" => false,
            _ => return Err(unknown()),
        };
        debug!(device = %self.name, command, "show configuration");
        Ok(self.show(&split_words(path), relative))
    }

    async fn config_apply(&mut self, lines: &[String]) -> SessionResult<()> {
        if !self.locked {
            return Err(SessionError::NotLocked);
        }
        for line in lines {
            self.apply_line(line)?;
        }
        debug!(device = %self.name, count = lines.len(), "loaded statements");
        Ok(())
    }

    async fn lock(&mut self) -> SessionResult<()> {
        if self.lock_denials > 0 {
            self.lock_denials -= 1;
            return Err(SessionError::LockDenied(
                "configuration database locked by another user".to_string(),
            ));
        }
        if self.locked {
            return Err(SessionError::LockDenied(
                "configuration database already locked".to_string(),
            ));
        }
        self.locked = true;
        self.candidate = self.running.clone();
        Ok(())
    }

    async fn unlock(&mut self) -> SessionResult<()> {
        if !self.locked {
            return Err(SessionError::NotLocked);
        }
        self.locked = false;
        Ok(())
    }

    async fn commit(&mut self, comment: &str) -> SessionResult<()> {
        if !self.locked {
            return Err(SessionError::NotLocked);
        }
        self.running = self.candidate.clone();
        self.commits.push(CommitRecord {
            comment: comment.to_string(),
            committed_at: Utc::now(),
            statements: self.running.len(),
        });
        info!(device = %self.name, comment, "commit complete");
        Ok(())
    }

    async fn discard(&mut self) -> SessionResult<()> {
        self.candidate = self.running.clone();
        Ok(())
    }
}
