//! Shared test utilities for the junos-resources test suite.
//!
//! This module provides:
//! - Framing helpers for `show configuration` output
//! - A recording [`Session`] wrapper around [`MemoryDevice`]
//! - Provider construction with fast lock retries
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use junos_resources::config::SessionSettings;
use junos_resources::provider::Provider;
use junos_resources::session::{MemoryDevice, Session, SessionError, SessionResult};

/// Wrap `lines` in the markers of `| display set relative` output.
pub fn frame(lines: &[&str]) -> String {
    let mut raw = String::from("\n<configuration-output>\n");
    for line in lines {
        raw.push_str(line);
        raw.push('\n');
    }
    raw.push_str("</configuration-output>\n");
    raw
}

/// Owned copies of `items`.
pub fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Session settings with millisecond lock retries.
pub fn fast_settings() -> SessionSettings {
    SessionSettings {
        lock_retries: 2,
        lock_retry_delay_ms: 1,
        commit_comment_prefix: String::new(),
    }
}

/// Provider over a memory device loaded from `text`.
pub fn provider_with(text: &str) -> Provider<MemoryDevice> {
    Provider::new(MemoryDevice::from_set_text("lab", text), fast_settings())
}

/// Every call a [`RecordingSession`] received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Command(String),
    Apply(Vec<String>),
    Lock,
    Unlock,
    Commit(String),
    Discard,
}

/// Session that records calls before passing them to a [`MemoryDevice`].
pub struct RecordingSession {
    pub device: MemoryDevice,
    pub calls: Vec<Call>,
    fail_commit: bool,
}

impl RecordingSession {
    pub fn new(device: MemoryDevice) -> Self {
        Self {
            device,
            calls: Vec::new(),
            fail_commit: false,
        }
    }

    /// Refuse every commit.
    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    /// Batches passed to `config_apply`, in order.
    pub fn applied(&self) -> Vec<Vec<String>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Apply(lines) => Some(lines.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

#[async_trait]
impl Session for RecordingSession {
    fn identifier(&self) -> &str {
        self.device.identifier()
    }

    async fn command_exec(&mut self, command: &str) -> SessionResult<String> {
        self.calls.push(Call::Command(command.to_string()));
        self.device.command_exec(command).await
    }

    async fn config_apply(&mut self, lines: &[String]) -> SessionResult<()> {
        self.calls.push(Call::Apply(lines.to_vec()));
        self.device.config_apply(lines).await
    }

    async fn lock(&mut self) -> SessionResult<()> {
        self.calls.push(Call::Lock);
        self.device.lock().await
    }

    async fn unlock(&mut self) -> SessionResult<()> {
        self.calls.push(Call::Unlock);
        self.device.unlock().await
    }

    async fn commit(&mut self, comment: &str) -> SessionResult<()> {
        self.calls.push(Call::Commit(comment.to_string()));
        if self.fail_commit {
            return Err(SessionError::CommitFailed(
                "configuration check-out failed".to_string(),
            ));
        }
        self.device.commit(comment).await
    }

    async fn discard(&mut self) -> SessionResult<()> {
        self.calls.push(Call::Discard);
        self.device.discard().await
    }
}
