//! Device configuration session.
//!
//! Resources never talk to a device directly. They go through a [`Session`],
//! which fetches configuration with [`Session::command_exec`] and submits
//! statements with [`Session::config_apply`]. Locking, commit and discard
//! are exposed for the [`Provider`](crate::provider::Provider) to sequence
//! around those two calls.
//!
//! # Implementations
//!
//! - [`MemoryDevice`]: an in-memory statement store answering
//!   `show configuration ... | display set relative` the way Junos does.
//!   Used by the test suite and by the offline CLI commands.
//!
//! A NETCONF transport lives outside this crate; anything that can run an
//! operational command and load `set` statements can implement the trait.

/// In-memory Junos-like configuration store.
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::{CommitRecord, MemoryDevice};

/// Errors reported by a configuration session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The candidate configuration could not be locked.
    #[error("Configuration lock denied: {0}")]
    LockDenied(String),

    /// An operation needing the lock ran without it.
    #[error("Configuration is not locked by this session")]
    NotLocked,

    /// An operational command failed.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The device refused a configuration statement.
    #[error("Failed to apply '{line}': {message}")]
    ApplyFailed {
        /// Refused statement
        line: String,
        /// Device message
        message: String,
    },

    /// The commit was refused.
    #[error("Commit failed: {0}")]
    CommitFailed(String),

    /// The session is closed.
    #[error("Session closed")]
    Closed,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// A configuration session on one device.
///
/// Methods take `&mut self`: a session is owned by a single caller at a time,
/// and concurrent users go through separate sessions.
#[async_trait]
pub trait Session: Send {
    /// Device identifier (hostname or address) used in log output.
    fn identifier(&self) -> &str;

    /// Run an operational command and return its raw output.
    async fn command_exec(&mut self, command: &str) -> SessionResult<String>;

    /// Load `set` / `delete` statements into the candidate configuration.
    async fn config_apply(&mut self, lines: &[String]) -> SessionResult<()>;

    /// Take the exclusive candidate configuration lock.
    async fn lock(&mut self) -> SessionResult<()>;

    /// Release the candidate configuration lock.
    async fn unlock(&mut self) -> SessionResult<()>;

    /// Commit the candidate configuration with a log comment.
    async fn commit(&mut self, comment: &str) -> SessionResult<()>;

    /// Throw away uncommitted candidate changes.
    async fn discard(&mut self) -> SessionResult<()>;
}
