//! Error types for junos-resources.
//!
//! Errors fall into a few families: validation failures raised before any
//! configuration line is emitted, parse and structural failures raised while
//! reading device output, lifecycle failures raised by the provider, and the
//! usual IO/serialization errors from loading files.

use crate::session::SessionError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for junos-resources operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for junos-resources.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A field or cross-field rule was violated.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Two entries of a repeated block share the same key.
    #[error("Validation failed: multiple blocks {block} with the same {key}")]
    DuplicateBlock {
        /// Field name of the repeated block
        block: String,
        /// Human readable key description, e.g. `slot '0'`
        key: String,
    },

    /// A block was declared but carries nothing to configure.
    #[error("Validation failed: {0} block is empty")]
    EmptyBlock(String),

    // ========================================================================
    // Decode Errors
    // ========================================================================
    /// A value on a recognized line could not be converted.
    #[error("Failed to parse line '{line}': {message}")]
    Parse {
        /// The offending line
        line: String,
        /// Error message
        message: String,
    },

    /// A recognized line is missing required tokens.
    #[error("Malformed line '{line}': {message}")]
    Structural {
        /// The offending line
        line: String,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// The resource does not exist on the device.
    #[error("{resource} '{id}' doesn't exist")]
    NotFound {
        /// Resource type name
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// The resource already exists on the device.
    #[error("{resource} '{id}' already exists")]
    AlreadyExists {
        /// Resource type name
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// The resource could not be read back after a successful commit.
    #[error("{resource} '{id}' doesn't exist after commit, check the configuration")]
    NotExistsAfterCommit {
        /// Resource type name
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// The device session failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Generic error with source.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a new duplicate block error.
    pub fn duplicate_block(block: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateBlock {
            block: block.into(),
            key: key.into(),
        }
    }

    /// Creates a new parse error for `line`.
    pub fn parse(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Creates a new structural error for `line`.
    pub fn structural(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structural {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Returns true if the error was raised before anything touched the device.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::DuplicateBlock { .. } | Error::EmptyBlock(_)
        )
    }

    /// Returns true if the error was raised while decoding device output.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::Structural { .. })
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::DuplicateBlock { .. } | Error::EmptyBlock(_) => 2,
            Error::Parse { .. } | Error::Structural { .. } => 3,
            Error::NotFound { .. }
            | Error::AlreadyExists { .. }
            | Error::NotExistsAfterCommit { .. } => 4,
            Error::Session(_) => 5,
            Error::InvalidConfig { .. } => 6,
            _ => 1,
        }
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Adds context with a closure that is only evaluated on error.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Other {
            message: message.into(),
            source: Some(Box::new(e)),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| Error::Other {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
