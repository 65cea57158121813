//! # junos-resources - Declarative Junos Configuration Resources
//!
//! junos-resources maps typed configuration models onto the Junos `set`
//! statement dialect and back. Each resource knows how to validate itself,
//! emit the `set` lines that configure it, read itself from the output of
//! `show configuration <path> | display set relative`, and remove what it
//! owns from a device.
//!
//! ## Core Concepts
//!
//! - **Resources**: typed models such as [`Snmp`](resources::Snmp) or
//!   [`SecurityPolicy`](resources::SecurityPolicy), one per Junos stanza
//! - **Codec**: the shared line builder, line reader and validation helpers
//! - **Sessions**: the device seam; [`MemoryDevice`](session::MemoryDevice)
//!   answers like a Junos box without one
//! - **Provider**: create / read / update / delete / import sequencing with
//!   locking, commit and rollback
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         CLI Interface                        │
//! │          render · parse · plan · apply · destroy             │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Provider                           │
//! │       lock ─► load ─► commit ─► unlock ─► read back          │
//! └──────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌─────────────────────────┐       ┌─────────────────────────────┐
//! │        Resources        │       │           Session           │
//! │  validate / set lines / │       │  command_exec · config_apply │
//! │  from_config / delete   │       │  lock · commit · discard    │
//! └─────────────────────────┘       └─────────────────────────────┘
//!            │
//!            ▼
//! ┌─────────────────────────┐
//! │          Codec          │
//! │  SetLines · reader ·    │
//! │  KeyedBlocks · sentinel │
//! └─────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use junos_resources::prelude::*;
//!
//! let redundancy = ChassisRedundancy {
//!     graceful_switchover: true,
//!     routing_engine: vec![RoutingEngine::new(0, "master"), RoutingEngine::new(1, "backup")],
//!     ..Default::default()
//! };
//!
//! let lines = redundancy.set_lines().unwrap();
//! assert!(lines.contains(&"set chassis redundancy routing-engine 0 master".to_string()));
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.
    //!
    //! - **Resources**: every resource model and the [`Resource`] trait
    //! - **Sessions**: the [`Session`] trait and [`MemoryDevice`]
    //! - **Lifecycle**: [`Provider`] and its [`SessionSettings`]
    //! - **Errors**: error handling types

    // Error handling
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{Config, SessionSettings};

    // Lifecycle
    pub use crate::provider::Provider;

    // Resources
    pub use crate::resources::{
        ChassisRedundancy, EventOptionsPolicy, RadiusServer, Resource, RoutingEngine,
        SecurityPolicy, SecurityScreen, Snmp, SwitchOptions, UtmWebFilteringJuniperEnhanced,
    };

    // Sessions
    pub use crate::session::{MemoryDevice, Session, SessionError};
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases.
///
/// The main [`Error`](error::Error) enum separates validation failures,
/// decode failures and lifecycle failures so callers can tell them apart.
pub mod error;

/// Set-line encoding and decoding shared by every resource.
pub mod codec;

/// Typed Junos configuration resources.
pub mod resources;

// ============================================================================
// Infrastructure
// ============================================================================

/// Configuration file loading and environment overrides.
pub mod config;

/// Resource lifecycle over a configuration session.
pub mod provider;

/// Device configuration sessions.
pub mod session;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
