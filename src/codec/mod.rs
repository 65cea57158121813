//! Configuration line codec.
//!
//! Junos exposes its configuration as a flat list of `set` statements. Every
//! resource in this crate maps a typed model onto that dialect in both
//! directions, and this module holds the pieces they share:
//!
//! - [`line`]: the [`SetLines`] builder used to emit ordered `set` statements,
//!   plus quoting and word splitting for the CLI dialect
//! - [`reader`]: framing of `show ... | display set relative` output and
//!   longest-keyword matching of the lines it yields
//! - [`keyed`]: insertion-ordered accumulation of repeated blocks
//! - [`validate`]: field and cross-field checks run before emission
//! - [`sentinel`]: serde adapters mapping `Option` fields onto the legacy
//!   `0` / `-1` "unset" conventions
//!
//! # Example
//!
//! ```rust
//! use junos_resources::codec::{config_lines, split_keyword, SetLines};
//!
//! let mut lines = SetLines::new("set chassis redundancy ");
//! lines.flag(true, "graceful-switchover");
//! lines.number("keepalive-time", Some(30u32));
//! assert_eq!(
//!     lines.lines(),
//!     &[
//!         "set chassis redundancy graceful-switchover".to_string(),
//!         "set chassis redundancy keepalive-time 30".to_string(),
//!     ]
//! );
//!
//! let raw = "<configuration-output>\nset keepalive-time 30\n</configuration-output>";
//! let line = config_lines(raw).next().unwrap();
//! assert_eq!(split_keyword(line, &["keepalive-time"]), Some(("keepalive-time", "30")));
//! ```

pub mod keyed;
pub mod line;
pub mod reader;
pub mod sentinel;
pub mod validate;

pub use keyed::{entry_in, KeyedBlocks};
pub use line::{join_words, quote, split_words, SetLines, UniqueKeys};
pub use reader::{
    config_lines, next_word, parse_number, require_word, show_configuration, split_keyword,
    strip_keyword, trim_quotes, ConfigLines, END_MARKER, SET_PREFIX, START_MARKER,
};
