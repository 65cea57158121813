//! Junos configuration resources.
//!
//! Each resource pairs a typed model with its mapping onto Junos `set`
//! statements. The mapping follows one pattern everywhere:
//!
//! - [`Resource::validate`] checks field ranges, enumerations and cross-field
//!   rules
//! - [`Resource::build_lines`] emits the `set` statements, in declared field
//!   order, through a [`SetLines`](crate::codec::SetLines) builder
//! - [`Resource::from_config`] reads the output of
//!   [`Resource::show_command`] back into the model
//! - [`Resource::delete_lines`] removes what the resource owns, and nothing
//!   else: identifiers are checked by [`Resource::validate_id`] first
//!
//! # Available Resources
//!
//! | Type name | Identifier |
//! |-----------|------------|
//! | `junos_chassis_redundancy` | fixed, singleton |
//! | `junos_event_options_policy` | policy name |
//! | `junos_security_policy` | `FROM_-_TO` zone pair |
//! | `junos_security_screen` | ids-option name |
//! | `junos_security_utm_profile_web_filtering_juniper_enhanced` | profile name |
//! | `junos_snmp` | fixed, singleton |
//! | `junos_switch_options` | fixed, singleton |
//! | `junos_system_radius_server` | server address |

pub mod chassis_redundancy;
pub mod event_options_policy;
pub mod radius_server;
pub mod security_policy;
pub mod security_screen;
pub mod snmp;
pub mod switch_options;
pub mod utm_web_filtering;

pub use chassis_redundancy::{ChassisRedundancy, RoutingEngine};
pub use event_options_policy::EventOptionsPolicy;
pub use radius_server::RadiusServer;
pub use security_policy::SecurityPolicy;
pub use security_screen::SecurityScreen;
pub use snmp::Snmp;
pub use switch_options::SwitchOptions;
pub use utm_web_filtering::UtmWebFilteringJuniperEnhanced;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Separator joining the parts of a composite identifier.
pub const ID_SEPARATOR: &str = "_-_";

/// A Junos configuration object managed as one unit.
pub trait Resource: Sized + Default + Serialize + DeserializeOwned + Send + Sync {
    /// Type name, e.g. `junos_snmp`.
    const TYPE_NAME: &'static str;

    /// Singletons always exist on the device; reading never yields "not found".
    const SINGLETON: bool = false;

    /// Identifier of this instance.
    fn id(&self) -> String;

    /// Operational command fetching the configuration of `id`.
    fn show_command(id: &str) -> String;

    /// Reject identifiers that would address more than this instance.
    fn validate_id(_id: &str) -> Result<()> {
        Ok(())
    }

    /// Check field and cross-field rules.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Emit the `set` statements for this instance. Called after [`Resource::validate`].
    fn build_lines(&self) -> Result<Vec<String>>;

    /// Statements removing `id` from the device, after [`Resource::validate_id`].
    fn delete_lines(id: &str) -> Result<Vec<String>>;

    /// Read the output of [`Resource::show_command`] back into a model.
    ///
    /// Returns `Ok(None)` when the device holds no configuration for `id`.
    fn from_config(raw: &str, id: &str) -> Result<Option<Self>>;

    /// Validate, then emit the `set` statements. Either every line is
    /// returned or an error is.
    fn set_lines(&self) -> Result<Vec<String>> {
        self.validate()?;
        let lines = self.build_lines()?;
        debug!(resource = Self::TYPE_NAME, id = %self.id(), count = lines.len(), "encoded set lines");
        Ok(lines)
    }
}

/// Split a composite identifier into exactly `parts` pieces.
pub fn split_id(id: &str, parts: usize) -> Option<Vec<&str>> {
    let pieces: Vec<&str> = id.split(ID_SEPARATOR).collect();
    if pieces.len() == parts && pieces.iter().all(|p| !p.is_empty()) {
        Some(pieces)
    } else {
        None
    }
}
