//! `junos_chassis_redundancy`: routing engine redundancy under
//! `chassis redundancy`.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{int_between, opt_int_between, string_in_slice};
use crate::codec::{
    config_lines, parse_number, require_word, show_configuration, split_keyword, KeyedBlocks,
    SetLines, UniqueKeys,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "chassis redundancy";
const ROLES: &[&str] = &["backup", "disabled", "master"];

const KEYWORDS: &[&str] = &[
    "failover disk-read-threshold",
    "failover disk-write-threshold",
    "failover not-on-disk-underperform",
    "failover on-disk-failure",
    "failover on-loss-of-keepalives",
    "graceful-switchover",
    "keepalive-time",
    "routing-engine",
];

/// Chassis redundancy options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChassisRedundancy {
    /// Disk read threshold (ms) triggering failover
    #[serde(with = "sentinel::zero")]
    pub failover_disk_read_threshold: Option<u32>,
    /// Disk write threshold (ms) triggering failover
    #[serde(with = "sentinel::zero")]
    pub failover_disk_write_threshold: Option<u32>,
    pub failover_not_on_disk_underperform: bool,
    pub failover_on_disk_failure: bool,
    pub failover_on_loss_of_keepalives: bool,
    pub graceful_switchover: bool,
    /// Seconds without keepalive before failover
    #[serde(with = "sentinel::zero")]
    pub keepalive_time: Option<u32>,
    /// Redundancy role per routing engine slot
    pub routing_engine: Vec<RoutingEngine>,
}

/// Role of one routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEngine {
    pub slot: u8,
    pub role: String,
}

impl RoutingEngine {
    pub fn new(slot: u8, role: impl Into<String>) -> Self {
        Self {
            slot,
            role: role.into(),
        }
    }
}

impl Resource for ChassisRedundancy {
    const TYPE_NAME: &'static str = "junos_chassis_redundancy";
    const SINGLETON: bool = true;

    fn id(&self) -> String {
        "redundancy".to_string()
    }

    fn show_command(_id: &str) -> String {
        show_configuration(PATH)
    }

    fn validate(&self) -> Result<()> {
        opt_int_between(
            "failover_disk_read_threshold",
            self.failover_disk_read_threshold,
            1000,
            10000,
        )?;
        opt_int_between(
            "failover_disk_write_threshold",
            self.failover_disk_write_threshold,
            1000,
            10000,
        )?;
        opt_int_between("keepalive_time", self.keepalive_time, 2, 10000)?;
        for engine in &self.routing_engine {
            int_between("routing_engine.slot", engine.slot, 0, 1)?;
            string_in_slice("routing_engine.role", &engine.role, ROLES)?;
        }
        Ok(())
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} ", PATH));

        lines.number(
            "failover disk-read-threshold",
            self.failover_disk_read_threshold,
        );
        lines.number(
            "failover disk-write-threshold",
            self.failover_disk_write_threshold,
        );
        lines.flag(
            self.failover_not_on_disk_underperform,
            "failover not-on-disk-underperform",
        );
        lines.flag(self.failover_on_disk_failure, "failover on-disk-failure");
        lines.flag(
            self.failover_on_loss_of_keepalives,
            "failover on-loss-of-keepalives",
        );
        lines.flag(self.graceful_switchover, "graceful-switchover");
        lines.number("keepalive-time", self.keepalive_time);

        let mut slots = UniqueKeys::new("routing_engine");
        for engine in &self.routing_engine {
            slots.check(engine.slot, || format!("slot '{}'", engine.slot))?;
            lines.push(format!("routing-engine {} {}", engine.slot, engine.role));
        }

        Ok(lines.into_lines())
    }

    fn delete_lines(_id: &str) -> Result<Vec<String>> {
        Ok(vec![format!("delete {}", PATH)])
    }

    fn from_config(raw: &str, _id: &str) -> Result<Option<Self>> {
        let mut redundancy = Self::default();
        let mut engines = KeyedBlocks::new();

        for line in config_lines(raw) {
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            match keyword {
                "failover disk-read-threshold" => {
                    redundancy.failover_disk_read_threshold = Some(parse_number(value, line)?)
                }
                "failover disk-write-threshold" => {
                    redundancy.failover_disk_write_threshold = Some(parse_number(value, line)?)
                }
                "failover not-on-disk-underperform" => {
                    redundancy.failover_not_on_disk_underperform = true
                }
                "failover on-disk-failure" => redundancy.failover_on_disk_failure = true,
                "failover on-loss-of-keepalives" => {
                    redundancy.failover_on_loss_of_keepalives = true
                }
                "graceful-switchover" => redundancy.graceful_switchover = true,
                "keepalive-time" => redundancy.keepalive_time = Some(parse_number(value, line)?),
                "routing-engine" => {
                    let (slot, rest) = require_word(value, line, "slot and role")?;
                    let (role, _) = require_word(rest, line, "slot and role")?;
                    let slot: u8 = parse_number(&slot, line)?;
                    engines
                        .entry_with(slot, |slot| RoutingEngine::new(*slot, ""))
                        .role = role;
                }
                _ => {}
            }
        }
        redundancy.routing_engine = engines.into_values();

        Ok(Some(redundancy))
    }
}
