//! `junos_snmp`: global SNMP agent options.
//!
//! Communities, views and trap groups live under `snmp` as well but belong to
//! their own resources, so deleting this resource removes only the keys it
//! manages.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{opt_int_between, required_with, unique_items};
use crate::codec::{
    config_lines, parse_number, quote, show_configuration, split_keyword, strip_keyword,
    trim_quotes, SetLines,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const PATH: &str = "snmp";

const KEYWORDS: &[&str] = &[
    "arp",
    "arp host-name-resolution",
    "contact",
    "description",
    "engine-id",
    "filter-duplicates",
    "filter-interfaces all-internal-interfaces",
    "filter-interfaces interfaces",
    "health-monitor",
    "if-count-with-filter-interfaces",
    "interface",
    "location",
    "routing-instance-access",
    "routing-instance-access access-list",
];

const HEALTH_MONITOR_KEYWORDS: &[&str] = &[
    "falling-threshold",
    "idp",
    "idp falling-threshold",
    "idp interval",
    "idp rising-threshold",
    "interval",
    "rising-threshold",
];

/// Keys under `snmp` owned by this resource.
const OWNED_KEYS: &[&str] = &[
    "arp",
    "contact",
    "description",
    "engine-id",
    "filter-duplicates",
    "filter-interfaces",
    "health-monitor",
    "if-count-with-filter-interfaces",
    "interface",
    "location",
    "routing-instance-access",
];

/// SNMP agent options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snmp {
    pub arp: bool,
    pub arp_host_name_resolution: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `use-default-ip-address`, `use-mac-address` or `local <engine id>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<String>,
    pub filter_duplicates: bool,
    pub filter_interfaces: Vec<String>,
    pub filter_internal_interfaces: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_monitor: Option<SnmpHealthMonitor>,
    pub if_count_with_filter_interfaces: bool,
    pub interface: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub routing_instance_access: bool,
    pub routing_instance_access_list: Vec<String>,
}

/// `health-monitor` block. Thresholds are percentages where `0` is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpHealthMonitor {
    #[serde(with = "sentinel::minus_one")]
    pub falling_threshold: Option<u32>,
    pub idp: bool,
    #[serde(with = "sentinel::minus_one")]
    pub idp_falling_threshold: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub idp_interval: Option<u32>,
    #[serde(with = "sentinel::minus_one")]
    pub idp_rising_threshold: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub interval: Option<u32>,
    #[serde(with = "sentinel::minus_one")]
    pub rising_threshold: Option<u32>,
}

impl SnmpHealthMonitor {
    fn validate(&self) -> Result<()> {
        opt_int_between("health_monitor.falling_threshold", self.falling_threshold, 0, 100)?;
        opt_int_between("health_monitor.rising_threshold", self.rising_threshold, 0, 100)?;
        opt_int_between("health_monitor.interval", self.interval, 1, 2_147_483_647)?;
        opt_int_between(
            "health_monitor.idp_falling_threshold",
            self.idp_falling_threshold,
            0,
            100,
        )?;
        opt_int_between(
            "health_monitor.idp_rising_threshold",
            self.idp_rising_threshold,
            0,
            100,
        )?;
        opt_int_between("health_monitor.idp_interval", self.idp_interval, 1, 2_147_483_647)?;
        for (field, set) in [
            ("health_monitor.idp_falling_threshold", self.idp_falling_threshold.is_some()),
            ("health_monitor.idp_interval", self.idp_interval.is_some()),
            ("health_monitor.idp_rising_threshold", self.idp_rising_threshold.is_some()),
        ] {
            required_with(field, set, "health_monitor.idp", self.idp)?;
        }
        Ok(())
    }

    fn build_lines(&self, parent: &SetLines) -> SetLines {
        let mut lines = parent.child("health-monitor");
        lines.push("");
        lines.number("falling-threshold", self.falling_threshold);
        if self.idp {
            lines.push("idp");
            lines.number("idp falling-threshold", self.idp_falling_threshold);
            lines.number("idp interval", self.idp_interval);
            lines.number("idp rising-threshold", self.idp_rising_threshold);
        }
        lines.number("interval", self.interval);
        lines.number("rising-threshold", self.rising_threshold);
        lines
    }

    fn read_line(&mut self, value: &str, line: &str) -> Result<()> {
        let Some((keyword, value)) = split_keyword(value, HEALTH_MONITOR_KEYWORDS) else {
            return Ok(());
        };
        match keyword {
            "falling-threshold" => self.falling_threshold = Some(parse_number(value, line)?),
            "idp" => self.idp = true,
            "idp falling-threshold" => {
                self.idp = true;
                self.idp_falling_threshold = Some(parse_number(value, line)?);
            }
            "idp interval" => {
                self.idp = true;
                self.idp_interval = Some(parse_number(value, line)?);
            }
            "idp rising-threshold" => {
                self.idp = true;
                self.idp_rising_threshold = Some(parse_number(value, line)?);
            }
            "interval" => self.interval = Some(parse_number(value, line)?),
            "rising-threshold" => self.rising_threshold = Some(parse_number(value, line)?),
            _ => {}
        }
        Ok(())
    }
}

fn validate_engine_id(value: &str) -> Result<()> {
    let valid = matches!(value, "use-default-ip-address" | "use-mac-address")
        || strip_keyword(value, "local").is_some_and(|local| !local.is_empty());
    if valid {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "engine_id: expected 'use-default-ip-address', 'use-mac-address' or 'local <id>', got '{}'",
            value
        )))
    }
}

impl Resource for Snmp {
    const TYPE_NAME: &'static str = "junos_snmp";
    const SINGLETON: bool = true;

    fn id(&self) -> String {
        "snmp".to_string()
    }

    fn show_command(_id: &str) -> String {
        show_configuration(PATH)
    }

    fn validate(&self) -> Result<()> {
        required_with(
            "arp_host_name_resolution",
            self.arp_host_name_resolution,
            "arp",
            self.arp,
        )?;
        required_with(
            "routing_instance_access_list",
            !self.routing_instance_access_list.is_empty(),
            "routing_instance_access",
            self.routing_instance_access,
        )?;
        unique_items("filter_interfaces", &self.filter_interfaces)?;
        unique_items("interface", &self.interface)?;
        unique_items("routing_instance_access_list", &self.routing_instance_access_list)?;
        if let Some(engine_id) = &self.engine_id {
            validate_engine_id(engine_id)?;
        }
        if let Some(health_monitor) = &self.health_monitor {
            health_monitor.validate()?;
        }
        Ok(())
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} ", PATH));

        lines.flag(self.arp, "arp");
        lines.flag(self.arp_host_name_resolution, "arp host-name-resolution");
        lines.string("contact", self.contact.as_deref());
        lines.string("description", self.description.as_deref());
        if let Some(engine_id) = self.engine_id.as_deref() {
            match strip_keyword(engine_id, "local") {
                Some(local) => lines.push(format!("engine-id local {}", quote(local))),
                None => lines.push(format!("engine-id {}", engine_id)),
            }
        }
        lines.flag(self.filter_duplicates, "filter-duplicates");
        lines.strings("filter-interfaces interfaces", &self.filter_interfaces);
        lines.flag(
            self.filter_internal_interfaces,
            "filter-interfaces all-internal-interfaces",
        );
        if let Some(health_monitor) = &self.health_monitor {
            let block = health_monitor.build_lines(&lines);
            lines.append(block);
        }
        lines.flag(
            self.if_count_with_filter_interfaces,
            "if-count-with-filter-interfaces",
        );
        lines.strings("interface", &self.interface);
        lines.string("location", self.location.as_deref());
        lines.flag(self.routing_instance_access, "routing-instance-access");
        lines.strings(
            "routing-instance-access access-list",
            &self.routing_instance_access_list,
        );

        Ok(lines.into_lines())
    }

    fn delete_lines(_id: &str) -> Result<Vec<String>> {
        Ok(OWNED_KEYS
            .iter()
            .map(|key| format!("delete {} {}", PATH, key))
            .collect())
    }

    fn from_config(raw: &str, _id: &str) -> Result<Option<Self>> {
        let mut snmp = Self::default();

        for line in config_lines(raw) {
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            match keyword {
                "arp" => snmp.arp = true,
                "arp host-name-resolution" => {
                    snmp.arp = true;
                    snmp.arp_host_name_resolution = true;
                }
                "contact" => snmp.contact = Some(trim_quotes(value)),
                "description" => snmp.description = Some(trim_quotes(value)),
                "engine-id" => {
                    snmp.engine_id = Some(match strip_keyword(value, "local") {
                        Some(local) => format!("local {}", trim_quotes(local)),
                        None => trim_quotes(value),
                    })
                }
                "filter-duplicates" => snmp.filter_duplicates = true,
                "filter-interfaces all-internal-interfaces" => {
                    snmp.filter_internal_interfaces = true
                }
                "filter-interfaces interfaces" => snmp.filter_interfaces.push(trim_quotes(value)),
                "health-monitor" => snmp
                    .health_monitor
                    .get_or_insert_with(SnmpHealthMonitor::default)
                    .read_line(value, line)?,
                "if-count-with-filter-interfaces" => snmp.if_count_with_filter_interfaces = true,
                "interface" => snmp.interface.push(trim_quotes(value)),
                "location" => snmp.location = Some(trim_quotes(value)),
                "routing-instance-access" => snmp.routing_instance_access = true,
                "routing-instance-access access-list" => {
                    snmp.routing_instance_access = true;
                    snmp.routing_instance_access_list.push(trim_quotes(value));
                }
                _ => {}
            }
        }

        Ok(Some(snmp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn relative(lines: &[String]) -> String {
        lines
            .iter()
            .map(|l| l.replacen("set snmp ", "set ", 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample() -> Snmp {
        Snmp {
            arp: true,
            arp_host_name_resolution: true,
            contact: Some("noc@example.net".to_string()),
            description: Some("core router".to_string()),
            engine_id: Some("local 800007e5804f".to_string()),
            filter_interfaces: vec!["ge-0/0/0".to_string()],
            health_monitor: Some(SnmpHealthMonitor {
                falling_threshold: Some(0),
                idp: true,
                idp_interval: Some(60),
                rising_threshold: Some(90),
                ..Default::default()
            }),
            interface: vec!["fxp0.0".to_string()],
            location: Some("rack 4".to_string()),
            routing_instance_access: true,
            routing_instance_access_list: vec!["mgmt".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(
            sample().set_lines().unwrap(),
            vec![
                "set snmp arp",
                "set snmp arp host-name-resolution",
                "set snmp contact \"noc@example.net\"",
                "set snmp description \"core router\"",
                "set snmp engine-id local \"800007e5804f\"",
                "set snmp filter-interfaces interfaces \"ge-0/0/0\"",
                "set snmp health-monitor",
                "set snmp health-monitor falling-threshold 0",
                "set snmp health-monitor idp",
                "set snmp health-monitor idp interval 60",
                "set snmp health-monitor rising-threshold 90",
                "set snmp interface \"fxp0.0\"",
                "set snmp location \"rack 4\"",
                "set snmp routing-instance-access",
                "set snmp routing-instance-access access-list \"mgmt\"",
            ]
        );
    }

    #[test]
    fn test_round_trip_keeps_zero_threshold() {
        let snmp = sample();
        let decoded = Snmp::from_config(&relative(&snmp.set_lines().unwrap()), "")
            .unwrap()
            .unwrap();
        assert_eq!(decoded, snmp);
        let health = decoded.health_monitor.unwrap();
        assert_eq!(health.falling_threshold, Some(0));
        assert_eq!(health.idp_rising_threshold, None);
    }

    #[test]
    fn test_unset_threshold_serializes_as_minus_one() {
        let health = SnmpHealthMonitor::default();
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["falling_threshold"], -1);
        assert_eq!(json["interval"], 0);
    }

    #[test]
    fn test_cross_field_rules() {
        let snmp = Snmp {
            arp_host_name_resolution: true,
            ..Default::default()
        };
        let err = snmp.set_lines().unwrap_err();
        assert!(err
            .to_string()
            .contains("arp_host_name_resolution requires arp"));

        let snmp = Snmp {
            routing_instance_access_list: vec!["mgmt".to_string()],
            ..Default::default()
        };
        assert!(snmp.set_lines().is_err());

        let snmp = Snmp {
            health_monitor: Some(SnmpHealthMonitor {
                idp_interval: Some(10),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(snmp.set_lines().is_err());

        let snmp = Snmp {
            engine_id: Some("local".to_string()),
            ..Default::default()
        };
        assert!(snmp.set_lines().is_err());
    }

    #[test]
    fn test_engine_id_keywords() {
        let snmp = Snmp {
            engine_id: Some("use-mac-address".to_string()),
            ..Default::default()
        };
        let lines = snmp.set_lines().unwrap();
        assert_eq!(lines, vec!["set snmp engine-id use-mac-address"]);
        let decoded = Snmp::from_config(&relative(&lines), "").unwrap().unwrap();
        assert_eq!(decoded.engine_id.as_deref(), Some("use-mac-address"));
    }

    #[test]
    fn test_delete_lines_spare_communities() {
        let lines = Snmp::delete_lines("snmp").unwrap();
        assert!(lines.contains(&"delete snmp location".to_string()));
        assert!(!lines.iter().any(|l| l == "delete snmp"));
        assert!(!lines.iter().any(|l| l.contains("community")));
    }

    #[test]
    fn test_decode_ignores_communities() {
        let raw = "<configuration-output>\n\
                   set community public authorization read-only\n\
                   set location lab\n\
                   </configuration-output>";
        let snmp = Snmp::from_config(raw, "").unwrap().unwrap();
        assert_eq!(snmp.location.as_deref(), Some("lab"));
        assert_eq!(
            snmp,
            Snmp {
                location: Some("lab".to_string()),
                ..Default::default()
            }
        );
    }
}
