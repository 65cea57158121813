//! `junos_switch_options`: global layer 2 switching options.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{opt_int_between, unique_items};
use crate::codec::{
    config_lines, parse_number, show_configuration, split_keyword, trim_quotes, SetLines,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PATH: &str = "switch-options";

const KEYWORDS: &[&str] = &[
    "remote-vtep-list",
    "remote-vtep-v6-list",
    "route-distinguisher",
    "service-id",
    "vrf-export",
    "vrf-import",
    "vrf-target",
    "vrf-target auto",
    "vrf-target export",
    "vrf-target import",
    "vtep-source-interface",
];

/// Switch options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchOptions {
    pub remote_vtep_list: BTreeSet<String>,
    pub remote_vtep_v6_list: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_distinguisher: Option<String>,
    #[serde(with = "sentinel::zero")]
    pub service_id: Option<u32>,
    /// Export policies, applied in order
    pub vrf_export: Vec<String>,
    /// Import policies, applied in order
    pub vrf_import: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrf_target: Option<String>,
    pub vrf_target_auto: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrf_target_export: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrf_target_import: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vtep_source_interface: Option<String>,
}

impl Resource for SwitchOptions {
    const TYPE_NAME: &'static str = "junos_switch_options";
    const SINGLETON: bool = true;

    fn id(&self) -> String {
        "switch_options".to_string()
    }

    fn show_command(_id: &str) -> String {
        show_configuration(PATH)
    }

    fn validate(&self) -> Result<()> {
        opt_int_between("service_id", self.service_id, 1, 65535)?;
        unique_items("vrf_export", &self.vrf_export)?;
        unique_items("vrf_import", &self.vrf_import)
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} ", PATH));

        lines.strings("remote-vtep-list", &self.remote_vtep_list);
        lines.strings("remote-vtep-v6-list", &self.remote_vtep_v6_list);
        lines.string("route-distinguisher", self.route_distinguisher.as_deref());
        lines.number("service-id", self.service_id);
        lines.strings("vrf-export", &self.vrf_export);
        lines.strings("vrf-import", &self.vrf_import);
        lines.string("vrf-target", self.vrf_target.as_deref());
        lines.flag(self.vrf_target_auto, "vrf-target auto");
        lines.string("vrf-target export", self.vrf_target_export.as_deref());
        lines.string("vrf-target import", self.vrf_target_import.as_deref());
        lines.string(
            "vtep-source-interface",
            self.vtep_source_interface.as_deref(),
        );

        Ok(lines.into_lines())
    }

    fn delete_lines(_id: &str) -> Result<Vec<String>> {
        Ok(vec![format!("delete {}", PATH)])
    }

    fn from_config(raw: &str, _id: &str) -> Result<Option<Self>> {
        let mut options = Self::default();

        for line in config_lines(raw) {
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            match keyword {
                "remote-vtep-list" => {
                    options.remote_vtep_list.insert(trim_quotes(value));
                }
                "remote-vtep-v6-list" => {
                    options.remote_vtep_v6_list.insert(trim_quotes(value));
                }
                "route-distinguisher" => options.route_distinguisher = Some(trim_quotes(value)),
                "service-id" => options.service_id = Some(parse_number(value, line)?),
                "vrf-export" => options.vrf_export.push(trim_quotes(value)),
                "vrf-import" => options.vrf_import.push(trim_quotes(value)),
                "vrf-target" => options.vrf_target = Some(trim_quotes(value)),
                "vrf-target auto" => options.vrf_target_auto = true,
                "vrf-target export" => options.vrf_target_export = Some(trim_quotes(value)),
                "vrf-target import" => options.vrf_target_import = Some(trim_quotes(value)),
                "vtep-source-interface" => {
                    options.vtep_source_interface = Some(trim_quotes(value))
                }
                _ => {}
            }
        }

        Ok(Some(options))
    }
}
