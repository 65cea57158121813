//! `junos_security_screen`: an IDS screen profile
//! (`security screen ids-option NAME`).
//!
//! Every sub-block that is declared must produce at least one statement, so
//! `icmp: {}` is rejected instead of silently emitting nothing.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{at_least_one_of, non_empty, opt_int_between};
use crate::codec::{
    config_lines, entry_in, parse_number, quote, require_word, show_configuration,
    split_keyword, strip_keyword, trim_quotes, SetLines, UniqueKeys,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PATH: &str = "security screen ids-option";

const KEYWORDS: &[&str] = &[
    "alarm-without-drop",
    "description",
    "icmp flood",
    "icmp fragment",
    "icmp icmpv6-malformed",
    "icmp ip-sweep",
    "icmp large",
    "icmp ping-death",
    "ip bad-option",
    "ip block-frag",
    "ip ipv6-extension-header",
    "ip ipv6-extension-header-limit",
    "ip ipv6-malformed-header",
    "ip loose-source-route-option",
    "ip record-route-option",
    "ip spoofing",
    "ip strict-source-route-option",
    "ip tear-drop",
    "ip timestamp-option",
    "ip unknown-protocol",
    "limit-session destination-ip-based",
    "limit-session source-ip-based",
    "tcp fin-no-ack",
    "tcp land",
    "tcp port-scan",
    "tcp syn-ack-ack-proxy",
    "tcp syn-fin",
    "tcp syn-flood",
    "tcp syn-frag",
    "tcp tcp-no-flag",
    "tcp winnuke",
    "udp flood",
    "udp port-scan",
    "udp udp-sweep",
];

const IPV6_HEADER_KEYWORDS: &[&str] = &[
    "AH-header",
    "ESP-header",
    "HIP-header",
    "fragment-header",
    "mobility-header",
    "no-next-header",
    "routing-header",
    "shim6-header",
    "user-defined-header-type",
];

const SYN_FLOOD_KEYWORDS: &[&str] = &[
    "alarm-threshold",
    "attack-threshold",
    "destination-threshold",
    "source-threshold",
    "timeout",
    "white-list",
];

/// IDS screen profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityScreen {
    pub name: String,
    pub alarm_without_drop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icmp: Option<ScreenIcmp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<ScreenIp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_session: Option<ScreenLimitSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp: Option<ScreenTcp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<ScreenUdp>,
}

/// A screen that is either enabled with the default threshold or with an
/// explicit one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenThreshold {
    #[serde(with = "sentinel::zero")]
    pub threshold: Option<u32>,
}

impl ScreenThreshold {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }

    fn emit(lines: &mut SetLines, keyword: &str, screen: Option<&Self>) {
        if let Some(screen) = screen {
            lines.push(keyword);
            lines.number(&format!("{} threshold", keyword), screen.threshold);
        }
    }

    fn read(slot: &mut Option<Self>, value: &str, line: &str) -> Result<()> {
        let screen = slot.get_or_insert_default();
        if let Some(threshold) = strip_keyword(value, "threshold") {
            screen.threshold = Some(parse_number(threshold, line)?);
        }
        Ok(())
    }

    fn validate(field: &str, screen: Option<&Self>, lo: u32, hi: u32) -> Result<()> {
        match screen {
            Some(screen) => opt_int_between(field, screen.threshold, lo, hi),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenIcmp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flood: Option<ScreenThreshold>,
    pub fragment: bool,
    pub icmpv6_malformed: bool,
    pub large: bool,
    pub ping_death: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<ScreenThreshold>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenIp {
    pub bad_option: bool,
    pub block_frag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_extension_header: Option<ScreenIpv6ExtensionHeader>,
    /// Maximum number of extension headers; `0` is meaningful
    #[serde(with = "sentinel::minus_one")]
    pub ipv6_extension_header_limit: Option<u32>,
    pub ipv6_malformed_header: bool,
    pub loose_source_route_option: bool,
    pub record_route_option: bool,
    pub spoofing: bool,
    pub strict_source_route_option: bool,
    pub tear_drop: bool,
    pub timestamp_option: bool,
    pub unknown_protocol: bool,
}

/// IPv6 extension headers to block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenIpv6ExtensionHeader {
    pub ah_header: bool,
    pub esp_header: bool,
    pub hip_header: bool,
    pub fragment_header: bool,
    pub mobility_header: bool,
    pub no_next_header: bool,
    pub routing_header: bool,
    pub shim6_header: bool,
    /// Header types or ranges, e.g. `43` or `10 to 20`
    pub user_defined_header_type: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenLimitSession {
    #[serde(with = "sentinel::zero")]
    pub destination_ip_based: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub source_ip_based: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenTcp {
    pub fin_no_ack: bool,
    pub land: bool,
    pub no_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_scan: Option<ScreenThreshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syn_ack_ack_proxy: Option<ScreenThreshold>,
    pub syn_fin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syn_flood: Option<ScreenSynFlood>,
    pub syn_frag: bool,
    pub winnuke: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSynFlood {
    #[serde(with = "sentinel::zero")]
    pub alarm_threshold: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub attack_threshold: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub destination_threshold: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub source_threshold: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub timeout: Option<u32>,
    pub whitelist: Vec<ScreenWhitelist>,
}

/// Addresses exempt from SYN flood protection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenWhitelist {
    pub name: String,
    pub destination_address: BTreeSet<String>,
    pub source_address: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenUdp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flood: Option<ScreenUdpFlood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_scan: Option<ScreenThreshold>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<ScreenThreshold>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenUdpFlood {
    #[serde(with = "sentinel::zero")]
    pub threshold: Option<u32>,
    /// Names of flood white-lists
    pub whitelist: BTreeSet<String>,
}

impl ScreenIcmp {
    fn build_lines(&self, lines: &mut SetLines) {
        ScreenThreshold::emit(lines, "flood", self.flood.as_ref());
        lines.flag(self.fragment, "fragment");
        lines.flag(self.icmpv6_malformed, "icmpv6-malformed");
        ScreenThreshold::emit(lines, "ip-sweep", self.sweep.as_ref());
        lines.flag(self.large, "large");
        lines.flag(self.ping_death, "ping-death");
    }
}

impl ScreenIp {
    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        lines.flag(self.bad_option, "bad-option");
        lines.flag(self.block_frag, "block-frag");
        if let Some(headers) = &self.ipv6_extension_header {
            let mut block = lines.child("ipv6-extension-header");
            headers.build_lines(&mut block);
            lines.block("ipv6_extension_header", block)?;
        }
        lines.number(
            "ipv6-extension-header-limit",
            self.ipv6_extension_header_limit,
        );
        lines.flag(self.ipv6_malformed_header, "ipv6-malformed-header");
        lines.flag(self.loose_source_route_option, "loose-source-route-option");
        lines.flag(self.record_route_option, "record-route-option");
        lines.flag(self.spoofing, "spoofing");
        lines.flag(self.strict_source_route_option, "strict-source-route-option");
        lines.flag(self.tear_drop, "tear-drop");
        lines.flag(self.timestamp_option, "timestamp-option");
        lines.flag(self.unknown_protocol, "unknown-protocol");
        Ok(())
    }
}

impl ScreenIpv6ExtensionHeader {
    fn build_lines(&self, lines: &mut SetLines) {
        lines.flag(self.ah_header, "AH-header");
        lines.flag(self.esp_header, "ESP-header");
        lines.flag(self.hip_header, "HIP-header");
        lines.flag(self.fragment_header, "fragment-header");
        lines.flag(self.mobility_header, "mobility-header");
        lines.flag(self.no_next_header, "no-next-header");
        lines.flag(self.routing_header, "routing-header");
        lines.flag(self.shim6_header, "shim6-header");
        for header_type in &self.user_defined_header_type {
            lines.word("user-defined-header-type", Some(header_type.as_str()));
        }
    }

    fn read_line(&mut self, value: &str) {
        let Some((keyword, value)) = split_keyword(value, IPV6_HEADER_KEYWORDS) else {
            return;
        };
        match keyword {
            "AH-header" => self.ah_header = true,
            "ESP-header" => self.esp_header = true,
            "HIP-header" => self.hip_header = true,
            "fragment-header" => self.fragment_header = true,
            "mobility-header" => self.mobility_header = true,
            "no-next-header" => self.no_next_header = true,
            "routing-header" => self.routing_header = true,
            "shim6-header" => self.shim6_header = true,
            "user-defined-header-type" => {
                self.user_defined_header_type.insert(value.to_string());
            }
            _ => {}
        }
    }
}

impl ScreenTcp {
    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        lines.flag(self.fin_no_ack, "fin-no-ack");
        lines.flag(self.land, "land");
        ScreenThreshold::emit(lines, "port-scan", self.port_scan.as_ref());
        ScreenThreshold::emit(lines, "syn-ack-ack-proxy", self.syn_ack_ack_proxy.as_ref());
        lines.flag(self.syn_fin, "syn-fin");
        if let Some(syn_flood) = &self.syn_flood {
            syn_flood.build_lines(lines)?;
        }
        lines.flag(self.syn_frag, "syn-frag");
        lines.flag(self.no_flag, "tcp-no-flag");
        lines.flag(self.winnuke, "winnuke");
        Ok(())
    }
}

impl ScreenSynFlood {
    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        let mut block = lines.child("syn-flood");
        block.push("");
        block.number("alarm-threshold", self.alarm_threshold);
        block.number("attack-threshold", self.attack_threshold);
        block.number("destination-threshold", self.destination_threshold);
        block.number("source-threshold", self.source_threshold);
        block.number("timeout", self.timeout);

        let mut names = UniqueKeys::new("whitelist");
        for whitelist in &self.whitelist {
            names.check(whitelist.name.as_str(), || {
                format!("name '{}'", whitelist.name)
            })?;
            let mut entry = block.child(format!("white-list {}", quote(&whitelist.name)));
            entry.strings("destination-address", &whitelist.destination_address);
            entry.strings("source-address", &whitelist.source_address);
            block.append(entry);
        }
        lines.append(block);
        Ok(())
    }

    fn read_line(&mut self, value: &str, line: &str) -> Result<()> {
        let Some((keyword, value)) = split_keyword(value, SYN_FLOOD_KEYWORDS) else {
            return Ok(());
        };
        match keyword {
            "alarm-threshold" => self.alarm_threshold = Some(parse_number(value, line)?),
            "attack-threshold" => self.attack_threshold = Some(parse_number(value, line)?),
            "destination-threshold" => {
                self.destination_threshold = Some(parse_number(value, line)?)
            }
            "source-threshold" => self.source_threshold = Some(parse_number(value, line)?),
            "timeout" => self.timeout = Some(parse_number(value, line)?),
            "white-list" => {
                let (name, rest) = require_word(value, line, "white-list name")?;
                let whitelist = entry_in(
                    &mut self.whitelist,
                    |w| w.name == name,
                    || ScreenWhitelist {
                        name: name.clone(),
                        ..Default::default()
                    },
                );
                if let Some(address) = strip_keyword(rest, "destination-address") {
                    whitelist.destination_address.insert(trim_quotes(address));
                } else if let Some(address) = strip_keyword(rest, "source-address") {
                    whitelist.source_address.insert(trim_quotes(address));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        opt_int_between("tcp.syn_flood.alarm_threshold", self.alarm_threshold, 1, 500_000)?;
        opt_int_between("tcp.syn_flood.attack_threshold", self.attack_threshold, 1, 500_000)?;
        opt_int_between(
            "tcp.syn_flood.destination_threshold",
            self.destination_threshold,
            4,
            500_000,
        )?;
        opt_int_between("tcp.syn_flood.source_threshold", self.source_threshold, 4, 500_000)?;
        opt_int_between("tcp.syn_flood.timeout", self.timeout, 1, 50)?;
        for whitelist in &self.whitelist {
            non_empty("tcp.syn_flood.whitelist.name", &whitelist.name)?;
            at_least_one_of(&[
                (
                    "tcp.syn_flood.whitelist.destination_address",
                    !whitelist.destination_address.is_empty(),
                ),
                (
                    "tcp.syn_flood.whitelist.source_address",
                    !whitelist.source_address.is_empty(),
                ),
            ])?;
        }
        Ok(())
    }
}

impl ScreenUdp {
    fn build_lines(&self, lines: &mut SetLines) {
        if let Some(flood) = &self.flood {
            lines.push("flood");
            lines.number("flood threshold", flood.threshold);
            lines.strings("flood white-list", &flood.whitelist);
        }
        ScreenThreshold::emit(lines, "port-scan", self.port_scan.as_ref());
        ScreenThreshold::emit(lines, "udp-sweep", self.sweep.as_ref());
    }
}

impl SecurityScreen {
    /// Create an empty screen profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Resource for SecurityScreen {
    const TYPE_NAME: &'static str = "junos_security_screen";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn show_command(id: &str) -> String {
        show_configuration(&format!("{} {}", PATH, quote(id)))
    }

    fn validate(&self) -> Result<()> {
        non_empty("name", &self.name)?;
        if let Some(icmp) = &self.icmp {
            ScreenThreshold::validate("icmp.flood.threshold", icmp.flood.as_ref(), 1, 1_000_000)?;
            ScreenThreshold::validate(
                "icmp.sweep.threshold",
                icmp.sweep.as_ref(),
                1000,
                1_000_000,
            )?;
        }
        if let Some(ip) = &self.ip {
            opt_int_between(
                "ip.ipv6_extension_header_limit",
                ip.ipv6_extension_header_limit,
                0,
                32,
            )?;
        }
        if let Some(limit) = &self.limit_session {
            opt_int_between(
                "limit_session.destination_ip_based",
                limit.destination_ip_based,
                1,
                2_000_000,
            )?;
            opt_int_between(
                "limit_session.source_ip_based",
                limit.source_ip_based,
                1,
                2_000_000,
            )?;
        }
        if let Some(tcp) = &self.tcp {
            ScreenThreshold::validate(
                "tcp.port_scan.threshold",
                tcp.port_scan.as_ref(),
                1000,
                1_000_000,
            )?;
            ScreenThreshold::validate(
                "tcp.syn_ack_ack_proxy.threshold",
                tcp.syn_ack_ack_proxy.as_ref(),
                1,
                250_000,
            )?;
            if let Some(syn_flood) = &tcp.syn_flood {
                syn_flood.validate()?;
            }
        }
        if let Some(udp) = &self.udp {
            if let Some(flood) = &udp.flood {
                opt_int_between("udp.flood.threshold", flood.threshold, 1, 1_000_000)?;
            }
            ScreenThreshold::validate(
                "udp.port_scan.threshold",
                udp.port_scan.as_ref(),
                1000,
                1_000_000,
            )?;
            ScreenThreshold::validate(
                "udp.sweep.threshold",
                udp.sweep.as_ref(),
                1000,
                1_000_000,
            )?;
        }
        Ok(())
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} {} ", PATH, quote(&self.name)));

        lines.flag(self.alarm_without_drop, "alarm-without-drop");
        lines.string("description", self.description.as_deref());
        if let Some(icmp) = &self.icmp {
            let mut block = lines.child("icmp");
            icmp.build_lines(&mut block);
            lines.block("icmp", block)?;
        }
        if let Some(ip) = &self.ip {
            let mut block = lines.child("ip");
            ip.build_lines(&mut block)?;
            lines.block("ip", block)?;
        }
        if let Some(limit) = &self.limit_session {
            let mut block = lines.child("limit-session");
            block.number("destination-ip-based", limit.destination_ip_based);
            block.number("source-ip-based", limit.source_ip_based);
            lines.block("limit_session", block)?;
        }
        if let Some(tcp) = &self.tcp {
            let mut block = lines.child("tcp");
            tcp.build_lines(&mut block)?;
            lines.block("tcp", block)?;
        }
        if let Some(udp) = &self.udp {
            let mut block = lines.child("udp");
            udp.build_lines(&mut block);
            lines.block("udp", block)?;
        }

        Ok(lines.into_lines())
    }

    fn validate_id(id: &str) -> Result<()> {
        non_empty("name", id)
    }

    fn delete_lines(id: &str) -> Result<Vec<String>> {
        Self::validate_id(id)?;
        Ok(vec![format!("delete {} {}", PATH, quote(id))])
    }

    fn from_config(raw: &str, id: &str) -> Result<Option<Self>> {
        let mut screen = Self::new(id);
        let mut found = false;

        for line in config_lines(raw) {
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            found = true;
            match keyword {
                "alarm-without-drop" => screen.alarm_without_drop = true,
                "description" => screen.description = Some(trim_quotes(value)),
                _ => {}
            }
            if let Some(icmp_keyword) = strip_keyword(keyword, "icmp") {
                let icmp = screen.icmp.get_or_insert_default();
                match icmp_keyword {
                    "flood" => ScreenThreshold::read(&mut icmp.flood, value, line)?,
                    "fragment" => icmp.fragment = true,
                    "icmpv6-malformed" => icmp.icmpv6_malformed = true,
                    "ip-sweep" => ScreenThreshold::read(&mut icmp.sweep, value, line)?,
                    "large" => icmp.large = true,
                    "ping-death" => icmp.ping_death = true,
                    _ => {}
                }
            } else if let Some(ip_keyword) = strip_keyword(keyword, "ip") {
                let ip = screen.ip.get_or_insert_default();
                match ip_keyword {
                    "bad-option" => ip.bad_option = true,
                    "block-frag" => ip.block_frag = true,
                    "ipv6-extension-header" => ip
                        .ipv6_extension_header
                        .get_or_insert_default()
                        .read_line(value),
                    "ipv6-extension-header-limit" => {
                        ip.ipv6_extension_header_limit = Some(parse_number(value, line)?)
                    }
                    "ipv6-malformed-header" => ip.ipv6_malformed_header = true,
                    "loose-source-route-option" => ip.loose_source_route_option = true,
                    "record-route-option" => ip.record_route_option = true,
                    "spoofing" => ip.spoofing = true,
                    "strict-source-route-option" => ip.strict_source_route_option = true,
                    "tear-drop" => ip.tear_drop = true,
                    "timestamp-option" => ip.timestamp_option = true,
                    "unknown-protocol" => ip.unknown_protocol = true,
                    _ => {}
                }
            } else if let Some(limit_keyword) = strip_keyword(keyword, "limit-session") {
                let limit = screen.limit_session.get_or_insert_default();
                match limit_keyword {
                    "destination-ip-based" => {
                        limit.destination_ip_based = Some(parse_number(value, line)?)
                    }
                    "source-ip-based" => limit.source_ip_based = Some(parse_number(value, line)?),
                    _ => {}
                }
            } else if let Some(tcp_keyword) = strip_keyword(keyword, "tcp") {
                let tcp = screen.tcp.get_or_insert_default();
                match tcp_keyword {
                    "fin-no-ack" => tcp.fin_no_ack = true,
                    "land" => tcp.land = true,
                    "port-scan" => ScreenThreshold::read(&mut tcp.port_scan, value, line)?,
                    "syn-ack-ack-proxy" => {
                        ScreenThreshold::read(&mut tcp.syn_ack_ack_proxy, value, line)?
                    }
                    "syn-fin" => tcp.syn_fin = true,
                    "syn-flood" => tcp
                        .syn_flood
                        .get_or_insert_default()
                        .read_line(value, line)?,
                    "syn-frag" => tcp.syn_frag = true,
                    "tcp-no-flag" => tcp.no_flag = true,
                    "winnuke" => tcp.winnuke = true,
                    _ => {}
                }
            } else if let Some(udp_keyword) = strip_keyword(keyword, "udp") {
                let udp = screen.udp.get_or_insert_default();
                match udp_keyword {
                    "flood" => {
                        let flood = udp.flood.get_or_insert_default();
                        if let Some(threshold) = strip_keyword(value, "threshold") {
                            flood.threshold = Some(parse_number(threshold, line)?);
                        } else if let Some(name) = strip_keyword(value, "white-list") {
                            flood.whitelist.insert(trim_quotes(name));
                        }
                    }
                    "port-scan" => ScreenThreshold::read(&mut udp.port_scan, value, line)?,
                    "udp-sweep" => ScreenThreshold::read(&mut udp.sweep, value, line)?,
                    _ => {}
                }
            }
        }

        Ok(found.then_some(screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn relative(screen: &SecurityScreen) -> String {
        let prefix = format!("set {} {} ", PATH, quote(&screen.name));
        let body: Vec<String> = screen
            .set_lines()
            .unwrap()
            .iter()
            .map(|l| match l.strip_prefix(&prefix) {
                Some(rest) => format!("set {}", rest),
                None => l.clone(),
            })
            .collect();
        format!(
            "\n<configuration-output>\n{}\n</configuration-output>\n",
            body.join("\n")
        )
    }

    fn sample() -> SecurityScreen {
        SecurityScreen {
            alarm_without_drop: true,
            description: Some("untrust zone screen".to_string()),
            icmp: Some(ScreenIcmp {
                flood: Some(ScreenThreshold::new(5000)),
                ping_death: true,
                sweep: Some(ScreenThreshold::default()),
                ..Default::default()
            }),
            ip: Some(ScreenIp {
                ipv6_extension_header: Some(ScreenIpv6ExtensionHeader {
                    ah_header: true,
                    user_defined_header_type: ["10 to 20".to_string()].into(),
                    ..Default::default()
                }),
                ipv6_extension_header_limit: Some(0),
                tear_drop: true,
                ..Default::default()
            }),
            limit_session: Some(ScreenLimitSession {
                source_ip_based: Some(100),
                ..Default::default()
            }),
            tcp: Some(ScreenTcp {
                land: true,
                syn_flood: Some(ScreenSynFlood {
                    attack_threshold: Some(200),
                    whitelist: vec![
                        ScreenWhitelist {
                            name: "partners".to_string(),
                            source_address: ["198.51.100.0/24".to_string()].into(),
                            ..Default::default()
                        },
                        ScreenWhitelist {
                            name: "backups".to_string(),
                            destination_address: ["192.0.2.10/32".to_string()].into(),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            udp: Some(ScreenUdp {
                flood: Some(ScreenUdpFlood {
                    threshold: Some(1000),
                    whitelist: ["dns".to_string()].into(),
                }),
                ..Default::default()
            }),
            ..SecurityScreen::new("untrust-screen")
        }
    }

    #[test]
    fn test_encode() {
        let p = "set security screen ids-option \"untrust-screen\"";
        let expected: Vec<String> = [
            "alarm-without-drop",
            "description \"untrust zone screen\"",
            "icmp flood",
            "icmp flood threshold 5000",
            "icmp ip-sweep",
            "icmp ping-death",
            "ip ipv6-extension-header AH-header",
            "ip ipv6-extension-header user-defined-header-type 10 to 20",
            "ip ipv6-extension-header-limit 0",
            "ip tear-drop",
            "limit-session source-ip-based 100",
            "tcp land",
            "tcp syn-flood",
            "tcp syn-flood attack-threshold 200",
            "tcp syn-flood white-list \"partners\" source-address \"198.51.100.0/24\"",
            "tcp syn-flood white-list \"backups\" destination-address \"192.0.2.10/32\"",
            "udp flood",
            "udp flood threshold 1000",
            "udp flood white-list \"dns\"",
        ]
        .iter()
        .map(|s| format!("{} {}", p, s))
        .collect();
        assert_eq!(sample().set_lines().unwrap(), expected);
    }

    #[test]
    fn test_round_trip() {
        let screen = sample();
        let decoded = SecurityScreen::from_config(&relative(&screen), "untrust-screen")
            .unwrap()
            .unwrap();
        assert_eq!(decoded, screen);
    }

    #[test]
    fn test_extension_header_limit_not_confused_with_header_block() {
        let raw = "<configuration-output>\n\
                   set ip ipv6-extension-header-limit 8\n\
                   </configuration-output>";
        let screen = SecurityScreen::from_config(raw, "s").unwrap().unwrap();
        let ip = screen.ip.unwrap();
        assert_eq!(ip.ipv6_extension_header_limit, Some(8));
        assert_eq!(ip.ipv6_extension_header, None);
    }

    #[test]
    fn test_unset_limit_survives_state_round_trip() {
        let screen = SecurityScreen {
            ip: Some(ScreenIp {
                spoofing: true,
                ..Default::default()
            }),
            ..SecurityScreen::new("s")
        };
        let json = serde_json::to_value(&screen).unwrap();
        assert_eq!(json["ip"]["ipv6_extension_header_limit"], -1);
        let back: SecurityScreen = serde_json::from_value(json).unwrap();
        assert_eq!(back.ip.unwrap().ipv6_extension_header_limit, None);
    }

    #[test]
    fn test_empty_block_rejected() {
        let screen = SecurityScreen {
            icmp: Some(ScreenIcmp::default()),
            ..SecurityScreen::new("s")
        };
        let err = screen.set_lines().unwrap_err();
        assert!(matches!(err, Error::EmptyBlock(ref block) if block == "icmp"));

        let screen = SecurityScreen {
            ip: Some(ScreenIp {
                ipv6_extension_header: Some(ScreenIpv6ExtensionHeader::default()),
                ..Default::default()
            }),
            ..SecurityScreen::new("s")
        };
        assert!(screen.set_lines().is_err());
    }

    #[test]
    fn test_duplicate_whitelist_rejected() {
        let whitelist = ScreenWhitelist {
            name: "a".to_string(),
            source_address: ["192.0.2.1".to_string()].into(),
            ..Default::default()
        };
        let screen = SecurityScreen {
            tcp: Some(ScreenTcp {
                syn_flood: Some(ScreenSynFlood {
                    whitelist: vec![whitelist.clone(), whitelist],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..SecurityScreen::new("s")
        };
        let err = screen.set_lines().unwrap_err();
        assert!(err
            .to_string()
            .contains("multiple blocks whitelist with the same name 'a'"));
    }

    #[test]
    fn test_validation_ranges() {
        let screen = SecurityScreen {
            ip: Some(ScreenIp {
                ipv6_extension_header_limit: Some(33),
                ..Default::default()
            }),
            ..SecurityScreen::new("s")
        };
        assert!(screen.set_lines().unwrap_err().is_validation());
        assert!(SecurityScreen::new("").set_lines().is_err());
    }

    #[test]
    fn test_not_found() {
        let raw = "\n<configuration-output>\n</configuration-output>\n";
        assert_eq!(SecurityScreen::from_config(raw, "missing").unwrap(), None);
    }

    #[test]
    fn test_show_and_delete_quote_name() {
        assert_eq!(
            SecurityScreen::show_command("untrust screen"),
            "show configuration security screen ids-option \"untrust screen\" | display set relative"
        );
        assert_eq!(
            SecurityScreen::delete_lines("untrust screen").unwrap(),
            vec!["delete security screen ids-option \"untrust screen\""]
        );
    }
}
