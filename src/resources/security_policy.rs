//! `junos_security_policy`: the ordered policies of one zone pair.

use super::{split_id, Resource, ID_SEPARATOR};
use crate::codec::validate::{conflicts_with, non_empty, string_in_slice};
use crate::codec::{
    config_lines, quote, require_word, show_configuration, split_keyword, strip_keyword,
    trim_quotes, KeyedBlocks, SetLines, UniqueKeys,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const ACTIONS: &[&str] = &["permit", "deny", "reject"];

const KEYWORDS: &[&str] = &["policy"];

const POLICY_KEYWORDS: &[&str] = &[
    "match application",
    "match destination-address",
    "match destination-address-excluded",
    "match dynamic-application",
    "match source-address",
    "match source-address-excluded",
    "then count",
    "then deny",
    "then log session-close",
    "then log session-init",
    "then permit",
    "then reject",
];

const APPLICATION_SERVICES_KEYWORDS: &[&str] = &[
    "application-firewall rule-set",
    "idp",
    "idp-policy",
    "redirect-wx",
    "reverse-redirect-wx",
    "security-intelligence-policy",
    "ssl-proxy",
    "ssl-proxy profile-name",
    "uac-policy",
    "uac-policy captive-portal",
    "utm-policy",
];

/// Policies from one security zone to another, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityPolicy {
    pub from_zone: String,
    pub to_zone: String,
    pub policy: Vec<PolicyRule>,
}

/// One policy of the zone pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyRule {
    pub name: String,
    pub match_source_address: BTreeSet<String>,
    pub match_destination_address: BTreeSet<String>,
    pub match_application: BTreeSet<String>,
    pub match_dynamic_application: BTreeSet<String>,
    pub match_source_address_excluded: bool,
    pub match_destination_address_excluded: bool,
    /// `permit`, `deny` or `reject`
    pub then: String,
    pub count: bool,
    pub log_init: bool,
    pub log_close: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_application_services: Option<PermitApplicationServices>,
}

impl Default for PolicyRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            match_source_address: BTreeSet::new(),
            match_destination_address: BTreeSet::new(),
            match_application: BTreeSet::new(),
            match_dynamic_application: BTreeSet::new(),
            match_source_address_excluded: false,
            match_destination_address_excluded: false,
            then: "permit".to_string(),
            count: false,
            log_init: false,
            log_close: false,
            permit_application_services: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermitApplicationServices {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_firewall_rule_set: Option<String>,
    pub idp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_policy: Option<String>,
    pub redirect_wx: bool,
    pub reverse_redirect_wx: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_intelligence_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_proxy: Option<SslProxy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uac_policy: Option<UacPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_policy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SslProxy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UacPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captive_portal: Option<String>,
}

impl PolicyRule {
    /// A `permit` policy with the given match criteria.
    pub fn permit(
        name: impl Into<String>,
        source: &[&str],
        destination: &[&str],
        application: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            match_source_address: to_set(source),
            match_destination_address: to_set(destination),
            match_application: to_set(application),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        non_empty("policy.name", &self.name)?;
        for (field, values) in [
            ("policy.match_source_address", &self.match_source_address),
            ("policy.match_destination_address", &self.match_destination_address),
            ("policy.match_application", &self.match_application),
        ] {
            if values.is_empty() {
                return Err(Error::validation(format!(
                    "{} must not be empty in policy '{}'",
                    field, self.name
                )));
            }
        }
        string_in_slice("policy.then", &self.then, ACTIONS)?;
        if let Some(services) = &self.permit_application_services {
            if self.then != "permit" {
                return Err(Error::validation(format!(
                    "policy.permit_application_services requires then = permit in policy '{}'",
                    self.name
                )));
            }
            conflicts_with(
                "policy.permit_application_services.redirect_wx",
                services.redirect_wx,
                "policy.permit_application_services.reverse_redirect_wx",
                services.reverse_redirect_wx,
            )?;
            conflicts_with(
                "policy.permit_application_services.idp",
                services.idp,
                "policy.permit_application_services.idp_policy",
                services.idp_policy.is_some(),
            )?;
        }
        Ok(())
    }

    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        lines.strings("match source-address", &self.match_source_address);
        lines.strings("match destination-address", &self.match_destination_address);
        lines.strings("match application", &self.match_application);
        lines.strings("match dynamic-application", &self.match_dynamic_application);
        lines.flag(
            self.match_source_address_excluded,
            "match source-address-excluded",
        );
        lines.flag(
            self.match_destination_address_excluded,
            "match destination-address-excluded",
        );
        lines.push(format!("then {}", self.then));
        if let Some(services) = &self.permit_application_services {
            let mut block = lines.child("then permit application-services");
            services.build_lines(&mut block);
            lines.block("permit_application_services", block)?;
        }
        lines.flag(self.log_init, "then log session-init");
        lines.flag(self.log_close, "then log session-close");
        lines.flag(self.count, "then count");
        Ok(())
    }

    fn read_line(&mut self, rest: &str) {
        let Some((keyword, value)) = split_keyword(rest, POLICY_KEYWORDS) else {
            return;
        };
        match keyword {
            "match application" => {
                self.match_application.insert(trim_quotes(value));
            }
            "match destination-address" => {
                self.match_destination_address.insert(trim_quotes(value));
            }
            "match destination-address-excluded" => self.match_destination_address_excluded = true,
            "match dynamic-application" => {
                self.match_dynamic_application.insert(trim_quotes(value));
            }
            "match source-address" => {
                self.match_source_address.insert(trim_quotes(value));
            }
            "match source-address-excluded" => self.match_source_address_excluded = true,
            "then count" => self.count = true,
            "then deny" => self.then = "deny".to_string(),
            "then log session-close" => self.log_close = true,
            "then log session-init" => self.log_init = true,
            "then permit" => {
                self.then = "permit".to_string();
                if let Some(services) = strip_keyword(value, "application-services") {
                    self.permit_application_services
                        .get_or_insert_default()
                        .read_line(services);
                }
            }
            "then reject" => self.then = "reject".to_string(),
            _ => {}
        }
    }
}

impl PermitApplicationServices {
    fn build_lines(&self, lines: &mut SetLines) {
        lines.string(
            "application-firewall rule-set",
            self.application_firewall_rule_set.as_deref(),
        );
        lines.flag(self.idp, "idp");
        lines.string("idp-policy", self.idp_policy.as_deref());
        lines.flag(self.redirect_wx, "redirect-wx");
        lines.flag(self.reverse_redirect_wx, "reverse-redirect-wx");
        lines.string(
            "security-intelligence-policy",
            self.security_intelligence_policy.as_deref(),
        );
        if let Some(ssl) = &self.ssl_proxy {
            lines.push("ssl-proxy");
            lines.string("ssl-proxy profile-name", ssl.profile_name.as_deref());
        }
        if let Some(uac) = &self.uac_policy {
            lines.push("uac-policy");
            lines.string("uac-policy captive-portal", uac.captive_portal.as_deref());
        }
        lines.string("utm-policy", self.utm_policy.as_deref());
    }

    fn read_line(&mut self, rest: &str) {
        let Some((keyword, value)) = split_keyword(rest, APPLICATION_SERVICES_KEYWORDS) else {
            return;
        };
        match keyword {
            "application-firewall rule-set" => {
                self.application_firewall_rule_set = Some(trim_quotes(value))
            }
            "idp" => self.idp = true,
            "idp-policy" => self.idp_policy = Some(trim_quotes(value)),
            "redirect-wx" => self.redirect_wx = true,
            "reverse-redirect-wx" => self.reverse_redirect_wx = true,
            "security-intelligence-policy" => {
                self.security_intelligence_policy = Some(trim_quotes(value))
            }
            "ssl-proxy" => {
                self.ssl_proxy.get_or_insert_default();
            }
            "ssl-proxy profile-name" => {
                self.ssl_proxy.get_or_insert_default().profile_name = Some(trim_quotes(value))
            }
            "uac-policy" => {
                self.uac_policy.get_or_insert_default();
            }
            "uac-policy captive-portal" => {
                self.uac_policy.get_or_insert_default().captive_portal = Some(trim_quotes(value))
            }
            "utm-policy" => self.utm_policy = Some(trim_quotes(value)),
            _ => {}
        }
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Zones of a `FROM_-_TO` identifier.
fn zones(id: &str) -> Result<(String, String)> {
    match split_id(id, 2).as_deref() {
        Some([from, to]) => {
            zone_name("from_zone", from)?;
            zone_name("to_zone", to)?;
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(Error::validation(format!(
            "malformed id '{}': expected FROM{}TO",
            id, ID_SEPARATOR
        ))),
    }
}

/// Zone names appear unquoted in the path and inside the composite id.
fn zone_name(field: &str, zone: &str) -> Result<()> {
    non_empty(field, zone)?;
    if zone.contains(ID_SEPARATOR) || zone.contains(char::is_whitespace) || zone.contains('"') {
        return Err(Error::validation(format!(
            "{} '{}' must not contain whitespace, quotes or '{}'",
            field, zone, ID_SEPARATOR
        )));
    }
    Ok(())
}

fn zone_path(from: &str, to: &str) -> String {
    format!("security policies from-zone {} to-zone {}", from, to)
}

impl SecurityPolicy {
    pub fn new(from_zone: impl Into<String>, to_zone: impl Into<String>) -> Self {
        Self {
            from_zone: from_zone.into(),
            to_zone: to_zone.into(),
            policy: Vec::new(),
        }
    }
}

impl Resource for SecurityPolicy {
    const TYPE_NAME: &'static str = "junos_security_policy";

    fn id(&self) -> String {
        format!("{}{}{}", self.from_zone, ID_SEPARATOR, self.to_zone)
    }

    fn show_command(id: &str) -> String {
        let (from, to) = id.split_once(ID_SEPARATOR).unwrap_or((id, ""));
        show_configuration(&zone_path(from, to))
    }

    fn validate_id(id: &str) -> Result<()> {
        zones(id).map(|_| ())
    }

    fn validate(&self) -> Result<()> {
        zone_name("from_zone", &self.from_zone)?;
        zone_name("to_zone", &self.to_zone)?;
        if self.policy.is_empty() {
            return Err(Error::validation("policy must not be empty"));
        }
        for rule in &self.policy {
            rule.validate()?;
        }
        Ok(())
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} ", zone_path(&self.from_zone, &self.to_zone)));

        let mut names = UniqueKeys::new("policy");
        for rule in &self.policy {
            names.check(rule.name.as_str(), || format!("name '{}'", rule.name))?;
            let mut block = lines.child(format!("policy {}", quote(&rule.name)));
            rule.build_lines(&mut block)?;
            lines.append(block);
        }

        Ok(lines.into_lines())
    }

    fn delete_lines(id: &str) -> Result<Vec<String>> {
        let (from, to) = zones(id)?;
        Ok(vec![format!("delete {}", zone_path(&from, &to))])
    }

    fn from_config(raw: &str, id: &str) -> Result<Option<Self>> {
        let (from_zone, to_zone) = zones(id)?;
        let mut rules = KeyedBlocks::new();

        for line in config_lines(raw) {
            let Some((_, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            let (name, rest) = require_word(value, line, "policy name")?;
            rules
                .entry_with(name, |name: &String| PolicyRule {
                    name: name.clone(),
                    ..Default::default()
                })
                .read_line(rest);
        }

        if rules.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            from_zone,
            to_zone,
            policy: rules.into_values(),
        }))
    }
}
