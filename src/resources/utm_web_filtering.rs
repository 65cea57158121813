//! `junos_security_utm_profile_web_filtering_juniper_enhanced`: an enhanced
//! web filtering UTM profile.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{non_empty, opt_int_between, opt_string_in_slice, string_in_slice};
use crate::codec::{
    config_lines, entry_in, parse_number, quote, require_word, show_configuration,
    split_keyword, strip_keyword, trim_quotes, KeyedBlocks, SetLines, UniqueKeys,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "security utm feature-profile web-filtering juniper-enhanced profile";

const ACTIONS: &[&str] = &["block", "log-and-permit", "permit", "quarantine"];
const FALLBACK_ACTIONS: &[&str] = &["block", "log-and-permit"];
const SITE_REPUTATIONS: &[&str] = &[
    "fairly-safe",
    "harmful",
    "moderately-safe",
    "suspicious",
    "very-safe",
];

const KEYWORDS: &[&str] = &[
    "category",
    "custom-block-message",
    "default",
    "fallback-settings default",
    "fallback-settings server-connectivity",
    "fallback-settings timeout",
    "fallback-settings too-many-requests",
    "no-safe-search",
    "quarantine-custom-message",
    "site-reputation-action",
    "timeout",
];

/// Enhanced web filtering profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtmWebFilteringJuniperEnhanced {
    pub name: String,
    pub category: Vec<WebFilteringCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_block_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_settings: Option<FallbackSettings>,
    pub no_safe_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarantine_custom_message: Option<String>,
    pub site_reputation_action: Vec<ReputationAction>,
    /// Seconds to wait for the cloud server
    #[serde(with = "sentinel::zero")]
    pub timeout: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebFilteringCategory {
    pub name: String,
    pub action: String,
    pub reputation_action: Vec<ReputationAction>,
}

/// Action applied to sites of a given reputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationAction {
    pub site_reputation: String,
    pub action: String,
}

/// Actions taken when the cloud service cannot answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_connectivity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub too_many_requests: Option<String>,
}

impl ReputationAction {
    pub fn new(site_reputation: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            site_reputation: site_reputation.into(),
            action: action.into(),
        }
    }
}

fn validate_reputation_actions(field: &'static str, actions: &[ReputationAction]) -> Result<()> {
    let mut seen = UniqueKeys::new(field);
    for reputation in actions {
        string_in_slice(
            &format!("{}.site_reputation", field),
            &reputation.site_reputation,
            SITE_REPUTATIONS,
        )?;
        string_in_slice(&format!("{}.action", field), &reputation.action, ACTIONS)?;
        seen.check(reputation.site_reputation.as_str(), || {
            format!("site_reputation '{}'", reputation.site_reputation)
        })?;
    }
    Ok(())
}

fn read_reputation_action(list: &mut Vec<ReputationAction>, value: &str, line: &str) -> Result<()> {
    let (site_reputation, rest) = require_word(value, line, "site reputation and action")?;
    let (action, _) = require_word(rest, line, "site reputation and action")?;
    entry_in(
        list,
        |r| r.site_reputation == site_reputation,
        || ReputationAction::new(site_reputation.clone(), ""),
    )
    .action = action;
    Ok(())
}

impl UtmWebFilteringJuniperEnhanced {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Resource for UtmWebFilteringJuniperEnhanced {
    const TYPE_NAME: &'static str = "junos_security_utm_profile_web_filtering_juniper_enhanced";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn show_command(id: &str) -> String {
        show_configuration(&format!("{} {}", PATH, quote(id)))
    }

    fn validate(&self) -> Result<()> {
        non_empty("name", &self.name)?;
        let mut categories = UniqueKeys::new("category");
        for category in &self.category {
            non_empty("category.name", &category.name)?;
            categories.check(category.name.as_str(), || {
                format!("name '{}'", category.name)
            })?;
            string_in_slice("category.action", &category.action, ACTIONS)?;
            validate_reputation_actions("category.reputation_action", &category.reputation_action)?;
        }
        opt_string_in_slice("default_action", self.default_action.as_deref(), ACTIONS)?;
        if let Some(fallback) = &self.fallback_settings {
            for (field, value) in [
                ("fallback_settings.default", &fallback.default),
                (
                    "fallback_settings.server_connectivity",
                    &fallback.server_connectivity,
                ),
                ("fallback_settings.timeout", &fallback.timeout),
                ("fallback_settings.too_many_requests", &fallback.too_many_requests),
            ] {
                opt_string_in_slice(field, value.as_deref(), FALLBACK_ACTIONS)?;
            }
        }
        validate_reputation_actions("site_reputation_action", &self.site_reputation_action)?;
        opt_int_between("timeout", self.timeout, 1, 1800)
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} {} ", PATH, quote(&self.name)));

        // the profile exists even with every option unset
        lines.push("");
        for category in &self.category {
            let mut block = lines.child(format!("category {}", quote(&category.name)));
            block.word("action", Some(category.action.as_str()));
            for reputation in &category.reputation_action {
                block.push(format!(
                    "reputation-action {} {}",
                    reputation.site_reputation, reputation.action
                ));
            }
            lines.append(block);
        }
        lines.string("custom-block-message", self.custom_block_message.as_deref());
        lines.word("default", self.default_action.as_deref());
        if let Some(fallback) = &self.fallback_settings {
            let mut block = lines.child("fallback-settings");
            block.word("default", fallback.default.as_deref());
            block.word(
                "server-connectivity",
                fallback.server_connectivity.as_deref(),
            );
            block.word("timeout", fallback.timeout.as_deref());
            block.word("too-many-requests", fallback.too_many_requests.as_deref());
            lines.block("fallback_settings", block)?;
        }
        lines.flag(self.no_safe_search, "no-safe-search");
        lines.string(
            "quarantine-custom-message",
            self.quarantine_custom_message.as_deref(),
        );
        for reputation in &self.site_reputation_action {
            lines.push(format!(
                "site-reputation-action {} {}",
                reputation.site_reputation, reputation.action
            ));
        }
        lines.number("timeout", self.timeout);

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
        let mut profile = Self::new(id);
        let mut found = false;
        let mut categories = KeyedBlocks::new();

        for line in config_lines(raw) {
            found = true;
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            match keyword {
                "category" => {
                    let (name, rest) = require_word(value, line, "category name")?;
                    let category = categories.entry_with(name, |name: &String| {
                        WebFilteringCategory {
                            name: name.clone(),
                            ..Default::default()
                        }
                    });
                    if let Some(action) = strip_keyword(rest, "action") {
                        category.action = trim_quotes(action);
                    } else if let Some(reputation) = strip_keyword(rest, "reputation-action") {
                        read_reputation_action(&mut category.reputation_action, reputation, line)?;
                    }
                }
                "custom-block-message" => profile.custom_block_message = Some(trim_quotes(value)),
                "default" => profile.default_action = Some(trim_quotes(value)),
                "fallback-settings default" => {
                    profile.fallback_settings.get_or_insert_default().default =
                        Some(trim_quotes(value))
                }
                "fallback-settings server-connectivity" => {
                    profile
                        .fallback_settings
                        .get_or_insert_default()
                        .server_connectivity = Some(trim_quotes(value))
                }
                "fallback-settings timeout" => {
                    profile.fallback_settings.get_or_insert_default().timeout =
                        Some(trim_quotes(value))
                }
                "fallback-settings too-many-requests" => {
                    profile
                        .fallback_settings
                        .get_or_insert_default()
                        .too_many_requests = Some(trim_quotes(value))
                }
                "no-safe-search" => profile.no_safe_search = true,
                "quarantine-custom-message" => {
                    profile.quarantine_custom_message = Some(trim_quotes(value))
                }
                "site-reputation-action" => {
                    read_reputation_action(&mut profile.site_reputation_action, value, line)?
                }
                "timeout" => profile.timeout = Some(parse_number(value, line)?),
                _ => {}
            }
        }
        profile.category = categories.into_values();

        Ok(found.then_some(profile))
    }
}
