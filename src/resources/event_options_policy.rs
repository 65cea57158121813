//! `junos_event_options_policy`: an event policy under `event-options policy`.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{
    conflicts_with, int_between, non_empty, opt_int_between, opt_string_in_slice,
    required_with, string_in_slice, unique_items,
};
use crate::codec::{
    config_lines, entry_in, parse_number, quote, require_word, show_configuration,
    split_keyword, strip_keyword, trim_quotes, KeyedBlocks, SetLines, UniqueKeys,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PATH: &str = "event-options policy";

const KEYWORDS: &[&str] = &["attributes-match", "events", "then", "within"];

const THEN_KEYWORDS: &[&str] = &[
    "change-configuration",
    "event-script",
    "execute-commands",
    "ignore",
    "priority-override facility",
    "priority-override severity",
    "raise-trap",
    "upload filename",
];

const CHANGE_CONFIGURATION_KEYWORDS: &[&str] = &[
    "commands",
    "commit-options check",
    "commit-options check synchronize",
    "commit-options force",
    "commit-options log",
    "commit-options synchronize",
    "retry count",
    "retry interval",
    "user-name",
];

const OUTPUT_KEYWORDS: &[&str] = &[
    "arguments",
    "commands",
    "destination",
    "output-filename",
    "output-format",
    "user-name",
];

const TRANSFER_KEYWORDS: &[&str] = &["retry-count", "retry-interval", "transfer-delay", "user-name"];

const OUTPUT_FORMATS: &[&str] = &["text", "xml"];
const TRIGGER_WHEN: &[&str] = &["after", "on", "until"];
const COMPARE: &[&str] = &["equals", "matches", "starts-with"];

/// Event policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventOptionsPolicy {
    pub name: String,
    /// Events triggering the policy
    pub events: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub then: Option<PolicyThen>,
    pub attributes_match: Vec<AttributesMatch>,
    pub within: Vec<PolicyWithin>,
}

/// Actions run when the policy matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyThen {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_configuration: Option<ChangeConfiguration>,
    pub event_script: Vec<EventScript>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute_commands: Option<ExecuteCommands>,
    pub ignore: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<PriorityOverride>,
    pub raise_trap: bool,
    pub upload: Vec<Upload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeConfiguration {
    /// Configuration commands, applied in order
    pub commands: Vec<String>,
    pub commit_options_check: bool,
    pub commit_options_check_synchronize: bool,
    pub commit_options_force: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_options_log: Option<String>,
    pub commit_options_synchronize: bool,
    #[serde(with = "sentinel::zero")]
    pub retry_count: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub retry_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventScript {
    pub filename: String,
    pub arguments: Vec<ScriptArgument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptArgument {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteCommands {
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Archive site receiving command output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destination {
    pub name: String,
    #[serde(with = "sentinel::zero")]
    pub retry_count: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub retry_interval: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub transfer_delay: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upload {
    pub filename: String,
    pub destination: String,
    #[serde(with = "sentinel::zero")]
    pub retry_count: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub retry_interval: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub transfer_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Correlation window: `events` must (and `not_events` must not) occur
/// within `time_interval` seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyWithin {
    pub time_interval: u32,
    pub events: BTreeSet<String>,
    pub not_events: BTreeSet<String>,
    #[serde(with = "sentinel::zero")]
    pub trigger_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_when: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributesMatch {
    pub from: String,
    pub compare: String,
    pub to: String,
}

fn read_transfer(
    keyword: &str,
    value: &str,
    line: &str,
    retry_count: &mut Option<u32>,
    retry_interval: &mut Option<u32>,
    transfer_delay: &mut Option<u32>,
) -> Result<()> {
    match keyword {
        "retry-count" => *retry_count = Some(parse_number(value, line)?),
        "retry-interval" => *retry_interval = Some(parse_number(value, line)?),
        "transfer-delay" => *transfer_delay = Some(parse_number(value, line)?),
        _ => {}
    }
    Ok(())
}

impl ChangeConfiguration {
    fn validate(&self) -> Result<()> {
        if self.commands.is_empty() {
            return Err(Error::validation(
                "then.change_configuration.commands must not be empty",
            ));
        }
        unique_items("then.change_configuration.commands", &self.commands)?;
        required_with(
            "then.change_configuration.commit_options_check_synchronize",
            self.commit_options_check_synchronize,
            "then.change_configuration.commit_options_check",
            self.commit_options_check,
        )?;
        for (other, set) in [
            ("force", self.commit_options_force),
            ("log", self.commit_options_log.is_some()),
            ("synchronize", self.commit_options_synchronize),
        ] {
            conflicts_with(
                "then.change_configuration.commit_options_check",
                self.commit_options_check,
                &format!("then.change_configuration.commit_options_{}", other),
                set,
            )?;
        }
        required_with(
            "then.change_configuration.retry_interval",
            self.retry_interval.is_some(),
            "then.change_configuration.retry_count",
            self.retry_count.is_some(),
        )?;
        opt_int_between("then.change_configuration.retry_count", self.retry_count, 0, 10)
    }

    fn build_lines(&self, lines: &mut SetLines) {
        lines.strings("commands", &self.commands);
        lines.flag(self.commit_options_check, "commit-options check");
        lines.flag(
            self.commit_options_check_synchronize,
            "commit-options check synchronize",
        );
        lines.flag(self.commit_options_force, "commit-options force");
        lines.string("commit-options log", self.commit_options_log.as_deref());
        lines.flag(self.commit_options_synchronize, "commit-options synchronize");
        lines.number("retry count", self.retry_count);
        lines.number("retry interval", self.retry_interval);
        lines.string("user-name", self.user_name.as_deref());
    }

    fn read_line(&mut self, value: &str, line: &str) -> Result<()> {
        let Some((keyword, value)) = split_keyword(value, CHANGE_CONFIGURATION_KEYWORDS) else {
            return Ok(());
        };
        match keyword {
            "commands" => self.commands.push(trim_quotes(value)),
            "commit-options check" => self.commit_options_check = true,
            "commit-options check synchronize" => {
                self.commit_options_check = true;
                self.commit_options_check_synchronize = true;
            }
            "commit-options force" => self.commit_options_force = true,
            "commit-options log" => self.commit_options_log = Some(trim_quotes(value)),
            "commit-options synchronize" => self.commit_options_synchronize = true,
            "retry count" => self.retry_count = Some(parse_number(value, line)?),
            "retry interval" => self.retry_interval = Some(parse_number(value, line)?),
            "user-name" => self.user_name = Some(trim_quotes(value)),
            _ => {}
        }
        Ok(())
    }
}

impl EventScript {
    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        let mut script = lines.child(format!("event-script {}", quote(&self.filename)));
        script.push("");
        let mut names = UniqueKeys::new("arguments");
        for argument in &self.arguments {
            names.check(argument.name.as_str(), || format!("name '{}'", argument.name))?;
            script.push(format!(
                "arguments {} {}",
                quote(&argument.name),
                quote(&argument.value)
            ));
        }
        script.string("output-filename", self.output_filename.as_deref());
        script.word("output-format", self.output_format.as_deref());
        script.string("user-name", self.user_name.as_deref());
        lines.append(script);
        Ok(())
    }

    fn read_line(&mut self, value: &str, line: &str) -> Result<()> {
        let Some((keyword, value)) = split_keyword(value, OUTPUT_KEYWORDS) else {
            return Ok(());
        };
        match keyword {
            "arguments" => {
                let (name, rest) = require_word(value, line, "argument name")?;
                let argument = entry_in(
                    &mut self.arguments,
                    |a| a.name == name,
                    || ScriptArgument {
                        name: name.clone(),
                        value: String::new(),
                    },
                );
                argument.value = trim_quotes(rest);
            }
            "output-filename" => self.output_filename = Some(trim_quotes(value)),
            "output-format" => self.output_format = Some(trim_quotes(value)),
            "user-name" => self.user_name = Some(trim_quotes(value)),
            _ => {}
        }
        Ok(())
    }
}

impl ExecuteCommands {
    fn build_lines(&self, lines: &mut SetLines) {
        lines.strings("commands", &self.commands);
        if let Some(destination) = &self.destination {
            let mut block = lines.child(format!("destination {}", quote(&destination.name)));
            block.push("");
            block.number("retry-count", destination.retry_count);
            block.number("retry-interval", destination.retry_interval);
            block.number("transfer-delay", destination.transfer_delay);
            lines.append(block);
        }
        lines.string("output-filename", self.output_filename.as_deref());
        lines.word("output-format", self.output_format.as_deref());
        lines.string("user-name", self.user_name.as_deref());
    }

    fn read_line(&mut self, value: &str, line: &str) -> Result<()> {
        let Some((keyword, value)) = split_keyword(value, OUTPUT_KEYWORDS) else {
            return Ok(());
        };
        match keyword {
            "commands" => self.commands.push(trim_quotes(value)),
            "destination" => {
                let (name, rest) = require_word(value, line, "destination name")?;
                let destination = self.destination.get_or_insert_with(|| Destination {
                    name: name.clone(),
                    ..Default::default()
                });
                destination.name = name;
                if let Some((keyword, value)) = split_keyword(rest, TRANSFER_KEYWORDS) {
                    read_transfer(
                        keyword,
                        value,
                        line,
                        &mut destination.retry_count,
                        &mut destination.retry_interval,
                        &mut destination.transfer_delay,
                    )?;
                }
            }
            "output-filename" => self.output_filename = Some(trim_quotes(value)),
            "output-format" => self.output_format = Some(trim_quotes(value)),
            "user-name" => self.user_name = Some(trim_quotes(value)),
            _ => {}
        }
        Ok(())
    }
}

impl Upload {
    fn build_lines(&self, lines: &mut SetLines) {
        let mut block = lines.child(format!(
            "upload filename {} destination {}",
            quote(&self.filename),
            quote(&self.destination)
        ));
        block.push("");
        block.number("retry-count", self.retry_count);
        block.number("retry-interval", self.retry_interval);
        block.number("transfer-delay", self.transfer_delay);
        block.string("user-name", self.user_name.as_deref());
        lines.append(block);
    }
}

impl PolicyThen {
    fn validate(&self) -> Result<()> {
        let others = [
            ("then.change_configuration", self.change_configuration.is_some()),
            ("then.event_script", !self.event_script.is_empty()),
            ("then.execute_commands", self.execute_commands.is_some()),
            ("then.priority_override", self.priority_override.is_some()),
            ("then.raise_trap", self.raise_trap),
            ("then.upload", !self.upload.is_empty()),
        ];
        for (other, set) in others {
            conflicts_with("then.ignore", self.ignore, other, set)?;
        }
        if let Some(change) = &self.change_configuration {
            change.validate()?;
        }
        for script in &self.event_script {
            non_empty("then.event_script.filename", &script.filename)?;
            opt_string_in_slice(
                "then.event_script.output_format",
                script.output_format.as_deref(),
                OUTPUT_FORMATS,
            )?;
        }
        if let Some(execute) = &self.execute_commands {
            if execute.commands.is_empty() {
                return Err(Error::validation(
                    "then.execute_commands.commands must not be empty",
                ));
            }
            unique_items("then.execute_commands.commands", &execute.commands)?;
            opt_string_in_slice(
                "then.execute_commands.output_format",
                execute.output_format.as_deref(),
                OUTPUT_FORMATS,
            )?;
        }
        for upload in &self.upload {
            non_empty("then.upload.filename", &upload.filename)?;
            non_empty("then.upload.destination", &upload.destination)?;
        }
        Ok(())
    }

    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        if let Some(change) = &self.change_configuration {
            let mut block = lines.child("change-configuration");
            change.build_lines(&mut block);
            lines.append(block);
        }
        let mut scripts = UniqueKeys::new("event_script");
        for script in &self.event_script {
            scripts.check(script.filename.as_str(), || {
                format!("filename '{}'", script.filename)
            })?;
            script.build_lines(lines)?;
        }
        if let Some(execute) = &self.execute_commands {
            let mut block = lines.child("execute-commands");
            execute.build_lines(&mut block);
            lines.append(block);
        }
        lines.flag(self.ignore, "ignore");
        if let Some(priority) = &self.priority_override {
            let mut block = lines.child("priority-override");
            block.word("facility", priority.facility.as_deref());
            block.word("severity", priority.severity.as_deref());
            lines.block("priority_override", block)?;
        }
        lines.flag(self.raise_trap, "raise-trap");
        let mut uploads = UniqueKeys::new("upload");
        for upload in &self.upload {
            uploads.check((upload.filename.as_str(), upload.destination.as_str()), || {
                format!(
                    "filename '{}' and destination '{}'",
                    upload.filename, upload.destination
                )
            })?;
            upload.build_lines(lines);
        }
        Ok(())
    }
}

impl PolicyWithin {
    fn validate(&self) -> Result<()> {
        int_between("within.time_interval", self.time_interval, 60, 604_800)?;
        required_with(
            "within.trigger_count",
            self.trigger_count.is_some(),
            "within.trigger_when",
            self.trigger_when.is_some(),
        )?;
        required_with(
            "within.trigger_when",
            self.trigger_when.is_some(),
            "within.trigger_count",
            self.trigger_count.is_some(),
        )?;
        opt_string_in_slice("within.trigger_when", self.trigger_when.as_deref(), TRIGGER_WHEN)
    }

    fn build_lines(&self, lines: &mut SetLines) -> Result<()> {
        let mut block = lines.child(format!("within {}", self.time_interval));
        block.strings("events", &self.events);
        block.strings("not events", &self.not_events);
        if let (Some(when), Some(count)) = (&self.trigger_when, self.trigger_count) {
            block.push(format!("trigger {} {}", when, count));
        }
        lines.block("within", block)
    }

    fn read_line(&mut self, value: &str, line: &str) -> Result<()> {
        if let Some(event) = strip_keyword(value, "events") {
            self.events.insert(trim_quotes(event));
        } else if let Some(event) = strip_keyword(value, "not events") {
            self.not_events.insert(trim_quotes(event));
        } else if let Some(trigger) = strip_keyword(value, "trigger") {
            let (when, rest) = require_word(trigger, line, "trigger condition and count")?;
            self.trigger_count = Some(parse_number(rest, line)?);
            self.trigger_when = Some(when);
        }
        Ok(())
    }
}

impl EventOptionsPolicy {
    /// Create a policy triggered by `events` with no action yet.
    pub fn new<I, S>(name: impl Into<String>, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            events: events.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Resource for EventOptionsPolicy {
    const TYPE_NAME: &'static str = "junos_event_options_policy";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn show_command(id: &str) -> String {
        show_configuration(&format!("{} {}", PATH, quote(id)))
    }

    fn validate(&self) -> Result<()> {
        non_empty("name", &self.name)?;
        if self.events.is_empty() {
            return Err(Error::validation("events must not be empty"));
        }
        let then = self
            .then
            .as_ref()
            .ok_or_else(|| Error::validation("then block is required"))?;
        then.validate()?;
        for within in &self.within {
            within.validate()?;
        }
        for attributes in &self.attributes_match {
            non_empty("attributes_match.from", &attributes.from)?;
            string_in_slice("attributes_match.compare", &attributes.compare, COMPARE)?;
            non_empty("attributes_match.to", &attributes.to)?;
        }
        Ok(())
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} {} ", PATH, quote(&self.name)));

        let mut matches = UniqueKeys::new("attributes_match");
        for attributes in &self.attributes_match {
            matches.check(attributes, || {
                format!(
                    "from '{}', compare '{}' and to '{}'",
                    attributes.from, attributes.compare, attributes.to
                )
            })?;
            lines.push(format!(
                "attributes-match {} {} {}",
                quote(&attributes.from),
                attributes.compare,
                quote(&attributes.to)
            ));
        }
        lines.strings("events", &self.events);
        if let Some(then) = &self.then {
            let mut block = lines.child("then");
            then.build_lines(&mut block)?;
            lines.block("then", block)?;
        }
        let mut intervals = UniqueKeys::new("within");
        for within in &self.within {
            intervals.check(within.time_interval, || {
                format!("time_interval '{}'", within.time_interval)
            })?;
            within.build_lines(&mut lines)?;
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
        let mut policy = Self {
            name: id.to_string(),
            ..Default::default()
        };
        let mut found = false;
        let mut matches = KeyedBlocks::new();
        let mut within = KeyedBlocks::new();
        let mut scripts = KeyedBlocks::new();
        let mut uploads = KeyedBlocks::new();

        for line in config_lines(raw) {
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            found = true;
            match keyword {
                "attributes-match" => {
                    let what = "from, compare and to";
                    let (from, rest) = require_word(value, line, what)?;
                    let (compare, rest) = require_word(rest, line, what)?;
                    let (to, _) = require_word(rest, line, what)?;
                    let key = AttributesMatch { from, compare, to };
                    matches.entry_with(key.clone(), |_| key);
                }
                "events" => {
                    policy.events.insert(trim_quotes(value));
                }
                "within" => {
                    let (interval, rest) = require_word(value, line, "time interval")?;
                    let interval: u32 = parse_number(&interval, line)?;
                    within
                        .entry_with(interval, |interval| PolicyWithin {
                            time_interval: *interval,
                            ..Default::default()
                        })
                        .read_line(rest, line)?;
                }
                "then" => {
                    let then = policy.then.get_or_insert_default();
                    let Some((then_keyword, value)) = split_keyword(value, THEN_KEYWORDS) else {
                        continue;
                    };
                    match then_keyword {
                        "change-configuration" => then
                            .change_configuration
                            .get_or_insert_default()
                            .read_line(value, line)?,
                        "event-script" => {
                            let (filename, rest) = require_word(value, line, "event-script filename")?;
                            scripts
                                .entry_with(filename, |filename: &String| EventScript {
                                    filename: filename.clone(),
                                    ..Default::default()
                                })
                                .read_line(rest, line)?;
                        }
                        "execute-commands" => then
                            .execute_commands
                            .get_or_insert_default()
                            .read_line(value, line)?,
                        "ignore" => then.ignore = true,
                        "priority-override facility" => {
                            then.priority_override.get_or_insert_default().facility =
                                Some(trim_quotes(value))
                        }
                        "priority-override severity" => {
                            then.priority_override.get_or_insert_default().severity =
                                Some(trim_quotes(value))
                        }
                        "raise-trap" => then.raise_trap = true,
                        "upload filename" => {
                            let what = "upload filename and destination";
                            let (filename, rest) = require_word(value, line, what)?;
                            let rest = strip_keyword(rest, "destination").ok_or_else(|| {
                                Error::structural(line, format!("can't find {}", what))
                            })?;
                            let (destination, rest) = require_word(rest, line, what)?;
                            let upload = uploads.entry_with(
                                (filename, destination),
                                |(filename, destination): &(String, String)| Upload {
                                    filename: filename.clone(),
                                    destination: destination.clone(),
                                    ..Default::default()
                                },
                            );
                            if let Some((keyword, value)) = split_keyword(rest, TRANSFER_KEYWORDS)
                            {
                                if keyword == "user-name" {
                                    upload.user_name = Some(trim_quotes(value));
                                } else {
                                    read_transfer(
                                        keyword,
                                        value,
                                        line,
                                        &mut upload.retry_count,
                                        &mut upload.retry_interval,
                                        &mut upload.transfer_delay,
                                    )?;
                                }
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if !scripts.is_empty() || !uploads.is_empty() {
            let then = policy.then.get_or_insert_default();
            then.event_script = scripts.into_values();
            then.upload = uploads.into_values();
        }
        policy.attributes_match = matches.into_values();
        policy.within = within.into_values();

        Ok(found.then_some(policy))
    }
}
