//! `junos_system_radius_server`: a RADIUS server under `system radius-server`.

use super::Resource;
use crate::codec::sentinel;
use crate::codec::validate::{ip_address, non_empty, opt_int_between};
use crate::codec::{
    config_lines, parse_number, show_configuration, split_keyword, trim_quotes, SetLines,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

const PATH: &str = "system radius-server";

const KEYWORDS: &[&str] = &[
    "accounting-port",
    "accounting-retry",
    "accounting-timeout",
    "dynamic-request-port",
    "max-outstanding-requests",
    "port",
    "preauthentication-port",
    "preauthentication-secret",
    "retry",
    "routing-instance",
    "secret",
    "source-address",
    "timeout",
];

/// RADIUS authentication server.
///
/// `accounting_retry`, `accounting_timeout` and `max_outstanding_requests`
/// accept `0`, so their unset value is `-1` in serialized state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusServer {
    pub address: String,
    /// Shared secret, as configured (the device may return it obfuscated)
    pub secret: String,
    #[serde(with = "sentinel::zero")]
    pub accounting_port: Option<u16>,
    #[serde(with = "sentinel::minus_one")]
    pub accounting_retry: Option<u32>,
    #[serde(with = "sentinel::minus_one")]
    pub accounting_timeout: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub dynamic_request_port: Option<u16>,
    #[serde(with = "sentinel::minus_one")]
    pub max_outstanding_requests: Option<u32>,
    #[serde(with = "sentinel::zero")]
    pub port: Option<u16>,
    #[serde(with = "sentinel::zero")]
    pub preauthentication_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preauthentication_secret: Option<String>,
    #[serde(with = "sentinel::zero")]
    pub retry: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_address: Option<String>,
    #[serde(with = "sentinel::zero")]
    pub timeout: Option<u32>,
}

impl RadiusServer {
    pub fn new(address: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }
}

impl Resource for RadiusServer {
    const TYPE_NAME: &'static str = "junos_system_radius_server";

    fn id(&self) -> String {
        self.address.clone()
    }

    fn show_command(id: &str) -> String {
        show_configuration(&format!("{} {}", PATH, id))
    }

    fn validate(&self) -> Result<()> {
        ip_address("address", &self.address)?;
        non_empty("secret", &self.secret)?;
        for (field, port) in [
            ("accounting_port", self.accounting_port),
            ("dynamic_request_port", self.dynamic_request_port),
            ("port", self.port),
            ("preauthentication_port", self.preauthentication_port),
        ] {
            opt_int_between(field, port, 1, u16::MAX)?;
        }
        opt_int_between("accounting_retry", self.accounting_retry, 0, 100)?;
        opt_int_between("accounting_timeout", self.accounting_timeout, 0, 1000)?;
        opt_int_between("max_outstanding_requests", self.max_outstanding_requests, 0, 2000)?;
        opt_int_between("retry", self.retry, 1, 100)?;
        opt_int_between("timeout", self.timeout, 1, 1000)?;
        if let Some(source) = &self.source_address {
            ip_address("source_address", source)?;
        }
        Ok(())
    }

    fn build_lines(&self) -> Result<Vec<String>> {
        let mut lines = SetLines::new(format!("set {} {} ", PATH, self.address));

        lines.string("secret", Some(self.secret.as_str()));
        lines.number("accounting-port", self.accounting_port);
        lines.number("accounting-retry", self.accounting_retry);
        lines.number("accounting-timeout", self.accounting_timeout);
        lines.number("dynamic-request-port", self.dynamic_request_port);
        lines.number("max-outstanding-requests", self.max_outstanding_requests);
        lines.number("port", self.port);
        lines.number("preauthentication-port", self.preauthentication_port);
        lines.string(
            "preauthentication-secret",
            self.preauthentication_secret.as_deref(),
        );
        lines.number("retry", self.retry);
        lines.string("routing-instance", self.routing_instance.as_deref());
        lines.word("source-address", self.source_address.as_deref());
        lines.number("timeout", self.timeout);

        Ok(lines.into_lines())
    }

    fn validate_id(id: &str) -> Result<()> {
        ip_address("address", id)
    }

    fn delete_lines(id: &str) -> Result<Vec<String>> {
        Self::validate_id(id)?;
        Ok(vec![format!("delete {} {}", PATH, id)])
    }

    fn from_config(raw: &str, id: &str) -> Result<Option<Self>> {
        let mut server = Self {
            address: id.to_string(),
            ..Default::default()
        };
        let mut found = false;

        for line in config_lines(raw) {
            let Some((keyword, value)) = split_keyword(line, KEYWORDS) else {
                continue;
            };
            found = true;
            match keyword {
                "accounting-port" => server.accounting_port = Some(parse_number(value, line)?),
                "accounting-retry" => server.accounting_retry = Some(parse_number(value, line)?),
                "accounting-timeout" => {
                    server.accounting_timeout = Some(parse_number(value, line)?)
                }
                "dynamic-request-port" => {
                    server.dynamic_request_port = Some(parse_number(value, line)?)
                }
                "max-outstanding-requests" => {
                    server.max_outstanding_requests = Some(parse_number(value, line)?)
                }
                "port" => server.port = Some(parse_number(value, line)?),
                "preauthentication-port" => {
                    server.preauthentication_port = Some(parse_number(value, line)?)
                }
                "preauthentication-secret" => {
                    server.preauthentication_secret = Some(trim_quotes(value))
                }
                "retry" => server.retry = Some(parse_number(value, line)?),
                "routing-instance" => server.routing_instance = Some(trim_quotes(value)),
                "secret" => server.secret = trim_quotes(value),
                "source-address" => server.source_address = Some(trim_quotes(value)),
                "timeout" => server.timeout = Some(parse_number(value, line)?),
                _ => {}
            }
        }

        Ok(found.then_some(server))
    }
}
