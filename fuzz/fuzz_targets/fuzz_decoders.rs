//! Fuzz target for resource decoders.
//!
//! Feeds arbitrary text, framed and unframed, to every resource decoder.
//! Decoders must return an error for malformed input, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use junos_resources::resources::{
    ChassisRedundancy, EventOptionsPolicy, RadiusServer, Resource, SecurityPolicy,
    SecurityScreen, Snmp, SwitchOptions, UtmWebFilteringJuniperEnhanced,
};

fn decode_all(raw: &str) {
    let _ = ChassisRedundancy::from_config(raw, "redundancy");
    let _ = EventOptionsPolicy::from_config(raw, "policy");
    let _ = RadiusServer::from_config(raw, "192.0.2.1");
    let _ = SecurityPolicy::from_config(raw, "trust_-_untrust");
    let _ = SecurityScreen::from_config(raw, "untrust");
    let _ = Snmp::from_config(raw, "snmp");
    let _ = SwitchOptions::from_config(raw, "switch_options");
    let _ = UtmWebFilteringJuniperEnhanced::from_config(raw, "profile");
}

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        decode_all(text);
        decode_all(&format!(
            "\n<configuration-output>\n{}\n</configuration-output>\n",
            text
        ));
    }
});
