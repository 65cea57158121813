//! Property-based tests for junos-resources using proptest.
//!
//! Random models are encoded, turned into the relative output a device would
//! return, and decoded again. Random text is fed to every decoder to make
//! sure malformed device output produces errors rather than panics.

mod common;

use junos_resources::codec::{join_words, quote, split_words};
use junos_resources::error::Error;
use junos_resources::resources::event_options_policy::{
    AttributesMatch, ChangeConfiguration, Destination, EventScript, ExecuteCommands, PolicyThen,
    PolicyWithin, PriorityOverride, ScriptArgument, Upload,
};
use junos_resources::resources::security_policy::{
    PermitApplicationServices, PolicyRule, SslProxy, UacPolicy,
};
use junos_resources::resources::security_screen::{
    ScreenIcmp, ScreenIp, ScreenIpv6ExtensionHeader, ScreenLimitSession, ScreenSynFlood,
    ScreenTcp, ScreenThreshold, ScreenUdp, ScreenUdpFlood, ScreenWhitelist,
};
use junos_resources::resources::snmp::SnmpHealthMonitor;
use junos_resources::resources::utm_web_filtering::{
    FallbackSettings, ReputationAction, WebFilteringCategory,
};
use junos_resources::resources::{
    ChassisRedundancy, EventOptionsPolicy, RadiusServer, Resource, RoutingEngine, SecurityPolicy,
    SecurityScreen, Snmp, SwitchOptions, UtmWebFilteringJuniperEnhanced,
};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use std::collections::HashSet;
use std::hash::Hash;
use std::net::Ipv4Addr;

// ============================================================================
// Strategies for generating test data
// ============================================================================

/// Strategy for configuration values that never collide with keywords
fn config_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9][a-z0-9:._-]{0,15}").unwrap()
}

/// Strategy for arbitrary CLI words, including quotes and spaces
fn cli_word() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_-]{1,20}",
        "[a-z \"\\\\]{0,12}",
        "\\PC{0,12}",
    ]
}

fn routing_engines() -> impl Strategy<Value = Vec<RoutingEngine>> {
    (
        prop::sample::subsequence(vec![0u8, 1], 0..=2),
        prop::sample::select(vec!["master", "backup", "disabled"]),
        prop::sample::select(vec!["master", "backup", "disabled"]),
    )
        .prop_map(|(slots, first, second)| {
            slots
                .into_iter()
                .map(|slot| RoutingEngine::new(slot, if slot == 0 { first } else { second }))
                .collect()
        })
}

fn chassis_redundancy() -> impl Strategy<Value = ChassisRedundancy> {
    (
        prop::option::of(1000u32..=10000),
        prop::option::of(1000u32..=10000),
        any::<[bool; 4]>(),
        prop::option::of(2u32..=10000),
        routing_engines(),
    )
        .prop_map(|(read, write, flags, keepalive, engines)| ChassisRedundancy {
            failover_disk_read_threshold: read,
            failover_disk_write_threshold: write,
            failover_not_on_disk_underperform: flags[0],
            failover_on_disk_failure: flags[1],
            failover_on_loss_of_keepalives: flags[2],
            graceful_switchover: flags[3],
            keepalive_time: keepalive,
            routing_engine: engines,
        })
}

fn switch_options() -> impl Strategy<Value = SwitchOptions> {
    (
        btree_set(config_value(), 0..4),
        btree_set(config_value(), 0..3),
        prop::option::of(config_value()),
        prop::option::of(1u32..=65535),
        unique_values(0..3),
        unique_values(0..3),
        prop::option::of(config_value()),
        any::<bool>(),
        prop::option::of(config_value()),
        prop::option::of(config_value()),
        prop::option::of(config_value()),
    )
        .prop_map(
            |(vteps, vteps_v6, rd, service_id, exports, imports, target, auto, target_export, target_import, interface)| {
                SwitchOptions {
                    remote_vtep_list: vteps,
                    remote_vtep_v6_list: vteps_v6,
                    route_distinguisher: rd,
                    service_id,
                    vrf_export: exports,
                    vrf_import: imports,
                    vrf_target: target,
                    vrf_target_auto: auto,
                    vrf_target_export: target_export,
                    vrf_target_import: target_import,
                    vtep_source_interface: interface,
                }
            },
        )
}

/// Distinct values in generation order
fn unique_values(size: std::ops::Range<usize>) -> impl Strategy<Value = Vec<String>> {
    vec(config_value(), size).prop_map(|values| {
        let mut seen = HashSet::new();
        values.into_iter().filter(|v| seen.insert(v.clone())).collect()
    })
}

/// Keep the first item of each key.
fn first_per_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// `None` when the block would carry no statement.
fn non_default<T: Default + PartialEq>(block: Option<T>) -> Option<T> {
    block.filter(|b| *b != T::default())
}

fn ipv4() -> impl Strategy<Value = String> {
    any::<[u8; 4]>().prop_map(|octets| Ipv4Addr::from(octets).to_string())
}

fn health_monitor() -> impl Strategy<Value = SnmpHealthMonitor> {
    (
        prop::option::of(0u32..=100),
        prop::option::of(0u32..=100),
        prop::option::of(1u32..=86_400),
        any::<bool>(),
        prop::option::of(0u32..=100),
        prop::option::of(1u32..=86_400),
        prop::option::of(0u32..=100),
    )
        .prop_map(
            |(falling, rising, interval, idp, idp_falling, idp_interval, idp_rising)| {
                SnmpHealthMonitor {
                    falling_threshold: falling,
                    idp,
                    idp_falling_threshold: idp_falling.filter(|_| idp),
                    idp_interval: idp_interval.filter(|_| idp),
                    idp_rising_threshold: idp_rising.filter(|_| idp),
                    interval,
                    rising_threshold: rising,
                }
            },
        )
}

fn engine_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("use-mac-address".to_string()),
        Just("use-default-ip-address".to_string()),
        config_value().prop_map(|id| format!("local {}", id)),
    ]
}

fn snmp() -> impl Strategy<Value = Snmp> {
    (
        any::<[bool; 6]>(),
        prop::option::of(config_value()),
        prop::option::of(config_value()),
        prop::option::of(engine_id()),
        unique_values(0..3),
        prop::option::of(health_monitor()),
        unique_values(0..3),
        prop::option::of(config_value()),
        unique_values(0..3),
    )
        .prop_map(
            |(flags, contact, description, engine_id, filters, health, interfaces, location, access_list)| {
                Snmp {
                    arp: flags[0] || flags[1],
                    arp_host_name_resolution: flags[1],
                    contact,
                    description,
                    engine_id,
                    filter_duplicates: flags[2],
                    filter_interfaces: filters,
                    filter_internal_interfaces: flags[3],
                    health_monitor: health,
                    if_count_with_filter_interfaces: flags[4],
                    interface: interfaces,
                    location,
                    routing_instance_access: flags[5] || !access_list.is_empty(),
                    routing_instance_access_list: access_list,
                }
            },
        )
}

fn radius_server() -> impl Strategy<Value = RadiusServer> {
    (
        ipv4(),
        config_value(),
        prop::array::uniform4(prop::option::of(1u16..=65535)),
        prop::option::of(0u32..=100),
        prop::option::of(0u32..=1000),
        prop::option::of(0u32..=2000),
        prop::option::of(config_value()),
        prop::option::of(1u32..=100),
        prop::option::of(config_value()),
        prop::option::of(ipv4()),
        prop::option::of(1u32..=1000),
    )
        .prop_map(
            |(address, secret, ports, accounting_retry, accounting_timeout, max_outstanding, preauthentication_secret, retry, routing_instance, source_address, timeout)| {
                RadiusServer {
                    address,
                    secret,
                    accounting_port: ports[0],
                    accounting_retry,
                    accounting_timeout,
                    dynamic_request_port: ports[1],
                    max_outstanding_requests: max_outstanding,
                    port: ports[2],
                    preauthentication_port: ports[3],
                    preauthentication_secret,
                    retry,
                    routing_instance,
                    source_address,
                    timeout,
                }
            },
        )
}

fn screen_threshold(low: u32, high: u32) -> impl Strategy<Value = Option<ScreenThreshold>> {
    prop::option::of(prop::option::of(low..=high))
        .prop_map(|screen| screen.map(|threshold| ScreenThreshold { threshold }))
}

fn screen_icmp() -> impl Strategy<Value = ScreenIcmp> {
    (
        screen_threshold(1, 1_000_000),
        any::<[bool; 4]>(),
        screen_threshold(1000, 1_000_000),
    )
        .prop_map(|(flood, flags, sweep)| ScreenIcmp {
            flood,
            fragment: flags[0],
            icmpv6_malformed: flags[1],
            large: flags[2],
            ping_death: flags[3],
            sweep,
        })
}

fn screen_ip() -> impl Strategy<Value = ScreenIp> {
    let headers = (
        any::<[bool; 8]>(),
        btree_set((0u32..=255).prop_map(|n| n.to_string()), 0..3),
    )
        .prop_map(|(flags, user_defined)| ScreenIpv6ExtensionHeader {
            ah_header: flags[0],
            esp_header: flags[1],
            hip_header: flags[2],
            fragment_header: flags[3],
            mobility_header: flags[4],
            no_next_header: flags[5],
            routing_header: flags[6],
            shim6_header: flags[7],
            user_defined_header_type: user_defined,
        });
    (
        any::<[bool; 10]>(),
        prop::option::of(headers),
        prop::option::of(0u32..=32),
    )
        .prop_map(|(flags, headers, limit)| ScreenIp {
            bad_option: flags[0],
            block_frag: flags[1],
            ipv6_extension_header: non_default(headers),
            ipv6_extension_header_limit: limit,
            ipv6_malformed_header: flags[2],
            loose_source_route_option: flags[3],
            record_route_option: flags[4],
            spoofing: flags[5],
            strict_source_route_option: flags[6],
            tear_drop: flags[7],
            timestamp_option: flags[8],
            unknown_protocol: flags[9],
        })
}

fn screen_whitelist() -> impl Strategy<Value = ScreenWhitelist> {
    (config_value(), btree_set(ipv4(), 0..3), btree_set(ipv4(), 0..3)).prop_map(
        |(name, mut destination, source)| {
            if destination.is_empty() && source.is_empty() {
                destination.insert("192.0.2.1".to_string());
            }
            ScreenWhitelist {
                name,
                destination_address: destination,
                source_address: source,
            }
        },
    )
}

fn screen_tcp() -> impl Strategy<Value = ScreenTcp> {
    let syn_flood = (
        prop::option::of(1u32..=500_000),
        prop::option::of(1u32..=500_000),
        prop::option::of(4u32..=500_000),
        prop::option::of(4u32..=500_000),
        prop::option::of(1u32..=50),
        vec(screen_whitelist(), 0..3),
    )
        .prop_map(|(alarm, attack, destination, source, timeout, whitelist)| {
            ScreenSynFlood {
                alarm_threshold: alarm,
                attack_threshold: attack,
                destination_threshold: destination,
                source_threshold: source,
                timeout,
                whitelist: first_per_key(whitelist, |w| w.name.clone()),
            }
        });
    (
        any::<[bool; 6]>(),
        screen_threshold(1000, 1_000_000),
        screen_threshold(1, 250_000),
        prop::option::of(syn_flood),
    )
        .prop_map(|(flags, port_scan, syn_ack_ack_proxy, syn_flood)| ScreenTcp {
            fin_no_ack: flags[0],
            land: flags[1],
            no_flag: flags[2],
            port_scan,
            syn_ack_ack_proxy,
            syn_fin: flags[3],
            syn_flood,
            syn_frag: flags[4],
            winnuke: flags[5],
        })
}

fn screen_udp() -> impl Strategy<Value = ScreenUdp> {
    (
        prop::option::of((
            prop::option::of(1u32..=1_000_000),
            btree_set(config_value(), 0..3),
        )),
        screen_threshold(1000, 1_000_000),
        screen_threshold(1000, 1_000_000),
    )
        .prop_map(|(flood, port_scan, sweep)| ScreenUdp {
            flood: flood.map(|(threshold, whitelist)| ScreenUdpFlood {
                threshold,
                whitelist,
            }),
            port_scan,
            sweep,
        })
}

fn security_screen() -> impl Strategy<Value = SecurityScreen> {
    (
        config_value(),
        any::<bool>(),
        prop::option::of(config_value()),
        prop::option::of(screen_icmp()),
        prop::option::of(screen_ip()),
        prop::option::of((
            prop::option::of(1u32..=2_000_000),
            prop::option::of(1u32..=2_000_000),
        )),
        prop::option::of(screen_tcp()),
        prop::option::of(screen_udp()),
    )
        .prop_map(|(name, alarm, description, icmp, ip, limit, tcp, udp)| {
            let mut screen = SecurityScreen {
                alarm_without_drop: alarm,
                description,
                icmp: non_default(icmp),
                ip: non_default(ip),
                limit_session: non_default(limit.map(|(destination, source)| {
                    ScreenLimitSession {
                        destination_ip_based: destination,
                        source_ip_based: source,
                    }
                })),
                tcp: non_default(tcp),
                udp: non_default(udp),
                ..SecurityScreen::new(name)
            };
            // a screen without statements does not exist on the device
            if screen == SecurityScreen::new(screen.name.clone()) {
                screen.alarm_without_drop = true;
            }
            screen
        })
}

fn zone() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,11}").unwrap()
}

fn application_services() -> impl Strategy<Value = PermitApplicationServices> {
    (
        prop::option::of(config_value()),
        any::<[bool; 3]>(),
        prop::option::of(config_value()),
        prop::option::of(config_value()),
        prop::option::of(prop::option::of(config_value())),
        prop::option::of(prop::option::of(config_value())),
        prop::option::of(config_value()),
    )
        .prop_map(
            |(rule_set, flags, idp_policy, intelligence, ssl, uac, utm)| PermitApplicationServices {
                application_firewall_rule_set: rule_set,
                idp: flags[0] && idp_policy.is_none(),
                idp_policy,
                redirect_wx: flags[1],
                reverse_redirect_wx: flags[2] && !flags[1],
                security_intelligence_policy: intelligence,
                ssl_proxy: ssl.map(|profile_name| SslProxy { profile_name }),
                uac_policy: uac.map(|captive_portal| UacPolicy { captive_portal }),
                utm_policy: utm,
            },
        )
}

fn policy_rule() -> impl Strategy<Value = PolicyRule> {
    (
        config_value(),
        btree_set(config_value(), 1..3),
        btree_set(config_value(), 1..3),
        btree_set(config_value(), 1..3),
        btree_set(config_value(), 0..2),
        any::<[bool; 5]>(),
        prop::sample::select(vec!["permit", "deny", "reject"]),
        prop::option::of(application_services()),
    )
        .prop_map(
            |(name, source, destination, application, dynamic, flags, then, services)| {
                PolicyRule {
                    name,
                    match_source_address: source,
                    match_destination_address: destination,
                    match_application: application,
                    match_dynamic_application: dynamic,
                    match_source_address_excluded: flags[0],
                    match_destination_address_excluded: flags[1],
                    then: then.to_string(),
                    count: flags[2],
                    log_init: flags[3],
                    log_close: flags[4],
                    permit_application_services: non_default(services)
                        .filter(|_| then == "permit"),
                }
            },
        )
}

fn security_policy() -> impl Strategy<Value = SecurityPolicy> {
    (zone(), zone(), vec(policy_rule(), 1..4)).prop_map(|(from, to, rules)| SecurityPolicy {
        policy: first_per_key(rules, |r| r.name.clone()),
        ..SecurityPolicy::new(from, to)
    })
}

fn change_configuration() -> impl Strategy<Value = ChangeConfiguration> {
    (
        unique_values(1..3),
        any::<[bool; 4]>(),
        prop::option::of(config_value()),
        prop::option::of(1u32..=10),
        prop::option::of(1u32..=3600),
        prop::option::of(config_value()),
    )
        .prop_map(|(commands, flags, log, retry_count, retry_interval, user_name)| {
            let check = flags[0];
            ChangeConfiguration {
                commands,
                commit_options_check: check,
                commit_options_check_synchronize: check && flags[1],
                commit_options_force: !check && flags[2],
                commit_options_log: log.filter(|_| !check),
                commit_options_synchronize: !check && flags[3],
                retry_interval: retry_interval.filter(|_| retry_count.is_some()),
                retry_count,
                user_name,
            }
        })
}

fn output_format() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["text", "xml"]).prop_map(String::from))
}

fn event_script() -> impl Strategy<Value = EventScript> {
    (
        config_value(),
        vec((config_value(), config_value()), 0..3),
        prop::option::of(config_value()),
        output_format(),
        prop::option::of(config_value()),
    )
        .prop_map(|(filename, arguments, output_filename, output_format, user_name)| {
            let arguments: Vec<ScriptArgument> = arguments
                .into_iter()
                .map(|(name, value)| ScriptArgument { name, value })
                .collect();
            EventScript {
                filename,
                arguments: first_per_key(arguments, |a| a.name.clone()),
                output_filename,
                output_format,
                user_name,
            }
        })
}

fn transfer() -> impl Strategy<Value = [Option<u32>; 3]> {
    prop::array::uniform3(prop::option::of(1u32..=10))
}

fn execute_commands() -> impl Strategy<Value = ExecuteCommands> {
    (
        unique_values(1..3),
        prop::option::of((config_value(), transfer())),
        prop::option::of(config_value()),
        output_format(),
        prop::option::of(config_value()),
    )
        .prop_map(|(commands, destination, output_filename, output_format, user_name)| {
            ExecuteCommands {
                commands,
                destination: destination.map(|(name, transfer)| Destination {
                    name,
                    retry_count: transfer[0],
                    retry_interval: transfer[1],
                    transfer_delay: transfer[2],
                }),
                output_filename,
                output_format,
                user_name,
            }
        })
}

fn upload() -> impl Strategy<Value = Upload> {
    (
        config_value(),
        config_value(),
        transfer(),
        prop::option::of(config_value()),
    )
        .prop_map(|(filename, destination, transfer, user_name)| Upload {
            filename,
            destination,
            retry_count: transfer[0],
            retry_interval: transfer[1],
            transfer_delay: transfer[2],
            user_name,
        })
}

fn policy_then() -> impl Strategy<Value = PolicyThen> {
    let actions = (
        prop::option::of(change_configuration()),
        vec(event_script(), 0..3),
        prop::option::of(execute_commands()),
        prop::option::of((
            prop::option::of(prop::sample::select(vec!["daemon", "local0", "user"])),
            prop::option::of(prop::sample::select(vec!["critical", "info", "warning"])),
        )),
        any::<bool>(),
        vec(upload(), 0..3),
    )
        .prop_map(|(change, scripts, execute, priority, raise_trap, uploads)| {
            let mut then = PolicyThen {
                change_configuration: change,
                event_script: first_per_key(scripts, |s| s.filename.clone()),
                execute_commands: execute,
                ignore: false,
                priority_override: non_default(priority.map(|(facility, severity)| {
                    PriorityOverride {
                        facility: facility.map(String::from),
                        severity: severity.map(String::from),
                    }
                })),
                raise_trap,
                upload: first_per_key(uploads, |u| (u.filename.clone(), u.destination.clone())),
            };
            if then == PolicyThen::default() {
                then.raise_trap = true;
            }
            then
        });
    prop_oneof![
        1 => Just(PolicyThen {
            ignore: true,
            ..Default::default()
        }),
        4 => actions,
    ]
}

fn policy_within() -> impl Strategy<Value = PolicyWithin> {
    (
        60u32..=604_800,
        btree_set(config_value(), 1..3),
        btree_set(config_value(), 0..2),
        prop::option::of((
            prop::sample::select(vec!["after", "on", "until"]),
            1u32..=100,
        )),
    )
        .prop_map(|(time_interval, events, not_events, trigger)| PolicyWithin {
            time_interval,
            events,
            not_events,
            trigger_count: trigger.map(|(_, count)| count),
            trigger_when: trigger.map(|(when, _)| when.to_string()),
        })
}

fn event_options_policy() -> impl Strategy<Value = EventOptionsPolicy> {
    let attributes = (
        config_value(),
        prop::sample::select(vec!["equals", "matches", "starts-with"]),
        config_value(),
    )
        .prop_map(|(from, compare, to)| AttributesMatch {
            from,
            compare: compare.to_string(),
            to,
        });
    (
        config_value(),
        btree_set(config_value(), 1..4),
        policy_then(),
        vec(attributes, 0..3),
        vec(policy_within(), 0..3),
    )
        .prop_map(|(name, events, then, attributes, within)| EventOptionsPolicy {
            name,
            events,
            then: Some(then),
            attributes_match: first_per_key(attributes, |a| a.clone()),
            within: first_per_key(within, |w| w.time_interval),
        })
}

fn web_filtering_action() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["block", "log-and-permit", "permit", "quarantine"]).prop_map(String::from)
}

fn fallback_action() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["block", "log-and-permit"]).prop_map(String::from))
}

fn reputation_actions() -> impl Strategy<Value = Vec<ReputationAction>> {
    (
        prop::sample::subsequence(
            vec!["fairly-safe", "harmful", "moderately-safe", "suspicious", "very-safe"],
            0..=5,
        ),
        vec(web_filtering_action(), 5),
    )
        .prop_map(|(reputations, actions)| {
            reputations
                .into_iter()
                .zip(actions)
                .map(|(reputation, action)| ReputationAction::new(reputation, action))
                .collect()
        })
}

fn web_filtering() -> impl Strategy<Value = UtmWebFilteringJuniperEnhanced> {
    let category = (config_value(), web_filtering_action(), reputation_actions()).prop_map(
        |(name, action, reputation_action)| WebFilteringCategory {
            name,
            action,
            reputation_action,
        },
    );
    let fallback = (
        fallback_action(),
        fallback_action(),
        fallback_action(),
        fallback_action(),
    )
        .prop_map(|(default, server_connectivity, timeout, too_many_requests)| {
            FallbackSettings {
                default,
                server_connectivity,
                timeout,
                too_many_requests,
            }
        });
    (
        config_value(),
        vec(category, 0..3),
        prop::option::of(config_value()),
        prop::option::of(web_filtering_action()),
        prop::option::of(fallback),
        any::<bool>(),
        prop::option::of(config_value()),
        reputation_actions(),
        prop::option::of(1u32..=1800),
    )
        .prop_map(
            |(name, categories, block_message, default_action, fallback, no_safe_search, quarantine_message, reputation, timeout)| {
                UtmWebFilteringJuniperEnhanced {
                    name,
                    category: first_per_key(categories, |c| c.name.clone()),
                    custom_block_message: block_message,
                    default_action,
                    fallback_settings: non_default(fallback),
                    no_safe_search,
                    quarantine_custom_message: quarantine_message,
                    site_reputation_action: reputation,
                    timeout,
                }
            },
        )
}

/// Turn emitted statements into `display set relative` output for `path`.
fn relative_output(lines: &[String], path: &str) -> String {
    let prefix = format!("set {} ", path);
    let relative: Vec<String> = lines
        .iter()
        .map(|line| format!("set {}", line.strip_prefix(&prefix).unwrap_or(line)))
        .collect();
    let refs: Vec<&str> = relative.iter().map(String::as_str).collect();
    common::frame(&refs)
}

// ============================================================================
// Round trips
// ============================================================================

proptest! {
    #[test]
    fn chassis_redundancy_round_trip(redundancy in chassis_redundancy()) {
        let lines = redundancy.set_lines().unwrap();
        let raw = relative_output(&lines, "chassis redundancy");
        let decoded = ChassisRedundancy::from_config(&raw, "redundancy").unwrap().unwrap();
        prop_assert_eq!(decoded, redundancy);
    }

    #[test]
    fn switch_options_round_trip(options in switch_options()) {
        let lines = options.set_lines().unwrap();
        let raw = relative_output(&lines, "switch-options");
        let decoded = SwitchOptions::from_config(&raw, "switch_options").unwrap().unwrap();
        prop_assert_eq!(decoded, options);
    }

    #[test]
    fn snmp_round_trip(snmp in snmp()) {
        let lines = snmp.set_lines().unwrap();
        let raw = relative_output(&lines, "snmp");
        let decoded = Snmp::from_config(&raw, "snmp").unwrap().unwrap();
        prop_assert_eq!(decoded, snmp);
    }

    #[test]
    fn radius_server_round_trip(server in radius_server()) {
        let lines = server.set_lines().unwrap();
        let raw = relative_output(&lines, &format!("system radius-server {}", server.address));
        let decoded = RadiusServer::from_config(&raw, &server.address).unwrap().unwrap();
        prop_assert_eq!(decoded, server);
    }

    #[test]
    fn security_screen_round_trip(screen in security_screen()) {
        let lines = screen.set_lines().unwrap();
        let path = format!("security screen ids-option {}", quote(&screen.name));
        let raw = relative_output(&lines, &path);
        let decoded = SecurityScreen::from_config(&raw, &screen.name).unwrap().unwrap();
        prop_assert_eq!(decoded, screen);
    }

    #[test]
    fn security_policy_round_trip(policy in security_policy()) {
        let lines = policy.set_lines().unwrap();
        let path = format!(
            "security policies from-zone {} to-zone {}",
            policy.from_zone, policy.to_zone
        );
        let raw = relative_output(&lines, &path);
        let decoded = SecurityPolicy::from_config(&raw, &policy.id()).unwrap().unwrap();
        prop_assert_eq!(decoded, policy);
    }

    #[test]
    fn event_options_policy_round_trip(policy in event_options_policy()) {
        let lines = policy.set_lines().unwrap();
        let path = format!("event-options policy {}", quote(&policy.name));
        let raw = relative_output(&lines, &path);
        let decoded = EventOptionsPolicy::from_config(&raw, &policy.name).unwrap().unwrap();
        prop_assert_eq!(decoded, policy);
    }

    #[test]
    fn web_filtering_round_trip(profile in web_filtering()) {
        let lines = profile.set_lines().unwrap();
        let path = format!(
            "security utm feature-profile web-filtering juniper-enhanced profile {}",
            quote(&profile.name)
        );
        let raw = relative_output(&lines, &path);
        let decoded = UtmWebFilteringJuniperEnhanced::from_config(&raw, &profile.name)
            .unwrap()
            .unwrap();
        prop_assert_eq!(decoded, profile);
    }

    #[test]
    fn set_lines_deterministic(options in switch_options(), policy in event_options_policy()) {
        prop_assert_eq!(options.set_lines().unwrap(), options.set_lines().unwrap());
        prop_assert_eq!(policy.set_lines().unwrap(), policy.set_lines().unwrap());
    }

    #[test]
    fn cli_words_survive_quoting(words in vec(cli_word(), 1..6)) {
        prop_assert_eq!(split_words(&join_words(&words)), words);
    }
}

// ============================================================================
// Repeated keys
// ============================================================================

fn assert_duplicate(err: Error, key: &str) -> Result<(), TestCaseError> {
    prop_assert!(matches!(err, Error::DuplicateBlock { .. }), "unexpected error: {}", err);
    prop_assert!(err.to_string().contains(key), "{} does not name {}", err, key);
    Ok(())
}

proptest! {
    #[test]
    fn repeated_routing_engine_slot_is_rejected(
        slot in 0u8..=1,
        roles in prop::array::uniform2(prop::sample::select(vec!["master", "backup", "disabled"])),
    ) {
        let redundancy = ChassisRedundancy {
            routing_engine: vec![RoutingEngine::new(slot, roles[0]), RoutingEngine::new(slot, roles[1])],
            ..Default::default()
        };
        assert_duplicate(redundancy.set_lines().unwrap_err(), &format!("slot '{}'", slot))?;
    }

    #[test]
    fn repeated_policy_name_is_rejected(first in policy_rule(), second in policy_rule()) {
        let second = PolicyRule { name: first.name.clone(), ..second };
        let policy = SecurityPolicy {
            policy: vec![first.clone(), second],
            ..SecurityPolicy::new("trust", "untrust")
        };
        assert_duplicate(policy.set_lines().unwrap_err(), &format!("name '{}'", first.name))?;
    }

    #[test]
    fn repeated_within_interval_is_rejected(
        policy in event_options_policy(),
        first in policy_within(),
        second in policy_within(),
    ) {
        let second = PolicyWithin { time_interval: first.time_interval, ..second };
        let policy = EventOptionsPolicy { within: vec![first.clone(), second], ..policy };
        let key = format!("time_interval '{}'", first.time_interval);
        assert_duplicate(policy.set_lines().unwrap_err(), &key)?;
    }

    #[test]
    fn repeated_category_is_rejected(profile in web_filtering(), name in config_value()) {
        let category = |action: &str| WebFilteringCategory {
            name: name.clone(),
            action: action.to_string(),
            reputation_action: Vec::new(),
        };
        let profile = UtmWebFilteringJuniperEnhanced {
            category: vec![category("block"), category("permit")],
            ..profile
        };
        assert_duplicate(profile.set_lines().unwrap_err(), &format!("name '{}'", name))?;
    }

    #[test]
    fn repeated_whitelist_is_rejected(first in screen_whitelist(), second in screen_whitelist()) {
        let second = ScreenWhitelist { name: first.name.clone(), ..second };
        let screen = SecurityScreen {
            tcp: Some(ScreenTcp {
                syn_flood: Some(ScreenSynFlood {
                    whitelist: vec![first.clone(), second],
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..SecurityScreen::new("untrust")
        };
        assert_duplicate(screen.set_lines().unwrap_err(), &format!("name '{}'", first.name))?;
    }
}

// ============================================================================
// Decoder robustness
// ============================================================================

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

fn statement() -> impl Strategy<Value = String> {
    let keyword = prop::sample::select(vec![
        "routing-engine",
        "keepalive-time",
        "policy",
        "icmp",
        "ip ipv6-extension-header",
        "tcp syn-flood whitelist",
        "udp flood",
        "health-monitor",
        "category",
        "fallback-settings",
        "then event-script",
        "within",
        "attributes-match",
        "port",
        "vrf-target",
    ]);
    (keyword, vec(cli_word(), 0..4)).prop_map(|(keyword, words)| {
        format!("set {} {}", keyword, words.join(" "))
    })
}

proptest! {
    #[test]
    fn decoders_never_panic_on_arbitrary_text(raw in "\\PC{0,200}") {
        decode_all(&raw);
    }

    #[test]
    fn decoders_never_panic_on_near_miss_statements(lines in vec(statement(), 0..12)) {
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        decode_all(&common::frame(&refs));
    }
}
