//! CLI module for junos-resources
//!
//! This module provides the command-line interface, including argument
//! parsing and subcommand handling. Device-touching commands work against a
//! set-file: a text file of `set` statements loaded into a
//! [`MemoryDevice`](junos_resources::session::MemoryDevice) and written back
//! after a commit.

pub mod commands;
pub mod diff;

use clap::{Parser, Subcommand, ValueEnum};
use junos_resources::config::OutputFormat;
use std::path::PathBuf;

/// junos-resources - declarative Junos configuration resources
///
/// Render resources to `set` statements, parse device output back into
/// resources, and plan or apply changes against a set-file.
#[derive(Parser, Debug, Clone)]
#[command(name = "junos-resources")]
#[command(author = "junos-resources Contributors")]
#[command(version)]
#[command(about = "Declarative Junos configuration resources", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format (defaults to the configured one)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the set statements of a resource file
    Render(commands::render::RenderArgs),

    /// Print the statements removing a resource
    #[command(name = "delete-lines")]
    DeleteLines(commands::render::DeleteLinesArgs),

    /// Read `show configuration | display set relative` output into a resource
    Parse(commands::parse::ParseArgs),

    /// Show the set statements a resource file would change on a device
    Plan(commands::device::PlanArgs),

    /// Create or update a resource on a device
    Apply(commands::device::ApplyArgs),

    /// Remove a resource from a device
    Destroy(commands::device::DestroyArgs),
}

/// Resource types known to the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    /// junos_chassis_redundancy
    #[value(name = "junos_chassis_redundancy", alias = "chassis-redundancy")]
    ChassisRedundancy,
    /// junos_event_options_policy
    #[value(name = "junos_event_options_policy", alias = "event-options-policy")]
    EventOptionsPolicy,
    /// junos_security_policy
    #[value(name = "junos_security_policy", alias = "security-policy")]
    SecurityPolicy,
    /// junos_security_screen
    #[value(name = "junos_security_screen", alias = "security-screen")]
    SecurityScreen,
    /// junos_security_utm_profile_web_filtering_juniper_enhanced
    #[value(
        name = "junos_security_utm_profile_web_filtering_juniper_enhanced",
        alias = "web-filtering"
    )]
    WebFiltering,
    /// junos_snmp
    #[value(name = "junos_snmp", alias = "snmp")]
    Snmp,
    /// junos_switch_options
    #[value(name = "junos_switch_options", alias = "switch-options")]
    SwitchOptions,
    /// junos_system_radius_server
    #[value(name = "junos_system_radius_server", alias = "radius-server")]
    RadiusServer,
}

/// Run `$body` with `$r` bound to the resource type selected by `$kind`.
macro_rules! with_resource {
    ($kind:expr, $r:ident => $body:expr) => {{
        use junos_resources::resources::*;
        match $kind {
            $crate::cli::ResourceKind::ChassisRedundancy => {
                type $r = ChassisRedundancy;
                $body
            }
            $crate::cli::ResourceKind::EventOptionsPolicy => {
                type $r = EventOptionsPolicy;
                $body
            }
            $crate::cli::ResourceKind::SecurityPolicy => {
                type $r = SecurityPolicy;
                $body
            }
            $crate::cli::ResourceKind::SecurityScreen => {
                type $r = SecurityScreen;
                $body
            }
            $crate::cli::ResourceKind::WebFiltering => {
                type $r = UtmWebFilteringJuniperEnhanced;
                $body
            }
            $crate::cli::ResourceKind::Snmp => {
                type $r = Snmp;
                $body
            }
            $crate::cli::ResourceKind::SwitchOptions => {
                type $r = SwitchOptions;
                $body
            }
            $crate::cli::ResourceKind::RadiusServer => {
                type $r = RadiusServer;
                $body
            }
        }
    }};
}

pub(crate) use with_resource;

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}
