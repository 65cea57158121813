//! Parse command - device output to resource
//!
//! Reads a saved `show configuration <path> | display set relative` output
//! and prints the resource it describes.

use super::CommandContext;
use crate::cli::{with_resource, ResourceKind};
use anyhow::{Context, Result};
use clap::Parser;
use junos_resources::error::Error;
use junos_resources::resources::Resource;
use std::path::{Path, PathBuf};

/// Arguments for the parse command
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Resource type
    pub kind: ResourceKind,

    /// Resource identifier (the fixed id for singletons, e.g. `snmp`)
    pub id: String,

    /// File holding the device output
    pub file: PathBuf,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        with_resource!(self.kind, R => {
            let resource = parse::<R>(&self.id, &self.file)?;
            ctx.emit(&resource, || {
                serde_yaml::to_string(&resource)
                    .map(|yaml| yaml.trim_end().to_string())
                    .unwrap_or_default()
            })?;
        });
        Ok(0)
    }
}

fn parse<R: Resource>(id: &str, path: &Path) -> Result<R> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read device output {}", path.display()))?;
    let resource = R::from_config(&raw, id)?.ok_or_else(|| Error::not_found(R::TYPE_NAME, id))?;
    Ok(resource)
}
