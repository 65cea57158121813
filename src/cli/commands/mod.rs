//! Subcommands module for the junos-resources CLI
//!
//! This module contains all the subcommand implementations and the helpers
//! they share for reading resource files, set-files and printing results.

pub mod device;
pub mod parse;
pub mod render;

use anyhow::{anyhow, Context, Result};
use junos_resources::config::{Config, OutputFormat};
use junos_resources::resources::Resource;
use junos_resources::session::MemoryDevice;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Effective output format
    pub output: OutputFormat,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let output = cli.output.unwrap_or(config.output.format);
        Self { config, output }
    }

    /// Print `value` in the selected format; `text` renders the plain form.
    pub fn emit<T, F>(&self, value: &T, text: F) -> Result<()>
    where
        T: Serialize,
        F: FnOnce() -> String,
    {
        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
            OutputFormat::Text => {
                let text = text();
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
        }
        Ok(())
    }
}

/// Load a resource model from a YAML or JSON file (by extension).
pub fn load_resource<R: Resource>(path: &Path) -> Result<R> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read resource file {}", path.display()))?;

    let resource = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("invalid {} in {}", R::TYPE_NAME, path.display()))?,
        _ => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid {} in {}", R::TYPE_NAME, path.display()))?,
    };
    debug!(resource = R::TYPE_NAME, path = %path.display(), "loaded resource file");
    Ok(resource)
}

/// Identifier given on the command line, or the fixed one of a singleton.
pub fn resolve_id<R: Resource>(id: Option<&str>) -> Result<String> {
    match id {
        Some(id) => Ok(id.to_string()),
        None if R::SINGLETON => Ok(R::default().id()),
        None => Err(anyhow!("an identifier is required for {}", R::TYPE_NAME)),
    }
}

/// Load a set-file into a device. A missing file is an empty device.
pub fn load_device(path: &Path) -> Result<MemoryDevice> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("device")
        .to_string();

    if !path.exists() {
        return Ok(MemoryDevice::new(name));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read set-file {}", path.display()))?;
    Ok(MemoryDevice::from_set_text(name, &content))
}

/// Write the running configuration of `device` back to its set-file.
pub fn save_device(device: &MemoryDevice, path: &Path) -> Result<()> {
    let mut content = device.running_config();
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write set-file {}", path.display()))
}
