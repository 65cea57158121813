//! Device commands - plan, apply and destroy against a set-file
//!
//! The set-file is loaded into a [`MemoryDevice`], the change goes through a
//! [`Provider`] exactly as it would on a live session, and the committed
//! configuration is written back to the file.

use super::{load_device, load_resource, resolve_id, save_device, CommandContext};
use crate::cli::diff::{unified, DiffSummary};
use crate::cli::{with_resource, ResourceKind};
use anyhow::Result;
use clap::Parser;
use junos_resources::config::SessionSettings;
use junos_resources::provider::Provider;
use junos_resources::resources::Resource;
use junos_resources::session::MemoryDevice;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the plan command
#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    /// Resource type
    pub kind: ResourceKind,

    /// Resource file (YAML, or JSON with a .json extension)
    pub file: PathBuf,

    /// Set-file holding the device configuration
    #[arg(long, short = 'd')]
    pub device: PathBuf,

    /// Context lines around each change
    #[arg(long, default_value = "3")]
    pub context: usize,
}

/// Arguments for the apply command
#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    /// Resource type
    pub kind: ResourceKind,

    /// Resource file (YAML, or JSON with a .json extension)
    pub file: PathBuf,

    /// Set-file holding the device configuration
    #[arg(long, short = 'd')]
    pub device: PathBuf,
}

/// Arguments for the destroy command
#[derive(Parser, Debug, Clone)]
pub struct DestroyArgs {
    /// Resource type
    pub kind: ResourceKind,

    /// Resource identifier (optional for singletons)
    pub id: Option<String>,

    /// Set-file holding the device configuration
    #[arg(long, short = 'd')]
    pub device: PathBuf,
}

/// Result of `plan`.
#[derive(Debug, Serialize)]
pub struct PlanOutcome {
    /// Resource type name
    pub resource: &'static str,
    /// Resource identifier
    pub id: String,
    /// Changed statement counts
    pub summary: DiffSummary,
    /// Unified diff of device statements against desired ones
    pub diff: String,
}

/// Result of `apply` and `destroy`.
#[derive(Debug, Serialize)]
pub struct ChangeOutcome {
    /// Resource type name
    pub resource: &'static str,
    /// Resource identifier
    pub id: String,
    /// `created`, `updated` or `deleted`
    pub action: &'static str,
    /// Statements the device holds for the resource afterwards
    pub lines: Vec<String>,
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let settings = ctx.config.session.clone();
        let outcome = with_resource!(self.kind, R => {
            plan::<R>(&self.file, load_device(&self.device)?, settings, self.context).await?
        });
        ctx.emit(&outcome, || {
            if outcome.summary.has_changes() {
                outcome.diff.trim_end().to_string()
            } else {
                "No changes.".to_string()
            }
        })?;
        Ok(0)
    }
}

impl ApplyArgs {
    /// Execute the apply command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let settings = ctx.config.session.clone();
        let (outcome, device) = with_resource!(self.kind, R => {
            apply::<R>(&self.file, load_device(&self.device)?, settings).await?
        });
        save_device(&device, &self.device)?;
        ctx.emit(&outcome, || {
            format!("{} {} '{}'", outcome.action, outcome.resource, outcome.id)
        })?;
        Ok(0)
    }
}

impl DestroyArgs {
    /// Execute the destroy command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let settings = ctx.config.session.clone();
        let (outcome, device) = with_resource!(self.kind, R => {
            destroy::<R>(self.id.as_deref(), load_device(&self.device)?, settings).await?
        });
        save_device(&device, &self.device)?;
        ctx.emit(&outcome, || {
            format!("{} {} '{}'", outcome.action, outcome.resource, outcome.id)
        })?;
        Ok(0)
    }
}

async fn plan<R: Resource>(
    path: &Path,
    device: MemoryDevice,
    settings: SessionSettings,
    context: usize,
) -> Result<PlanOutcome> {
    let desired: R = load_resource(path)?;
    let desired_lines = desired.set_lines()?;
    let id = desired.id();

    let mut provider = Provider::new(device, settings);
    let current_lines = match provider.read::<R>(&id).await? {
        Some(current) => current.build_lines()?,
        None => Vec::new(),
    };

    Ok(PlanOutcome {
        resource: R::TYPE_NAME,
        summary: DiffSummary::between(&current_lines, &desired_lines),
        diff: unified(&current_lines, &desired_lines, "device", "desired", context),
        id,
    })
}

async fn apply<R: Resource>(
    path: &Path,
    device: MemoryDevice,
    settings: SessionSettings,
) -> Result<(ChangeOutcome, MemoryDevice)> {
    let desired: R = load_resource(path)?;
    let id = desired.id();

    let mut provider = Provider::new(device, settings);
    let exists = R::SINGLETON || provider.read::<R>(&id).await?.is_some();

    let (action, applied) = if exists {
        ("updated", provider.update(&desired).await?)
    } else {
        ("created", provider.create(&desired).await?)
    };
    info!(resource = R::TYPE_NAME, id = %id, action, "resource applied");

    let outcome = ChangeOutcome {
        resource: R::TYPE_NAME,
        lines: applied.build_lines()?,
        action,
        id,
    };
    Ok((outcome, provider.into_session()))
}

async fn destroy<R: Resource>(
    id: Option<&str>,
    device: MemoryDevice,
    settings: SessionSettings,
) -> Result<(ChangeOutcome, MemoryDevice)> {
    let id = resolve_id::<R>(id)?;

    let mut provider = Provider::new(device, settings);
    provider.import::<R>(&id).await?;
    provider.delete::<R>(&id).await?;
    info!(resource = R::TYPE_NAME, id = %id, "resource destroyed");

    let outcome = ChangeOutcome {
        resource: R::TYPE_NAME,
        action: "deleted",
        lines: Vec::new(),
        id,
    };
    Ok((outcome, provider.into_session()))
}
