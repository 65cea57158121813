//! Render commands - resource files to statements
//!
//! `render` prints the `set` statements of a resource file and
//! `delete-lines` prints the statements removing a resource. Neither touches
//! a device.

use super::{load_resource, resolve_id, CommandContext};
use crate::cli::{with_resource, ResourceKind};
use anyhow::Result;
use clap::Parser;
use junos_resources::resources::Resource;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Arguments for the render command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Resource type
    pub kind: ResourceKind,

    /// Resource file (YAML, or JSON with a .json extension)
    pub file: PathBuf,
}

/// Arguments for the delete-lines command
#[derive(Parser, Debug, Clone)]
pub struct DeleteLinesArgs {
    /// Resource type
    pub kind: ResourceKind,

    /// Resource identifier (optional for singletons)
    pub id: Option<String>,
}

/// Statements produced for one resource.
#[derive(Debug, Serialize)]
pub struct RenderedLines {
    /// Resource type name
    pub resource: &'static str,
    /// Resource identifier
    pub id: String,
    /// Statements, in emission order
    pub lines: Vec<String>,
}

impl RenderedLines {
    fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let rendered = with_resource!(self.kind, R => render::<R>(&self.file)?);
        ctx.emit(&rendered, || rendered.text())?;
        Ok(0)
    }
}

impl DeleteLinesArgs {
    /// Execute the delete-lines command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let rendered = with_resource!(self.kind, R => delete_lines::<R>(self.id.as_deref())?);
        ctx.emit(&rendered, || rendered.text())?;
        Ok(0)
    }
}

fn render<R: Resource>(path: &Path) -> Result<RenderedLines> {
    let resource: R = load_resource(path)?;
    Ok(RenderedLines {
        resource: R::TYPE_NAME,
        id: resource.id(),
        lines: resource.set_lines()?,
    })
}

fn delete_lines<R: Resource>(id: Option<&str>) -> Result<RenderedLines> {
    let id = resolve_id::<R>(id)?;
    Ok(RenderedLines {
        resource: R::TYPE_NAME,
        lines: R::delete_lines(&id)?,
        id,
    })
}
