use super::{project_id, Ctx};
use crate::output::print_json;
use anyhow::Context;
use blueprint_core::artifact;
use std::path::Path;

pub fn attach_blueprint(ctx: &Ctx<'_>, id: &str, file: &Path) -> anyhow::Result<()> {
    let uuid = project_id(id)?;
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let project = artifact::record_raw_blueprint(&ctx.store(), &uuid, ctx.owner, &raw)
        .with_context(|| format!("failed to attach blueprint to '{id}'"))?;

    if ctx.json {
        print_json(&project)?;
        return Ok(());
    }
    println!(
        "Blueprint attached. Phase {}: {}",
        project.phase.number(),
        project.phase.display_name()
    );
    Ok(())
}

pub fn attach_docs(ctx: &Ctx<'_>, id: &str, file: &Path) -> anyhow::Result<()> {
    let uuid = project_id(id)?;
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let project = artifact::record_documentation(&ctx.store(), &uuid, ctx.owner, &markdown)
        .with_context(|| format!("failed to attach documentation to '{id}'"))?;

    if ctx.json {
        print_json(&project)?;
        return Ok(());
    }
    println!("Documentation attached to {}.", project.name);
    Ok(())
}
