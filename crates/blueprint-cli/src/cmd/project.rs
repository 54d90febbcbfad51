use super::{project_id, Ctx};
use crate::output::{print_json, print_table, progress_bar};
use anyhow::Context;
use blueprint_core::action::{ActionHint, NextAction};
use blueprint_core::project::Project;
use blueprint_core::sequencer;
use blueprint_core::store::{ListOrdering, ListQuery, ProjectStore};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProjectSubcommand {
    /// Create a new draft project
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List your projects, most recently updated first
    List {
        /// Only projects whose name or description contains this text
        #[arg(long)]
        search: Option<String>,
        /// updated_at, -updated_at, status or -status
        #[arg(long, allow_hyphen_values = true)]
        ordering: Option<String>,
    },
    /// Show project details
    Show { id: String },
    /// Rename a project or change its description
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Empty string clears the description
        #[arg(long)]
        description: Option<String>,
    },
    /// Copy a project's answers into a new draft
    Duplicate { id: String },
    /// Delete a project
    Delete { id: String },
}

pub fn run(ctx: &Ctx<'_>, subcmd: ProjectSubcommand) -> anyhow::Result<()> {
    match subcmd {
        ProjectSubcommand::Create { name, description } => create(ctx, &name, description),
        ProjectSubcommand::List { search, ordering } => list(ctx, search, ordering.as_deref()),
        ProjectSubcommand::Show { id } => show(ctx, &id),
        ProjectSubcommand::Edit {
            id,
            name,
            description,
        } => edit(ctx, &id, name, description),
        ProjectSubcommand::Duplicate { id } => duplicate(ctx, &id),
        ProjectSubcommand::Delete { id } => delete(ctx, &id),
    }
}

fn create(ctx: &Ctx<'_>, name: &str, description: Option<String>) -> anyhow::Result<()> {
    let name = name.trim();
    anyhow::ensure!(!name.is_empty(), "project name must not be empty");

    let project = ctx
        .store()
        .create(ctx.owner, name, description)
        .with_context(|| format!("failed to create project '{name}'"))?;

    if ctx.json {
        print_json(&project)?;
        return Ok(());
    }
    println!("Created project: {} ({})", project.name, project.id);
    println!("Next: blueprint questions {}", project.id);
    Ok(())
}

fn list(ctx: &Ctx<'_>, search: Option<String>, ordering: Option<&str>) -> anyhow::Result<()> {
    let query = ListQuery {
        search,
        ordering: match ordering {
            Some(o) => o.parse()?,
            None => ListOrdering::default(),
        },
    };
    let projects = ctx
        .store()
        .query(ctx.owner, &query)
        .context("failed to list projects")?;

    if ctx.json {
        let summaries: Vec<_> = projects
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                    "status": p.status,
                    "phase": p.phase,
                    "progress_percent": sequencer::progress(&p.answers).percent,
                    "next_action": ActionHint::from(NextAction::for_project(p)),
                    "updated_at": p.updated_at,
                })
            })
            .collect();
        print_json(&summaries)?;
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.status.to_string(),
                format!("{}%", sequencer::progress(&p.answers).percent),
                p.name.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "PROGRESS", "NAME"], rows);
    Ok(())
}

fn show(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let uuid = project_id(id)?;
    let project = ctx
        .store()
        .load(&uuid, ctx.owner)
        .with_context(|| format!("failed to load project '{id}'"))?;

    if ctx.json {
        print_json(&project)?;
        return Ok(());
    }
    print_project(&project);
    Ok(())
}

fn edit(
    ctx: &Ctx<'_>,
    id: &str,
    name: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        name.is_some() || description.is_some(),
        "nothing to change: pass --name and/or --description"
    );
    let uuid = project_id(id)?;
    let project = ctx
        .store()
        .update_details(&uuid, ctx.owner, name, description)
        .with_context(|| format!("failed to update project '{id}'"))?;

    if ctx.json {
        print_json(&project)?;
        return Ok(());
    }
    println!("Updated project: {} ({})", project.name, project.id);
    Ok(())
}

fn print_project(p: &Project) {
    let progress = sequencer::progress(&p.answers);
    let action = NextAction::for_project(p);

    println!("Project:  {} ({})", p.name, p.id);
    if let Some(ref desc) = p.description {
        println!("Desc:     {desc}");
    }
    println!("Status:   {}", p.status.display_name());
    println!("Phase:    {} {}", p.phase.number(), p.phase.display_name());
    println!("Progress: {}", progress_bar(progress.percent));
    println!("Created:  {}", p.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated:  {}", p.updated_at.format("%Y-%m-%d %H:%M"));
    if p.blueprint.is_some() {
        println!("Blueprint: attached");
    }
    if p.documentation.is_some() {
        println!("Docs:      attached");
    }
    println!("\nNext: {}", action.label());
}

fn duplicate(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let uuid = project_id(id)?;
    let copy = ctx
        .store()
        .duplicate(&uuid, ctx.owner)
        .with_context(|| format!("failed to duplicate project '{id}'"))?;

    if ctx.json {
        print_json(&copy)?;
        return Ok(());
    }
    println!("Created project: {} ({})", copy.name, copy.id);
    Ok(())
}

fn delete(ctx: &Ctx<'_>, id: &str) -> anyhow::Result<()> {
    let uuid = project_id(id)?;
    ctx.store()
        .delete(&uuid, ctx.owner)
        .with_context(|| format!("failed to delete project '{id}'"))?;

    if ctx.json {
        print_json(&serde_json::json!({ "deleted": uuid }))?;
        return Ok(());
    }
    println!("Deleted project {uuid}");
    Ok(())
}
