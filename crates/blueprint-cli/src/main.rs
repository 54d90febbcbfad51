mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::project::ProjectSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "blueprint",
    about = "Guided project planning: answer five stages of questions, lock the requirements, attach a blueprint",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root (default: auto-detect from .blueprint/)
    #[arg(long, global = true, env = "BLUEPRINT_ROOT")]
    root: Option<PathBuf>,

    /// Act as this owner (default: config default_owner)
    #[arg(long, global = true, env = "BLUEPRINT_OWNER")]
    owner: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a blueprint workspace in the current directory
    Init,

    /// Create, list, copy and delete projects
    Project {
        #[command(subcommand)]
        subcommand: ProjectSubcommand,
    },

    /// Show wizard progress for a project
    State { id: String },

    /// Show the questions for the stage to answer next
    Questions { id: String },

    /// Record the answers for one stage
    Answer {
        id: String,
        /// intent | platform | ui_ux | tech_stack | quality
        stage: String,
        /// Answers as a JSON object, e.g. '{"app_type": "taxi app"}'
        #[arg(long)]
        data: Option<String>,
        /// A single answer as question=value (repeatable)
        #[arg(long = "set", value_name = "QUESTION=VALUE")]
        set: Vec<String>,
    },

    /// Show every stage's answers
    Summary { id: String },

    /// Lock the requirements once every stage is answered
    Lock { id: String },

    /// Attach model output as the project's blueprint (repaired if truncated)
    AttachBlueprint { id: String, file: PathBuf },

    /// Attach Markdown documentation to a project with a blueprint
    AttachDocs { id: String, file: PathBuf },

    /// Print the question catalog
    Catalog,

    /// Serve the HTTP API
    Ui {
        /// Port to listen on (default: config server.port; 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let owner = root::resolve_owner(&root, cli.owner.as_deref());
    let ctx = cmd::Ctx {
        root: &root,
        owner: &owner,
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.owner.as_deref()),
        Commands::Project { subcommand } => cmd::project::run(&ctx, subcommand),
        Commands::State { id } => cmd::flow::state(&ctx, &id),
        Commands::Questions { id } => cmd::flow::questions(&ctx, &id),
        Commands::Answer {
            id,
            stage,
            data,
            set,
        } => cmd::flow::answer(&ctx, &id, &stage, data.as_deref(), &set),
        Commands::Summary { id } => cmd::flow::summary(&ctx, &id),
        Commands::Lock { id } => cmd::flow::lock(&ctx, &id),
        Commands::AttachBlueprint { id, file } => cmd::artifact::attach_blueprint(&ctx, &id, &file),
        Commands::AttachDocs { id, file } => cmd::artifact::attach_docs(&ctx, &id, &file),
        Commands::Catalog => cmd::catalog::run(cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&root, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
