mod cmd;
mod output;
mod project_file;

use clap::{Parser, Subcommand};
use cmd::edit::ActionArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "actions",
    about = "Edit and encode the transmit actions stored in a project file",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project file holding the actions
    #[arg(long, global = true, env = "ACTIONS_PROJECT", default_value = "project.json")]
    project: PathBuf,

    /// Tool configuration (defaults for new actions)
    #[arg(long, global = true, env = "ACTIONS_CONFIG", default_value = "actions.yaml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the actions in the project
    List,

    /// Show every field of an action and its encoded payload
    Show { id: i32 },

    /// Print the bytes an action transmits
    Encode {
        id: i32,
        /// Write the raw bytes to stdout instead of a hex dump
        #[arg(long)]
        raw: bool,
    },

    /// Add a new action
    Add {
        #[command(flatten)]
        fields: ActionArgs,
    },

    /// Change fields of an existing action
    Edit {
        id: i32,
        #[command(flatten)]
        fields: ActionArgs,
    },

    /// Remove an action
    Remove { id: i32 },

    /// Print the persisted record of an action
    Export { id: i32 },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let project = cli.project.as_path();

    let result = match cli.command {
        Commands::List => cmd::list::run(project, cli.json),
        Commands::Show { id } => cmd::show::run(project, id, cli.json),
        Commands::Encode { id, raw } => cmd::encode::run(project, id, raw, cli.json),
        Commands::Add { fields } => cmd::edit::add(project, &cli.config, fields, cli.json),
        Commands::Edit { id, fields } => cmd::edit::edit(project, id, fields, cli.json),
        Commands::Remove { id } => cmd::edit::remove(project, id, cli.json),
        Commands::Export { id } => cmd::export::run(project, id),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
