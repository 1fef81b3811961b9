use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cmd::commands::{plan_command, rename_command, tree_command};
use cmd::common::read_listing;

#[derive(Parser)]
#[command(name = "flatns")]
#[command(author, version, about = "Virtual folder tooling for flat object stores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the virtual folder tree from a key listing
    Tree {
        /// Tenant (owner) identifier
        #[arg(short, long)]
        tenant: String,
        /// Namespace bucket, e.g. "audio" or "vault"
        #[arg(short, long)]
        namespace: String,
        /// Listing file (one key per line); stdin if omitted
        file: Option<PathBuf>,
    },
    /// Print the rename plan for a folder prefix
    Plan {
        /// Full store path of the folder to rename
        #[arg(long)]
        old_prefix: String,
        /// New display name for the folder's final segment
        #[arg(long)]
        new_name: String,
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
        /// Listing file; stdin if omitted
        file: Option<PathBuf>,
    },
    /// Rehearse a rename against an in-memory copy of the listing
    Rename {
        /// Full store path of the folder to rename
        #[arg(long)]
        old_prefix: String,
        /// New display name for the folder's final segment
        #[arg(long)]
        new_name: String,
        /// Emit per-step results as JSON
        #[arg(long)]
        json: bool,
        /// Listing file; stdin if omitted
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init_diagnostics();
    let cli = Cli::parse();
    let mut print = |line: String| println!("{line}");

    match cli.command {
        Commands::Tree { tenant, namespace, file } => {
            let objects = read_listing(file.as_deref())?;
            tree_command(&objects, &tenant, &namespace, &mut print)
        }
        Commands::Plan { old_prefix, new_name, json, file } => {
            let objects = read_listing(file.as_deref())?;
            plan_command(&objects, &old_prefix, &new_name, json, &mut print)
        }
        Commands::Rename { old_prefix, new_name, json, file } => {
            let objects = read_listing(file.as_deref())?;
            rename_command(&objects, &old_prefix, &new_name, json, &mut print).await
        }
    }
}
