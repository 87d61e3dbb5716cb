use anyhow::Context;
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use viewport_memory::commands::*;
use viewport_memory::core::{print_error, Storage};

#[derive(Parser)]
#[command(name = "viewport-memory")]
#[command(about = "Inspect and manage remembered scroll and selection state")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Workspace whose history to manage (defaults to the current directory)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Use this storage directory instead of the per-workspace default
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show remembered files, most recent first
    List,
    /// Forget remembered files by number (e.g., "1 3-5,8")
    Forget {
        /// Numbers from `list`
        indices: Vec<String>,
    },
    /// Drop the oldest files beyond the configured limit
    Prune,
    /// Forget every remembered file
    Clear,
    /// Show or change settings
    Config {
        /// Number of files to remember (0 or less keeps every file)
        #[arg(long, allow_negative_numbers = true)]
        max_files: Option<i64>,
        /// Whether remembered states are saved between sessions (true/false)
        #[arg(long)]
        persist: Option<String>,
    },
}

fn resolve_storage(cli: &Cli) -> anyhow::Result<Storage> {
    if let Some(dir) = &cli.storage {
        return Ok(Storage::at(dir));
    }
    let workspace = match &cli.workspace {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Could not determine the current directory")?,
    };
    let workspace = workspace.canonicalize().unwrap_or(workspace);
    Storage::for_workspace(&workspace)
        .with_context(|| format!("Could not locate storage for {}", workspace.display()))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let storage = resolve_storage(&cli)?;
    log::debug!("Using storage directory {}", storage.dir().display());

    match cli.command {
        Commands::List => execute_list(&storage)?,
        Commands::Forget { indices } => execute_forget(&storage, indices)?,
        Commands::Prune => {
            execute_prune(&storage)?;
        }
        Commands::Clear => execute_clear(&storage)?,
        Commands::Config { max_files, persist } => execute_config(&storage, max_files, persist)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
