mod cmd;
mod output;

use achievements_core::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use cmd::create::CreateArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "achievements",
    about = "Create, localize, list and delete Game Center achievements from JSON batch files",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON config file with appId and token (env overrides: ASC_APP_ID, ASC_TOKEN, ASC_API_BASE)
    #[arg(long, global = true, env = "ACHIEVEMENTS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log each remote call and outcome
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create every achievement in a batch file, adopting ones that already exist
    CreateBatch {
        /// Path to the batch JSON file
        path: PathBuf,
    },

    /// Create a single achievement with one localization
    Create(CreateArgs),

    /// List remote achievements (first 200 only)
    List,

    /// Delete one achievement by its remote id
    Delete {
        /// Remote achievement id
        id: String,
    },

    /// Delete every listed achievement after confirmation
    DeleteAll {
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Check a batch file offline without touching the remote
    Validate {
        /// Path to the batch JSON file
        path: PathBuf,
    },

    /// Print accepted locales and the aliases rewritten into them
    Locales,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_path();

    let result = match cli.command {
        Commands::CreateBatch { path } => cmd::create_batch::run(config, &path, cli.json),
        Commands::Create(args) => cmd::create::run(config, args, cli.json),
        Commands::List => cmd::list::run(config, cli.json),
        Commands::Delete { id } => cmd::delete::run_one(config, &id, cli.json),
        Commands::DeleteAll { yes } => cmd::delete::run_all(config, yes, cli.json),
        Commands::Validate { path } => cmd::validate::run(&path, cli.json),
        Commands::Locales => cmd::locales::run(cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
