use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "riskreg")]
#[command(about = "Risk register - CRUD API and CSV bulk import for risk entries")]
#[command(version)]
struct Cli {
    /// Working directory for config lookup and relative db paths (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .riskreg/config.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API until Ctrl-C
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database file (overrides config)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Import risks from a CSV file into the database
    Import {
        /// CSV file with a header row and 13 columns per row
        file: PathBuf,

        /// Validate only, do not insert anything
        #[arg(long)]
        dry_run: bool,

        /// Print created records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored risks
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new .riskreg/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Serve { port, db }) => {
            cli::serve::serve_command(&work_dir, config_path, port, db).await?;
        }
        Some(Commands::Import {
            file,
            dry_run,
            json,
        }) => {
            cli::import::import_command(&work_dir, config_path, &file, dry_run, json)?;
        }
        Some(Commands::List { json }) => {
            cli::list::list_command(&work_dir, config_path, json)?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, force)?;
        }
        None => {
            // Default: serve with config values
            cli::serve::serve_command(&work_dir, config_path, None, None).await?;
        }
    }

    Ok(())
}
