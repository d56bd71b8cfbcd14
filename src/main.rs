mod cli;
mod config;
mod logging;
mod render;
mod store;
mod web;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "review-board")]
#[command(about = "Dashboard and JSON API for automated pull request review results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (layered over user and project config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Also write logs to the default log directory
    #[arg(long, global = true)]
    log: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTML dashboard
    Dashboard {
        /// Address to listen on (overrides [dashboard] bind)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Serve the JSON API
    Api {
        /// Address to listen on (overrides [api] bind)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Create the review tables in the configured database
    InitDb,

    /// Check database tables and dashboard templates
    Check,
}

impl Commands {
    fn log_name(&self) -> &'static str {
        match self {
            Commands::Dashboard { .. } => "dashboard",
            Commands::Api { .. } => "api",
            Commands::InitDb | Commands::Check => "cli",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let log_file = match args.log_file {
        Some(path) => Some(path),
        None if args.log => Some(logging::default_log_path(args.command.log_name())?),
        None => None,
    };
    let log_guard = logging::init_logging(args.debug, args.quiet, log_file)?;

    let config = config::ReviewBoardConfig::load(args.config.as_deref())?;

    match args.command {
        Commands::Dashboard { bind } => cli::serve_dashboard(config, bind).await?,

        Commands::Api { bind } => cli::serve_api(config, bind).await?,

        Commands::InitDb => cli::init_db(&config)?,

        Commands::Check => {
            let code = cli::check(&config)?;
            if code != 0 {
                drop(log_guard);
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
