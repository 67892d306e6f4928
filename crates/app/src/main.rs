//! SlotWatch - appointment slot watcher
//!
//! Command-line entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use slotwatch_app::commands::{execute_run, execute_status, render_report, render_status};
use slotwatch_app::utils::logging::init_tracing;
use slotwatch_app::{AppContext, ContextOptions};

#[derive(Parser)]
#[command(name = "slotwatch", version, about = "Watch a booking calendar for new appointment slots")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Observe the calendar once, remember it, and notify if warranted
    Run {
        /// Config file (JSON or TOML); defaults to env vars, then probed files
        #[arg(long)]
        config: Option<PathBuf>,
        /// Report locally even when delivery is configured
        #[arg(long)]
        no_deliver: bool,
    },

    /// Show the slots remembered by the last run
    Status {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before logging reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "env.loaded"),
        Err(e) => tracing::debug!(error = %e, "env.not_loaded"),
    }

    let cli = Cli::parse();

    match cli.cmd {
        Command::Run { config, no_deliver } => {
            let config = AppContext::load_config(config)?;
            let context = AppContext::new(config, ContextOptions { deliver: !no_deliver })?;
            let report = execute_run(&context).await?;
            println!("{}", render_report(&report));
        }
        Command::Status { config } => {
            let config = AppContext::load_config(config)?;
            let slots = execute_status(&config)?;
            println!("{}", render_status(&config, &slots));
        }
    }

    Ok(())
}
