//! iterthought CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config file
//! - `ask`     — Run one refinement strategy against a query
//! - `demo`    — Run both strategies against the built-in example query

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "iterthought",
    about = "iterthought — iterative refinement over a local generative backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Onboard,

    /// Run one refinement strategy against a query
    Ask {
        /// The question to answer
        query: String,

        /// Which iteration strategy to run
        #[arg(short, long, value_enum, default_value_t = Mode::Autonomous)]
        mode: Mode,

        /// Override the autonomous iteration cap
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Override the guided round count
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Run both strategies against the built-in example query
    Demo,
}

/// The two iteration-control strategies.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Mode {
    /// The model decides when to stop (bounded by max-iterations)
    Autonomous,
    /// Fixed round count plus a forced final-answer round
    Guided,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run()?,
        Commands::Ask {
            query,
            mode,
            max_iterations,
            iterations,
        } => commands::ask::run(&query, mode, max_iterations, iterations).await?,
        Commands::Demo => commands::demo::run().await?,
    }

    Ok(())
}
