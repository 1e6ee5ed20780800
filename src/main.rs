// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Skiroute CLI - longest-descent route planning for ski resorts

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use skiroute::commands;
use skiroute::commands::plan::PlanArgs;
use skiroute::planner::{PruneMode, StreakPolicy};
use skiroute::render::RenderFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skiroute")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "SKIROUTE_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Resort table (.toml or .json) instead of the built-in map
    #[arg(long, env = "SKIROUTE_RESORT", global = true)]
    resort: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the route with the most downhill distance
    Plan {
        /// Start location
        #[arg(short, long)]
        start: Option<String>,

        /// Time budget in minutes
        #[arg(short, long)]
        budget: Option<f64>,

        /// Distance (km) after which a route stops being extended
        #[arg(short, long)]
        target: Option<f64>,

        /// Dominance key used for pruning
        #[arg(long, value_enum)]
        prune: Option<PruneMode>,

        /// Which runs count towards the consecutive-use cap
        #[arg(long, value_enum)]
        policy: Option<StreakPolicy>,

        /// Maximum consecutive uses of one run name
        #[arg(long)]
        max_streak: Option<u32>,

        /// Segment size (km) for the printed breakdown
        #[arg(long)]
        segment_km: Option<f64>,
    },

    /// Draw the resort graph
    Render {
        /// Output format
        #[arg(short, long, value_enum, default_value = "dot")]
        format: RenderFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// List locations and their outgoing runs
    Locations,

    /// Show the effective configuration
    Config {
        /// Print only the default configuration file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = skiroute::config::load(cli.config.as_deref())?;
    if let Some(resort) = cli.resort {
        config.resort_file = Some(resort);
    }
    let color = !cli.no_color && !cli.json;

    // Execute command
    match cli.command {
        Commands::Plan {
            start,
            budget,
            target,
            prune,
            policy,
            max_streak,
            segment_km,
        } => commands::plan::run(
            &config,
            PlanArgs {
                start,
                budget,
                target,
                prune,
                policy,
                max_streak,
                segment_km,
            },
            cli.json,
            color,
        ),
        Commands::Render { format, output } => commands::render::run(&config, format, output),
        Commands::Locations => commands::locations::run(&config, cli.json, color),
        Commands::Config { path } => commands::config::run(&config, path),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
