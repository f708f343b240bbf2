//! Autohide CLI - inspect and simulate auto-hiding floating controls
//!
//! - `simulate`: replay a JSON scenario of host events against a control
//! - `targets`: print the resting positions for a given geometry
//! - `init`: write a default autohide.toml

mod config;
mod runner;
mod scenario;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autohide_core::{AnchorConfig, ContainerBounds, PositionCalculator};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::{AutohideConfig, CONFIG_FILE_NAME};
use crate::scenario::Scenario;

/// Inspect and simulate auto-hiding floating controls
#[derive(Parser, Debug)]
#[command(name = "autohide")]
#[command(about = "Inspect and simulate auto-hiding floating controls")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a scenario file against a control
    Simulate {
        /// Control configuration (autohide.toml or a directory containing it)
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print resting positions for a geometry
    Targets {
        #[arg(long, value_enum, default_value = "bottom")]
        edge: Edge,

        /// Element height in pixels
        #[arg(long)]
        height: i32,

        #[arg(long, default_value = "0")]
        margin: i32,

        #[arg(long, default_value = "0")]
        padding: i32,

        /// Container height in pixels
        #[arg(long)]
        container: i32,
    },

    /// Write a default autohide.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Edge {
    Top,
    Bottom,
}

impl From<Edge> for autohide_core::AnchorEdge {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => autohide_core::AnchorEdge::Top,
            Edge::Bottom => autohide_core::AnchorEdge::Bottom,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            scenario,
            json,
        } => cmd_simulate(&config, &scenario, json),
        Commands::Targets {
            edge,
            height,
            margin,
            padding,
            container,
        } => {
            let anchor = AnchorConfig::new(edge.into(), margin, padding);
            let targets = PositionCalculator::compute_targets(
                &anchor,
                height,
                &ContainerBounds::new(container, 0),
            );
            println!("shown_y  = {:.1}", targets.shown_y);
            println!("hidden_y = {:.1}", targets.hidden_y);
            Ok(())
        }
        Commands::Init { path } => cmd_init(&path),
    }
}

fn cmd_simulate(config_path: &Path, scenario_path: &Path, json: bool) -> Result<()> {
    let config = AutohideConfig::load_from_dir(config_path)?;
    let control = config
        .control_config()
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
    let scenario = Scenario::from_path(scenario_path)?;

    tracing::info!(
        "Replaying {} steps from {}",
        scenario.steps.len(),
        scenario_path.display()
    );

    let report = runner::run_scenario(control, config.scroll.stack_from_bottom, &scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for record in &report.steps {
        let y = record
            .y
            .map(|y| format!("{y:.1}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}  {:<22} {:<40} hidden={:<5} y={}",
            record.step_index,
            record.step,
            format!("{:?}", record.outcome),
            record.hidden,
            y
        );
    }
    println!("animated to: {:?}", report.animated_targets());
    println!(
        "final: hidden={} y={:?} shown_y={:?} hidden_y={:?} inset={:?}",
        report.hidden, report.final_y, report.shown_y, report.hidden_y, report.inset
    );
    Ok(())
}

fn cmd_init(path: &Path) -> Result<()> {
    let target = path.join(CONFIG_FILE_NAME);
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    fs::write(&target, AutohideConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!("Created {}", target.display());
    Ok(())
}
