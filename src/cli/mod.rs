//! CLI Module for ScaleLab
//!
//! Subcommands for:
//! - Running the simulation service
//! - One-off local simulations and traffic sweeps
//! - Managing configuration

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::VERSION;

/// ScaleLab: steady-state capacity simulator for distributed-system topologies
#[derive(Parser, Debug)]
#[command(name = "scalelab")]
#[command(version = VERSION)]
#[command(about = "Steady-state capacity simulator for small distributed-system topologies")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration file path (YAML, TOML, or JSON)
    #[arg(short, long, global = true, env = "SCALELAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SCALELAB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Enable JSON log output
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Quiet mode - suppress banner and non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the simulation service
    #[command(alias = "s")]
    Serve(ServeCommand),

    /// Evaluate a blueprint at one traffic level
    #[command(alias = "sim")]
    Simulate(SimulateCommand),

    /// Evaluate a blueprint across a range of traffic levels
    Sweep(SweepCommand),

    /// Configuration management
    #[command(alias = "cfg")]
    Config(ConfigCommand),

    /// Show version and build information
    Version,
}

/// Start the simulation service
#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SCALELAB_TIMEOUT")]
    pub timeout: Option<u64>,
}

/// Evaluate a blueprint at one traffic level
#[derive(Parser, Debug)]
pub struct SimulateCommand {
    /// Blueprint file (YAML, TOML, or JSON); the reference topology if omitted
    #[arg(short, long)]
    pub blueprint: Option<PathBuf>,

    /// Aggregate incoming requests per second
    #[arg(short, long, default_value = "1000")]
    pub traffic: f64,

    /// Fraction of traffic that is reads (0.0-1.0)
    #[arg(long)]
    pub read_ratio: Option<f64>,

    /// Fraction of reads served by the cache (0.0-1.0)
    #[arg(long)]
    pub cache_hit_ratio: Option<f64>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Evaluate a blueprint across a range of traffic levels
#[derive(Parser, Debug)]
pub struct SweepCommand {
    /// Blueprint file (YAML, TOML, or JSON); the reference topology if omitted
    #[arg(short, long)]
    pub blueprint: Option<PathBuf>,

    /// First traffic level (rps)
    #[arg(long, default_value = "1000")]
    pub start: f64,

    /// Last traffic level (rps), inclusive
    #[arg(long, default_value = "50000")]
    pub end: f64,

    /// Increment between levels (rps)
    #[arg(long, default_value = "1000")]
    pub step: f64,

    /// Fraction of traffic that is reads (0.0-1.0)
    #[arg(long)]
    pub read_ratio: Option<f64>,

    /// Fraction of reads served by the cache (0.0-1.0)
    #[arg(long)]
    pub cache_hit_ratio: Option<f64>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Configuration management
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output format (yaml, toml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        file: PathBuf,
    },

    /// Print a configuration file with every default filled in
    Generate {
        /// Output format (yaml, toml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
