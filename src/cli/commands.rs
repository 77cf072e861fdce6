//! CLI Command Implementations

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::telemetry::{init_telemetry_to, LogTarget};
use crate::types::*;
use crate::{ScaleLabConfig, SimulationEngine, VERSION};

use super::{
    Cli, Commands, ConfigAction, ConfigCommand, ServeCommand, SimulateCommand, SweepCommand,
};

/// Execute the CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = if let Some(path) = &cli.config {
        let mut config = ScaleLabConfig::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        config
    } else {
        ScaleLabConfig::from_env()?
    };

    if let Some(level) = &cli.log_level {
        config.telemetry.log_level = level.clone();
    }
    if cli.json_logs {
        config.telemetry.json_logs = true;
    }

    match cli.command {
        Commands::Serve(cmd) => execute_serve(cmd, config, cli.quiet).await,
        Commands::Simulate(cmd) => execute_simulate(cmd, config),
        Commands::Sweep(cmd) => execute_sweep(cmd, config),
        Commands::Config(cmd) => execute_config(cmd, config),
        Commands::Version => execute_version(),
    }
}

/// Execute the serve command
async fn execute_serve(cmd: ServeCommand, mut config: ScaleLabConfig, quiet: bool) -> Result<()> {
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(timeout) = cmd.timeout {
        config.server.request_timeout = Duration::from_secs(timeout);
    }

    config.validate().context("Configuration validation failed")?;

    if !quiet {
        print_banner(&config);
    }

    crate::run_server(config).await
}

/// Execute the simulate command
fn execute_simulate(cmd: SimulateCommand, config: ScaleLabConfig) -> Result<()> {
    init_telemetry_to(&config.telemetry, LogTarget::Stderr)?;
    let blueprint = load_blueprint(cmd.blueprint.as_deref())?;
    let engine = SimulationEngine::new(config);

    let request = SimulateRequest {
        traffic_rps: cmd.traffic,
        read_ratio: cmd.read_ratio,
        cache_hit_ratio: cmd.cache_hit_ratio,
        blueprint,
    };
    let report = engine.simulate(&request)?;

    match cmd.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render_report(cmd.traffic, &report)),
    }
    Ok(())
}

/// Execute the sweep command
fn execute_sweep(cmd: SweepCommand, config: ScaleLabConfig) -> Result<()> {
    init_telemetry_to(&config.telemetry, LogTarget::Stderr)?;
    let blueprint = load_blueprint(cmd.blueprint.as_deref())?;
    let engine = SimulationEngine::new(config);

    let request = SweepRequest {
        start_rps: cmd.start,
        end_rps: cmd.end,
        step_rps: cmd.step,
        read_ratio: cmd.read_ratio,
        cache_hit_ratio: cmd.cache_hit_ratio,
        blueprint,
    };
    let report = engine.sweep(&request)?;

    match cmd.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render_sweep(&report)),
    }
    Ok(())
}

fn execute_config(cmd: ConfigCommand, config: ScaleLabConfig) -> Result<()> {
    match cmd.action {
        ConfigAction::Show { format } => {
            println!("{}", serialize_config(&config, &format)?);
            Ok(())
        }

        ConfigAction::Validate { file } => {
            let config = ScaleLabConfig::from_file(&file)?;
            println!("Configuration at {:?} is valid", file);
            println!("  Server:    {}:{}", config.server.host, config.server.port);
            println!("  Timeout:   {:?}", config.server.request_timeout);
            println!(
                "  Latency:   lb {} / app {} / db {} / cache {} ms",
                config.latency.load_balancer,
                config.latency.app_server,
                config.latency.database,
                config.latency.cache
            );
            println!(
                "  Traffic:   read {} / cache hit {}",
                config.traffic.read_ratio, config.traffic.cache_hit_ratio
            );
            Ok(())
        }

        ConfigAction::Generate { format, output, force } => {
            let content = serialize_config(&ScaleLabConfig::default(), &format)?;
            match output {
                Some(path) => write_new_file(&path, &content, force),
                None => {
                    println!("{}", content);
                    Ok(())
                }
            }
        }
    }
}

/// Execute the version command
fn execute_version() -> Result<()> {
    println!("scalelab {}", VERSION);
    println!();
    println!("Build Information:");
    println!("  Version:       {}", VERSION);
    println!("  Rust Version:  {}", env!("CARGO_PKG_RUST_VERSION"));
    Ok(())
}

// Helper functions

fn load_blueprint(path: Option<&Path>) -> Result<Blueprint> {
    match path {
        Some(path) => Blueprint::from_file(path)
            .with_context(|| format!("Failed to load blueprint {:?}", path)),
        None => Ok(Blueprint::reference()),
    }
}

fn serialize_config(config: &ScaleLabConfig, format: &str) -> Result<String> {
    Ok(match format {
        "toml" => toml::to_string_pretty(config)?,
        "json" => serde_json::to_string_pretty(config)?,
        _ => serde_yaml::to_string(config)?,
    })
}

fn write_new_file(path: &PathBuf, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("File {:?} already exists. Use --force to overwrite.", path);
    }
    std::fs::write(path, content)?;
    println!("Created configuration file: {:?}", path);
    Ok(())
}

/// Render a report as an aligned node table
pub fn render_report(traffic_rps: f64, report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Traffic:        {:.2} rps", traffic_rps);
    let _ = writeln!(out, "System status:  {}", report.system_status);
    let _ = writeln!(out, "Total latency:  {:.2} ms", report.total_latency);
    let _ = writeln!(out, "DB traffic:     {:.2} rps", report.db_traffic);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<12} {:<14} {:>12} {:>12} {:>8}  {}",
        "ID", "TYPE", "LOAD", "LATENCY", "ERRORS", "STATUS"
    );
    for node in &report.nodes {
        let _ = writeln!(
            out,
            "{:<12} {:<14} {:>12.2} {:>12.2} {:>8.3}  {}",
            node.id, node.node_type, node.load, node.latency, node.error_rate, node.status
        );
    }
    out
}

/// Render a sweep as one row per traffic level
pub fn render_sweep(report: &SweepReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "read_ratio {}  cache_hit_ratio {}",
        report.read_ratio, report.cache_hit_ratio
    );
    let _ = writeln!(
        out,
        "{:>12} {:>14} {:>12} {:>10}  {}",
        "RPS", "LATENCY_MS", "DB_RPS", "OVERLOAD", "STATUS"
    );
    for point in &report.points {
        let _ = writeln!(
            out,
            "{:>12.2} {:>14.2} {:>12.2} {:>10}  {}",
            point.traffic_rps,
            point.total_latency,
            point.db_traffic,
            point.overloaded_nodes,
            point.system_status
        );
    }
    match report.first_failure_rps {
        Some(rps) => {
            let _ = writeln!(out, "First failure at {:.2} rps", rps);
        }
        None => {
            let _ = writeln!(out, "No failure in range");
        }
    }
    out
}

fn print_banner(config: &ScaleLabConfig) {
    println!("ScaleLab v{}", VERSION);
    println!();
    println!("Configuration:");
    println!("  • Server:    {}:{}", config.server.host, config.server.port);
    println!("  • Timeout:   {:?}", config.server.request_timeout);
    println!(
        "  • Traffic:   read {} / cache hit {}",
        config.traffic.read_ratio, config.traffic.cache_hit_ratio
    );
    println!();
    println!("Endpoints:");
    println!("  • Simulate:  http://{}:{}/simulate", config.server.host, config.server.port);
    println!("  • Sweep:     http://{}:{}/simulate/sweep", config.server.host, config.server.port);
    println!("  • Health:    http://{}:{}/health", config.server.host, config.server.port);
    println!("  • Metrics:   http://{}:{}/metrics", config.server.host, config.server.port);
    println!();
}
