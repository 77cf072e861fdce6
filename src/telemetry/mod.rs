//! Telemetry and observability module
//!
//! Provides:
//! - Structured logging with tracing
//! - Prometheus metrics

mod metrics;

pub use metrics::*;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;
use crate::error::{SimulationError, SimulatorResult};

/// Stream that log lines are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    /// Keeps stdout free for command output
    Stderr,
}

impl LogTarget {
    fn writer(self) -> BoxMakeWriter {
        match self {
            Self::Stdout => BoxMakeWriter::new(std::io::stdout),
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Initialize the telemetry subsystem, logging to stdout
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_telemetry(config: &TelemetryConfig) -> SimulatorResult<()> {
    init_telemetry_to(config, LogTarget::Stdout)
}

/// Initialize the telemetry subsystem, logging to `target`
pub fn init_telemetry_to(config: &TelemetryConfig, target: LogTarget) -> SimulatorResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter);

    let result = if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .with_writer(target.writer())
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(json_layer).try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(target.writer())
            .with_file(false)
            .with_line_number(false)
            .with_target(true)
            .compact();

        subscriber.with(fmt_layer).try_init()
    };

    result.map_err(|e| SimulationError::Internal(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(
        service = %config.service_name,
        version = %env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}
