//! Configuration module for ScaleLab
//!
//! Provides hierarchical configuration with support for:
//! - YAML/TOML/JSON config files
//! - Environment variable overrides
//! - Validation

mod cors;
mod latency;
mod traffic;

pub use cors::CorsConfig;
pub use latency::BaseLatencyTable;
pub use traffic::TrafficDefaults;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use crate::error::{SimulationError, SimulatorResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLabConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Base latency per node type
    pub latency: BaseLatencyTable,
    /// Traffic mix applied when a request omits it
    pub traffic: TrafficDefaults,
    /// Telemetry settings
    pub telemetry: TelemetryConfig,
}

impl ScaleLabConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimulatorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| SimulationError::Config(format!("YAML parse error: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| SimulationError::Config(format!("TOML parse error: {}", e)))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| SimulationError::Config(format!("JSON parse error: {}", e)))?,
            _ => return Err(SimulationError::Config(
                "Unsupported config file format. Use .yaml, .toml, or .json".to_string()
            )),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn from_env() -> SimulatorResult<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SCALELAB_*` overrides resolved through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SimulatorResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("SCALELAB_PORT") {
            self.server.port = port.parse().map_err(|_| {
                SimulationError::Config("Invalid port number".to_string())
            })?;
        }

        if let Some(host) = lookup("SCALELAB_HOST") {
            self.server.host = host;
        }

        if let Some(ratio) = lookup("SCALELAB_READ_RATIO") {
            self.traffic.read_ratio = ratio.parse().map_err(|_| {
                SimulationError::Config("Invalid read ratio".to_string())
            })?;
        }

        if let Some(ratio) = lookup("SCALELAB_CACHE_HIT_RATIO") {
            self.traffic.cache_hit_ratio = ratio.parse().map_err(|_| {
                SimulationError::Config("Invalid cache hit ratio".to_string())
            })?;
        }

        if let Some(val) = lookup("SCALELAB_JSON_LOGS") {
            self.telemetry.json_logs = val.parse().map_err(|_| {
                SimulationError::Config(format!("Invalid SCALELAB_JSON_LOGS value: {}", val))
            })?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> SimulatorResult<()> {
        self.server.validate()?;
        self.latency.validate()?;
        self.traffic.validate()?;
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Upper bound on traffic levels evaluated by one sweep
    pub max_sweep_points: usize,
    /// Enable request logging
    pub request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout: Duration::from_secs(30),
            max_sweep_points: 1000,
            request_logging: true,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> SimulatorResult<()> {
        if self.port == 0 {
            return Err(SimulationError::Validation {
                message: "Port cannot be 0".to_string(),
                param: Some("server.port".to_string()),
            });
        }
        if self.max_sweep_points == 0 {
            return Err(SimulationError::Validation {
                message: "max_sweep_points must be greater than 0".to_string(),
                param: Some("server.max_sweep_points".to_string()),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(SimulationError::Validation {
                message: "request_timeout must be greater than 0".to_string(),
                param: Some("server.request_timeout".to_string()),
            });
        }
        Ok(())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SimulatorResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| SimulationError::Config(format!("Invalid socket address: {}", e)))
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable telemetry
    pub enabled: bool,
    /// Log level
    pub log_level: String,
    /// Enable JSON logging
    pub json_logs: bool,
    /// Service name attached to log output
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "scalelab".to_string(),
        }
    }
}

/// Helper module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, String> {
        let s = s.trim();
        // "ms" must be checked before the bare "m" and "s" suffixes.
        if let Some(millis) = s.strip_suffix("ms") {
            millis.trim().parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| format!("Invalid duration: {}", s))
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim().parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| format!("Invalid duration: {}", s))
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim().parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| format!("Invalid duration: {}", s))
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| format!("Invalid duration: {}", s))
        }
    }
}
