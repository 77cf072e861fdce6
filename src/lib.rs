//! # ScaleLab
//!
//! Steady-state capacity simulator for small distributed-system topologies.
//!
//! A caller describes a topology of load balancers, application servers,
//! caches, and databases, picks an aggregate request rate and a read/cache
//! mix, and gets back a per-node snapshot (load, latency, error rate,
//! health) plus a system verdict. The system fails when any database is
//! overloaded.
//!
//! ## Quick Start
//!
//! ```rust
//! use scalelab::{SimulationEngine, types::{Blueprint, SimulateRequest, SystemStatus}};
//!
//! let engine = SimulationEngine::default();
//! let report = engine
//!     .simulate(&SimulateRequest::new(1_000.0, Blueprint::reference()))
//!     .unwrap();
//! assert_eq!(report.system_status, SystemStatus::Running);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod node;
pub mod server;
pub mod telemetry;
pub mod types;

pub use config::ScaleLabConfig;
pub use engine::{SimulationEngine, Topology};
pub use error::{SimulationError, SimulatorResult};
pub use server::run_server;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;
