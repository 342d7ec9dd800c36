//! Telemetry client
//!
//! Agents that collect anonymized records from a Kubernetes / Kubermatic
//! installation and a reporter that forwards the stored records.

#![warn(missing_docs)]

/// Record collection agents
pub mod agent;

/// Command-line interface
pub mod cli;

/// Kubernetes API access
pub mod cluster;

/// Environment variable helpers
pub mod config;

/// Record persistence backends
pub mod datastore;

/// Logging initialization
pub mod logging;

/// Record aggregation and forwarding
pub mod reporter;
