//! CLI module for telemetry-client
//!
//! One subcommand per agent plus the reporter.

pub mod kubermatic_agent;
pub mod kubernetes_agent;
pub mod reporter;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Default directory agents write records to and the reporter reads from
pub const DEFAULT_RECORD_DIR: &str = "/records/";

/// Telemetry client - anonymized usage data for Kubernetes and Kubermatic
#[derive(Parser, Debug)]
#[command(name = "telemetry-client")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    TELEMETRY_RECORD_DIR          Record directory (default: /records/)
    CLIENT_UUID                   Client UUID sent with reports
    TELEMETRY_REPORT_URL          Report endpoint of `reporter http`
    TELEMETRY_LOG_FORMAT          Log format: json|console (old: LOG_FORMAT)
    TELEMETRY_LOG_DEBUG           Enable debug logs (old: DEBUG)
    TELEMETRY_HTTP_TIMEOUT_SECS   HTTP request timeout (old: HTTP_TIMEOUT_SECS)
    RUST_LOG                      Log filter, overrides the level flags
"#)]
pub struct Cli {
    /// Path to a kubeconfig file (default: in-cluster or ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, env = "TELEMETRY_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub log_debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect a record of the cluster's nodes
    KubernetesAgent(kubernetes_agent::KubernetesAgentArgs),
    /// Collect a record of a Kubermatic installation
    KubermaticAgent(kubermatic_agent::KubermaticAgentArgs),
    /// Bundle stored records into a report and send it
    Reporter(reporter::ReporterArgs),
}

/// Record / report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaVersion {
    /// v1
    V1,
    /// v2
    #[default]
    V2,
}
