//! reporter subcommand

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Subcommand};
use tracing::{info, Instrument};

use super::{SchemaVersion, DEFAULT_RECORD_DIR};
use crate::cluster::{connect, ApiGroup, KubeCluster};
use crate::config::http_timeout_from_env;
use crate::datastore::{DataStore, HttpStore, StdoutStore};
use crate::reporter::{FileReporterV1, FileReporterV2, RecordSource, Reporter};

/// Arguments for the reporter subcommand
#[derive(Args, Debug, Clone)]
pub struct ReporterArgs {
    /// Report destination
    #[command(subcommand)]
    pub command: ReporterCommand,
}

/// Report destinations
#[derive(Subcommand, Debug, Clone)]
pub enum ReporterCommand {
    /// Print the report to stdout
    Stdout(ReportArgs),
    /// POST the report to a collector
    Http(HttpReportArgs),
}

/// Arguments shared by every destination
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory (or single file) holding the records
    #[arg(long, env = "TELEMETRY_RECORD_DIR", default_value = DEFAULT_RECORD_DIR)]
    pub record_dir: PathBuf,

    /// UUID identifying this installation
    #[arg(long, env = "CLIENT_UUID")]
    pub client_uuid: String,

    /// Report schema
    #[arg(long, value_enum, default_value_t = SchemaVersion::V2)]
    pub report_version: SchemaVersion,
}

/// Arguments for the http destination
#[derive(Args, Debug, Clone)]
pub struct HttpReportArgs {
    /// Shared report arguments
    #[command(flatten)]
    pub report: ReportArgs,

    /// Collector endpoint
    #[arg(long, env = "TELEMETRY_REPORT_URL")]
    pub url: String,

    /// Request timeout in seconds (default: 30)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl HttpReportArgs {
    /// Effective request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(http_timeout_from_env)
    }
}

/// Execute the reporter command
pub async fn execute(args: &ReporterArgs, kubeconfig: Option<&Path>) -> Result<(), anyhow::Error> {
    let (report, store): (&ReportArgs, Arc<dyn DataStore>) = match &args.command {
        ReporterCommand::Stdout(report) => (report, Arc::new(StdoutStore::new())),
        ReporterCommand::Http(http) => {
            info!(url = %http.url, "Reporting over HTTP");
            let store = HttpStore::new(http.url.clone(), http.timeout())
                .context("failed to create HTTP client")?;
            (&http.report, Arc::new(store))
        }
    };

    let source = RecordSource::new(&report.record_dir).context("invalid record directory")?;

    let reporter: Box<dyn Reporter> = match report.report_version {
        SchemaVersion::V1 => {
            let client = connect(kubeconfig)
                .await
                .context("failed to create Kubernetes client")?;
            let api = Arc::new(KubeCluster::new(client, ApiGroup::Current));
            Box::new(FileReporterV1::new(
                source,
                report.client_uuid.clone(),
                api,
                store,
            ))
        }
        SchemaVersion::V2 => Box::new(FileReporterV2::new(
            source,
            report.client_uuid.clone(),
            store,
        )),
    };

    reporter
        .report()
        .instrument(tracing::info_span!("report"))
        .await
        .context("failed to send report")?;
    Ok(())
}
