//! kubernetes-agent subcommand

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::Instrument;

use super::DEFAULT_RECORD_DIR;
use crate::agent::{Agent, KubernetesAgent};
use crate::cluster::{connect, ApiGroup, KubeCluster};
use crate::datastore::FileStore;

/// Arguments for the kubernetes-agent subcommand
#[derive(Args, Debug, Clone)]
pub struct KubernetesAgentArgs {
    /// Directory the record is written to
    #[arg(long, env = "TELEMETRY_RECORD_DIR", default_value = DEFAULT_RECORD_DIR)]
    pub record_dir: PathBuf,
}

/// Execute the kubernetes-agent command
pub async fn execute(
    args: &KubernetesAgentArgs,
    kubeconfig: Option<&Path>,
) -> Result<(), anyhow::Error> {
    let client = connect(kubeconfig)
        .await
        .context("failed to create Kubernetes client")?;
    let api = Arc::new(KubeCluster::new(client, ApiGroup::Current));
    let store = Arc::new(FileStore::new(&args.record_dir));

    KubernetesAgent::new(api, store)
        .collect()
        .instrument(tracing::info_span!("collect", agent = "kubernetes"))
        .await
        .context("failed to collect kubernetes record")?;
    Ok(())
}
