//! kubermatic-agent subcommand

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::Instrument;

use super::{SchemaVersion, DEFAULT_RECORD_DIR};
use crate::agent::{Agent, KubermaticAgentV1, KubermaticAgentV2};
use crate::cluster::{connect, ApiGroup, KubeCluster};
use crate::datastore::FileStore;

/// Arguments for the kubermatic-agent subcommand
#[derive(Args, Debug, Clone)]
pub struct KubermaticAgentArgs {
    /// Directory the record is written to
    #[arg(long, env = "TELEMETRY_RECORD_DIR", default_value = DEFAULT_RECORD_DIR)]
    pub record_dir: PathBuf,

    /// Record schema; v1 reads the legacy kubermatic.k8s.io API group
    #[arg(long, value_enum, default_value_t = SchemaVersion::V2)]
    pub schema_version: SchemaVersion,
}

/// Execute the kubermatic-agent command
pub async fn execute(
    args: &KubermaticAgentArgs,
    kubeconfig: Option<&Path>,
) -> Result<(), anyhow::Error> {
    let client = connect(kubeconfig)
        .await
        .context("failed to create Kubernetes client")?;
    let store = Arc::new(FileStore::new(&args.record_dir));

    let agent: Box<dyn Agent> = match args.schema_version {
        SchemaVersion::V1 => Box::new(KubermaticAgentV1::new(
            Arc::new(KubeCluster::new(client, ApiGroup::Legacy)),
            store,
        )),
        SchemaVersion::V2 => Box::new(KubermaticAgentV2::new(
            Arc::new(KubeCluster::new(client, ApiGroup::Current)),
            store,
        )),
    };

    agent
        .collect()
        .instrument(tracing::info_span!("collect", agent = "kubermatic"))
        .await
        .context("failed to collect kubermatic record")?;
    Ok(())
}
