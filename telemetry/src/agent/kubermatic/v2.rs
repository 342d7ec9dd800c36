//! Kubermatic agent, record schema v2

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use telemetry_common::anonymize::non_empty;
use telemetry_common::record::kubermatic::v2::{
    Cluster, ClusterNetworkingConfig, CniPluginSettings, Record,
};
use telemetry_common::record::{KindVersion, KUBERMATIC_KIND};
use telemetry_common::version::V2_VERSION;
use tracing::info;

use super::{
    cluster_from_kube as base_cluster, collect_inventory, default_expose_strategy,
    project_from_kube, seed_from_kube, single_configuration, ssh_key_from_kube, user_from_kube,
};
use crate::agent::{store_record, Agent, AgentError};
use crate::cluster::kubermatic::{object_name, Cluster as KubeCluster};
use crate::cluster::{KubermaticApi, KUBERMATIC_NAMESPACE};
use crate::datastore::DataStore;

/// Collects a v2 Kubermatic record
pub struct KubermaticAgentV2 {
    api: Arc<dyn KubermaticApi>,
    store: Arc<dyn DataStore>,
}

impl KubermaticAgentV2 {
    /// Create an agent reading from `api` and writing to `store`
    pub fn new(api: Arc<dyn KubermaticApi>, store: Arc<dyn DataStore>) -> Self {
        Self { api, store }
    }

    /// Build the record without storing it
    pub async fn record(&self) -> Result<Record, AgentError> {
        let kubernetes_version = self
            .api
            .server_version()
            .await
            .map_err(AgentError::ServerVersion)?;

        let configurations = self
            .api
            .kubermatic_configurations(Some(KUBERMATIC_NAMESPACE))
            .await
            .map_err(|source| AgentError::List {
                resource: "kubermatic configurations",
                source,
            })?;
        let configuration = single_configuration(
            configurations,
            &format!("namespace {KUBERMATIC_NAMESPACE}"),
        )?;
        let expose_strategy = default_expose_strategy(&configuration);
        let status = &configuration.status;
        info!(
            edition = %status.kubermatic_edition,
            version = %status.kubermatic_version,
            "Found KubermaticConfiguration"
        );

        let inventory = collect_inventory(self.api.as_ref()).await?;

        let mut seeds = Vec::with_capacity(inventory.seeds.len());
        let mut clusters = Vec::new();
        for (seed, seed_clusters) in &inventory.seeds {
            seeds.push(seed_from_kube(seed, &expose_strategy)?);
            let seed_name = object_name(&seed.metadata);
            for cluster in seed_clusters {
                clusters.push(cluster_from_kube(cluster, seed_name)?);
            }
        }

        Ok(Record {
            kind_version: KindVersion::new(KUBERMATIC_KIND, V2_VERSION),
            time: Utc::now(),
            kubernetes_version,
            kubermatic_edition: status.kubermatic_edition.clone(),
            kubermatic_version: status.kubermatic_version.clone(),
            seeds,
            clusters,
            users: inventory.users.iter().map(user_from_kube).collect(),
            projects: inventory.projects.iter().map(project_from_kube).collect(),
            ssh_keys: inventory.ssh_keys.iter().map(ssh_key_from_kube).collect(),
        })
    }
}

#[async_trait]
impl Agent for KubermaticAgentV2 {
    async fn collect(&self) -> Result<(), AgentError> {
        let record = self.record().await?;
        store_record(self.store.as_ref(), &record).await
    }
}

/// Convert a user cluster into the v2 cluster shape
pub fn cluster_from_kube(cluster: &KubeCluster, seed_name: &str) -> Result<Cluster, AgentError> {
    let base = base_cluster(cluster, seed_name)?;
    let spec = &cluster.spec;

    let cni_plugin = spec
        .cni_plugin
        .as_ref()
        .map(|cni| CniPluginSettings {
            plugin_type: cni.plugin_type.clone(),
            version: cni.version.clone(),
        })
        .unwrap_or_default();

    Ok(Cluster {
        uuid: base.uuid,
        seed_uuid: base.seed_uuid,
        project_uuid: base.project_uuid,
        cni_plugin,
        expose_strategy: base.expose_strategy,
        etcd_cluster_size: base.etcd_cluster_size,
        kubernetes_server_version: base.kubernetes_server_version,
        kubermatic_version: base.kubermatic_version,
        cloud: base.cloud,
        opa_integration_enabled: base.opa_integration_enabled,
        cluster_network: ClusterNetworkingConfig {
            ip_family: non_empty(&spec.cluster_network.ip_family),
            konnectivity_enabled: spec.cluster_network.konnectivity_enabled.unwrap_or(false),
        },
        mla: base.mla,
        user_ssh_key_agent_enabled: base.user_ssh_key_agent_enabled,
    })
}
