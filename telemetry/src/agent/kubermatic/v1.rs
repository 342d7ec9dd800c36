//! Kubermatic agent, record schema v1

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use telemetry_common::record::kubermatic::v1::Record;
use telemetry_common::record::{KindVersion, KUBERMATIC_KIND};
use telemetry_common::version::V1_VERSION;

use super::{
    cluster_from_kube, collect_inventory, default_expose_strategy, project_from_kube,
    seed_from_kube, single_configuration, ssh_key_from_kube, user_from_kube,
};
use crate::agent::{store_record, Agent, AgentError};
use crate::cluster::kubermatic::object_name;
use crate::cluster::KubermaticApi;
use crate::datastore::DataStore;

/// Collects a v1 Kubermatic record
///
/// Reads the KubermaticConfiguration cluster-wide, which is where older
/// installations keep it.
pub struct KubermaticAgentV1 {
    api: Arc<dyn KubermaticApi>,
    store: Arc<dyn DataStore>,
}

impl KubermaticAgentV1 {
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
            .kubermatic_configurations(None)
            .await
            .map_err(|source| AgentError::List {
                resource: "kubermatic configurations",
                source,
            })?;
        let configuration = single_configuration(configurations, "the cluster")?;
        let expose_strategy = default_expose_strategy(&configuration);

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
            kind_version: KindVersion::new(KUBERMATIC_KIND, V1_VERSION),
            time: Utc::now(),
            kubernetes_version,
            seeds,
            clusters,
            users: inventory.users.iter().map(user_from_kube).collect(),
            projects: inventory.projects.iter().map(project_from_kube).collect(),
            ssh_keys: inventory.ssh_keys.iter().map(ssh_key_from_kube).collect(),
        })
    }
}

#[async_trait]
impl Agent for KubermaticAgentV1 {
    async fn collect(&self) -> Result<(), AgentError> {
        let record = self.record().await?;
        store_record(self.store.as_ref(), &record).await
    }
}
