//! Kubernetes agent, record schema v1

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use k8s_openapi::api::core::v1::Node as KubeNode;
use telemetry_common::anonymize::{hash_of, non_empty};
use telemetry_common::record::kubernetes::v1::{Node, Record, Resource};
use telemetry_common::record::{KindVersion, KUBERNETES_KIND};
use telemetry_common::version::V1_VERSION;
use tracing::info;

use super::provider_name;
use crate::agent::{store_record, Agent, AgentError};
use crate::cluster::KubernetesApi;
use crate::datastore::DataStore;

/// Collects the node inventory of a cluster
pub struct KubernetesAgent {
    api: Arc<dyn KubernetesApi>,
    store: Arc<dyn DataStore>,
}

impl KubernetesAgent {
    /// Create an agent reading from `api` and writing to `store`
    pub fn new(api: Arc<dyn KubernetesApi>, store: Arc<dyn DataStore>) -> Self {
        Self { api, store }
    }

    /// Build the record without storing it
    pub async fn record(&self) -> Result<Record, AgentError> {
        let kubernetes_version = self
            .api
            .server_version()
            .await
            .map_err(AgentError::ServerVersion)?;

        let nodes = self
            .api
            .list_nodes(None)
            .await
            .map_err(|source| AgentError::List {
                resource: "nodes",
                source,
            })?;
        let nodes: Vec<Node> = nodes.iter().map(node_from_kube).collect();

        info!(nodes = nodes.len(), "Collected nodes");

        Ok(Record {
            kind_version: KindVersion::new(KUBERNETES_KIND, V1_VERSION),
            time: Utc::now(),
            kubernetes_version,
            nodes,
        })
    }
}

#[async_trait]
impl Agent for KubernetesAgent {
    async fn collect(&self) -> Result<(), AgentError> {
        let record = self.record().await?;
        store_record(self.store.as_ref(), &record).await
    }
}

/// Convert a cluster node into its anonymized record form
pub fn node_from_kube(node: &KubeNode) -> Node {
    let info = node
        .status
        .as_ref()
        .and_then(|status| status.node_info.clone())
        .unwrap_or_default();
    let provider_id = node
        .spec
        .as_ref()
        .and_then(|spec| spec.provider_id.as_deref())
        .unwrap_or_default();

    // Resource names come out of the BTreeMap already sorted.
    let capacity = node
        .status
        .as_ref()
        .and_then(|status| status.capacity.as_ref())
        .map(|capacity| {
            capacity
                .iter()
                .map(|(resource, quantity)| Resource {
                    resource: resource.clone(),
                    value: quantity.0.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    Node {
        id: node_id(node),
        operating_system: non_empty(&info.operating_system),
        os_image: non_empty(&info.os_image),
        kernel_version: non_empty(&info.kernel_version),
        architecture: non_empty(&info.architecture),
        container_runtime_version: non_empty(&info.container_runtime_version),
        kubelet_version: non_empty(&info.kubelet_version),
        cloud_provider: non_empty(provider_name(provider_id)),
        capacity,
    }
}

/// Stable node identifier
///
/// The node name is personally identifiable, and machine ID / system UUID are
/// not reliably populated, so all three are hashed together.
pub fn node_id(node: &KubeNode) -> String {
    let name = node.metadata.name.as_deref().unwrap_or_default();
    let (machine_id, system_uuid) = node
        .status
        .as_ref()
        .and_then(|status| status.node_info.as_ref())
        .map(|info| (info.machine_id.as_str(), info.system_uuid.as_str()))
        .unwrap_or_default();
    hash_of(&format!("{name}{machine_id}{system_uuid}"))
}
