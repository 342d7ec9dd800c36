//! v1 report
//!
//! Besides the records, a v1 report names the external IP of one master
//! cluster node so the collector can geolocate the installation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use k8s_openapi::api::core::v1::Node;
use telemetry_common::report::v1::Report;
use tracing::warn;

use super::{store_report, RecordSource, Reporter, ReporterError};
use crate::cluster::KubernetesApi;
use crate::datastore::DataStore;

const EXTERNAL_IP: &str = "ExternalIP";

/// Reports records from disk as a v1 report
pub struct FileReporter {
    source: RecordSource,
    client_uuid: String,
    api: Arc<dyn KubernetesApi>,
    store: Arc<dyn DataStore>,
}

impl FileReporter {
    /// Create a reporter; `source` must already exist
    pub fn new(
        source: RecordSource,
        client_uuid: impl Into<String>,
        api: Arc<dyn KubernetesApi>,
        store: Arc<dyn DataStore>,
    ) -> Self {
        Self {
            source,
            client_uuid: client_uuid.into(),
            api,
            store,
        }
    }

    /// Build the report without storing it
    pub async fn build(&self) -> Result<Report, ReporterError> {
        let mut report = Report::new(self.client_uuid.clone(), Utc::now());

        let nodes = self.api.list_nodes(Some(1)).await?;
        report.master_ip = nodes.first().map(external_ip).unwrap_or_default();
        if report.master_ip.is_empty() {
            warn!("No external IP found on master cluster nodes");
        }

        report.records = self.source.read_records().await?;
        Ok(report)
    }
}

#[async_trait]
impl Reporter for FileReporter {
    async fn report(&self) -> Result<(), ReporterError> {
        let report = self.build().await?;
        store_report(self.store.as_ref(), &report).await
    }
}

/// First `ExternalIP` address of a node, empty when it has none
pub fn external_ip(node: &Node) -> String {
    node.status
        .as_ref()
        .and_then(|status| status.addresses.as_ref())
        .and_then(|addresses| addresses.iter().find(|a| a.type_ == EXTERNAL_IP))
        .map(|address| address.address.clone())
        .unwrap_or_default()
}
