//! Shared test doubles for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use serde::de::DeserializeOwned;
use telemetry_client::cluster::kubermatic::{
    object_name, Cluster, KubermaticConfiguration, Project, Seed, User, UserSshKey,
};
use telemetry_client::cluster::{ClusterError, KubermaticApi, KubernetesApi};
use telemetry_client::datastore::{DataStore, DataStoreError};

/// Decode a fixture
pub fn from_json<T: DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).expect("fixture should decode")
}

/// In-memory cluster
#[derive(Default)]
pub struct FakeCluster {
    pub version: String,
    pub nodes: Vec<Node>,
    pub configurations: Vec<KubermaticConfiguration>,
    pub projects: Vec<Project>,
    pub users: Vec<User>,
    pub ssh_keys: Vec<UserSshKey>,
    pub seeds: Vec<Seed>,
    /// Clusters keyed by seed name
    pub clusters: HashMap<String, Vec<Cluster>>,
    /// Seed whose cluster listing fails
    pub unreachable_seed: Option<String>,
    /// Node list limits requested so far
    pub node_limits: Mutex<Vec<Option<u32>>>,
}

impl FakeCluster {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl KubernetesApi for FakeCluster {
    async fn server_version(&self) -> Result<String, ClusterError> {
        Ok(self.version.clone())
    }

    async fn list_nodes(&self, limit: Option<u32>) -> Result<Vec<Node>, ClusterError> {
        self.node_limits.lock().unwrap().push(limit);
        let take = limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(self.nodes.iter().take(take).cloned().collect())
    }
}

#[async_trait]
impl KubermaticApi for FakeCluster {
    async fn kubermatic_configurations(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<KubermaticConfiguration>, ClusterError> {
        Ok(self
            .configurations
            .iter()
            .filter(|config| match namespace {
                Some(ns) => config.metadata.namespace.as_deref() == Some(ns),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClusterError> {
        Ok(self.projects.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>, ClusterError> {
        Ok(self.users.clone())
    }

    async fn list_ssh_keys(&self) -> Result<Vec<UserSshKey>, ClusterError> {
        Ok(self.ssh_keys.clone())
    }

    async fn list_seeds(&self) -> Result<Vec<Seed>, ClusterError> {
        Ok(self.seeds.clone())
    }

    async fn list_seed_clusters(&self, seed: &Seed) -> Result<Vec<Cluster>, ClusterError> {
        let name = object_name(&seed.metadata);
        if self.unreachable_seed.as_deref() == Some(name) {
            return Err(ClusterError::SeedKubeconfig {
                seed: name.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.clusters.get(name).cloned().unwrap_or_default())
    }
}

/// Store keeping every document in memory
#[derive(Default)]
pub struct MemoryStore {
    pub documents: Mutex<Vec<Vec<u8>>>,
}

impl MemoryStore {
    pub fn json(&self) -> Vec<serde_json::Value> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .map(|doc| serde_json::from_slice(doc).unwrap())
            .collect()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError> {
        self.documents.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}
