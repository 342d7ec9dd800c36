//! Kubernetes API access
//!
//! Agents and reporters depend on the [`KubernetesApi`] / [`KubermaticApi`]
//! traits instead of a concrete client; [`KubeCluster`] is the kube-rs backed
//! implementation used by the binary.

mod client;
pub mod kubermatic;

use std::path::Path;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use thiserror::Error;

pub use client::{ApiGroup, KubeCluster};
use kubermatic::{Cluster, KubermaticConfiguration, Project, Seed, User, UserSshKey};

/// Namespace Kubermatic is installed into
pub const KUBERMATIC_NAMESPACE: &str = "kubermatic";

/// Error types for cluster access
#[derive(Debug, Error)]
pub enum ClusterError {
    /// API request failed
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Kubeconfig could not be loaded
    #[error("kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// No usable ambient configuration
    #[error("failed to infer cluster configuration: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    /// Object did not match the expected shape
    #[error("failed to decode {kind} {name}: {source}")]
    Decode {
        /// Resource kind
        kind: &'static str,
        /// Object name
        name: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Seed has no usable kubeconfig reference
    #[error("seed {seed}: {reason}")]
    SeedKubeconfig {
        /// Seed name
        seed: String,
        /// What is missing
        reason: String,
    },
}

/// Core Kubernetes reads
#[async_trait]
pub trait KubernetesApi: Send + Sync {
    /// Git version reported by the API server (e.g. `v1.29.4`)
    async fn server_version(&self) -> Result<String, ClusterError>;

    /// List cluster nodes, optionally capped at `limit`
    async fn list_nodes(&self, limit: Option<u32>) -> Result<Vec<Node>, ClusterError>;
}

/// Kubermatic resource reads
#[async_trait]
pub trait KubermaticApi: KubernetesApi {
    /// KubermaticConfiguration objects, cluster-wide or in one namespace
    async fn kubermatic_configurations(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<KubermaticConfiguration>, ClusterError>;

    /// All projects
    async fn list_projects(&self) -> Result<Vec<Project>, ClusterError>;

    /// All users
    async fn list_users(&self) -> Result<Vec<User>, ClusterError>;

    /// All user SSH keys
    async fn list_ssh_keys(&self) -> Result<Vec<UserSshKey>, ClusterError>;

    /// All seeds
    async fn list_seeds(&self) -> Result<Vec<Seed>, ClusterError>;

    /// User clusters hosted on `seed`, read through the seed's own kubeconfig
    async fn list_seed_clusters(&self, seed: &Seed) -> Result<Vec<Cluster>, ClusterError>;
}

/// Build a client from an explicit kubeconfig file or the ambient configuration
///
/// Without a path this follows the usual lookup: in-cluster service account,
/// then `KUBECONFIG`, then `~/.kube/config`.
pub async fn connect(kubeconfig: Option<&Path>) -> Result<Client, ClusterError> {
    let config = match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
        }
        None => Config::infer().await?,
    };
    Ok(Client::try_from(config)?)
}
