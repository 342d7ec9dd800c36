//! Record collection agents
//!
//! An agent reads one snapshot of cluster state, turns it into a single
//! anonymized record and hands the serialized record to its [`DataStore`].

pub mod kubermatic;
pub mod kubernetes;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::cluster::ClusterError;
use crate::datastore::{DataStore, DataStoreError};

pub use kubermatic::{KubermaticAgentV1, KubermaticAgentV2};
pub use kubernetes::KubernetesAgent;

/// Error types for record collection
#[derive(Debug, Error)]
pub enum AgentError {
    /// API server version could not be read
    #[error("failed reading server version: {0}")]
    ServerVersion(#[source] ClusterError),

    /// Listing a resource type failed
    #[error("failed listing {resource}: {source}")]
    List {
        /// Resource type being listed
        resource: &'static str,
        /// Underlying error
        #[source]
        source: ClusterError,
    },

    /// Clusters of a seed could not be read
    #[error("failed getting clusters of seed {seed}: {source}")]
    SeedClusters {
        /// Seed name
        seed: String,
        /// Underlying error
        #[source]
        source: ClusterError,
    },

    /// KubermaticConfiguration missing or ambiguous
    #[error("kubermatic configuration: {0}")]
    Configuration(String),

    /// More than one cloud provider block is set on an object
    #[error("only one cloud provider can be set for {object}, but found: {}", .providers.join(", "))]
    MultipleProviders {
        /// Object description (e.g. `datacenter aws-eu`)
        object: String,
        /// Providers that were set
        providers: Vec<&'static str>,
    },

    /// Record could not be serialized
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record could not be stored
    #[error("failed to store record: {0}")]
    Store(#[from] DataStoreError),
}

/// Collects one record per invocation
#[async_trait]
pub trait Agent: Send + Sync {
    /// Build a record from the current cluster state and store it
    async fn collect(&self) -> Result<(), AgentError>;
}

pub(crate) async fn store_record<T: Serialize + std::fmt::Display>(
    store: &dyn DataStore,
    record: &T,
) -> Result<(), AgentError> {
    let data = serde_json::to_vec(record)?;
    debug!(record = %record, bytes = data.len(), "Storing record");
    store.store(&data).await?;
    Ok(())
}
