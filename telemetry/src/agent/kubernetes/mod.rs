//! Kubernetes agent
//!
//! Node inventory of a plain Kubernetes cluster.

pub mod v1;

pub use v1::KubernetesAgent;

/// Cloud provider name from a node's `spec.providerID`
///
/// The ID is expected as `<ProviderName>://<ProviderSpecificNodeID>`;
/// anything else yields `"unknown"`.
pub fn provider_name(provider_id: &str) -> &str {
    let parts: Vec<&str> = provider_id.split("://").collect();
    if parts.len() == 2 {
        parts[0]
    } else {
        "unknown"
    }
}
