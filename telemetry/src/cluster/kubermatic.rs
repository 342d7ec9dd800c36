//! Kubermatic custom resources
//!
//! Only the fields telemetry reads are modelled; everything else in the
//! objects is ignored on decode. The same shapes serve the legacy
//! `kubermatic.k8s.io` and the current `kubermatic.k8c.io` API groups.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ObjectReference;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Deserialize;
use serde_json::Value;

/// Label carrying the owning project's name on a cluster
pub const PROJECT_ID_LABEL: &str = "project-id";

/// Owner reference kind of a project
pub const PROJECT_KIND: &str = "Project";

/// Name of an object, empty when unset
pub fn object_name(meta: &ObjectMeta) -> &str {
    meta.name.as_deref().unwrap_or_default()
}

/// Project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Object metadata
    pub metadata: ObjectMeta,
}

/// User
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// User spec
    pub spec: UserSpec,
}

/// User spec
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSpec {
    /// Whether the user is a Kubermatic admin
    pub is_admin: bool,
}

/// User SSH key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserSshKey {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Key spec
    pub spec: UserSshKeySpec,
}

/// User SSH key spec
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserSshKeySpec {
    /// Names of the clusters the key is assigned to
    pub clusters: Vec<String>,
}

/// Seed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Seed spec
    pub spec: SeedSpec,
}

/// Seed spec
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedSpec {
    /// ISO-3166 two-letter country code
    pub country: String,
    /// Free-form location
    pub location: String,
    /// Secret holding the seed's kubeconfig
    pub kubeconfig: Option<ObjectReference>,
    /// Datacenters keyed by name
    pub datacenters: BTreeMap<String, Datacenter>,
    /// Seed-level expose strategy
    pub expose_strategy: String,
}

/// Datacenter of a seed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Datacenter {
    /// ISO-3166 two-letter country code
    pub country: String,
    /// Free-form location
    pub location: String,
    /// Provider specific settings
    pub spec: ProviderBlocks,
}

/// Object holding one block per cloud provider (datacenter spec, cluster cloud spec)
///
/// The provider blocks are kept as raw JSON; provider detection only needs to
/// know which of them are set, and region lookup reads a single field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderBlocks {
    /// Datacenter name (`dc`), set on cluster cloud specs
    #[serde(rename = "dc", default)]
    pub datacenter_name: String,
    /// Remaining fields, keyed by JSON name
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ProviderBlocks {
    /// Block for `provider` when present and not null
    pub fn block(&self, provider: &str) -> Option<&Value> {
        self.fields.get(provider).filter(|value| !value.is_null())
    }
}

/// User cluster
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Cluster {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Cluster spec
    pub spec: ClusterSpec,
    /// Cluster status
    pub status: ClusterStatus,
}

/// User cluster spec
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSpec {
    /// Cloud provider settings
    pub cloud: ProviderBlocks,
    /// Control plane version
    pub version: String,
    /// Expose strategy
    pub expose_strategy: String,
    /// Component overrides
    pub components_override: ComponentsOverride,
    /// OPA integration
    pub opa_integration: Option<OpaIntegration>,
    /// User SSH key agent toggle
    #[serde(rename = "enableUserSSHKeyAgent")]
    pub enable_user_ssh_key_agent: Option<bool>,
    /// Monitoring, logging and alerting
    pub mla: Option<MlaSettings>,
    /// CNI plugin
    pub cni_plugin: Option<CniPlugin>,
    /// Cluster networking
    pub cluster_network: ClusterNetwork,
}

/// Component overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentsOverride {
    /// etcd settings
    pub etcd: EtcdSettings,
}

/// etcd settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EtcdSettings {
    /// Number of etcd members
    pub cluster_size: Option<i64>,
}

/// OPA integration settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpaIntegration {
    /// Whether OPA integration is enabled
    pub enabled: bool,
}

/// MLA settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MlaSettings {
    /// User cluster monitoring
    pub monitoring_enabled: bool,
    /// User cluster logging
    pub logging_enabled: bool,
}

/// CNI plugin settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CniPlugin {
    /// Plugin type (canal, cilium, none)
    #[serde(rename = "type")]
    pub plugin_type: String,
    /// Plugin version
    pub version: String,
}

/// Cluster networking settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterNetwork {
    /// IP family
    pub ip_family: String,
    /// Konnectivity toggle
    pub konnectivity_enabled: Option<bool>,
}

/// User cluster status
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterStatus {
    /// Kubermatic version managing the cluster
    pub kubermatic_version: String,
}

/// KubermaticConfiguration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KubermaticConfiguration {
    /// Object metadata
    pub metadata: ObjectMeta,
    /// Configuration spec
    pub spec: KubermaticConfigurationSpec,
    /// Configuration status
    pub status: KubermaticConfigurationStatus,
}

/// KubermaticConfiguration spec
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KubermaticConfigurationSpec {
    /// Installation-wide default expose strategy
    pub expose_strategy: String,
}

/// KubermaticConfiguration status
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KubermaticConfigurationStatus {
    /// Edition (ce / ee)
    pub kubermatic_edition: String,
    /// Release version
    pub kubermatic_version: String,
}
