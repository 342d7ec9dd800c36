//! Kubermatic agent
//!
//! Both schema versions walk the same inventory: projects, users, SSH keys,
//! then every seed together with the user clusters it hosts. They differ in
//! the API group they read, where the KubermaticConfiguration lives and how
//! much of each cluster ends up in the record.

mod provider;
pub mod v1;
pub mod v2;

use telemetry_common::anonymize::{generate_uuid, non_empty};
use telemetry_common::record::kubermatic::v1 as record;
use tracing::info;

use crate::agent::AgentError;
use crate::cluster::kubermatic::{
    object_name, Cluster, KubermaticConfiguration, Project, Seed, User, UserSshKey,
    PROJECT_ID_LABEL, PROJECT_KIND,
};
use crate::cluster::KubermaticApi;

pub use provider::{cloud_provider_name, datacenter_region, CLOUD_PROVIDERS};
pub use v1::KubermaticAgentV1;
pub use v2::KubermaticAgentV2;

/// Expose strategy used when neither the seed nor the configuration sets one
pub const DEFAULT_EXPOSE_STRATEGY: &str = "NodePort";

/// Raw objects read during one collection
#[derive(Debug, Default)]
pub struct Inventory {
    /// Projects
    pub projects: Vec<Project>,
    /// Users
    pub users: Vec<User>,
    /// User SSH keys
    pub ssh_keys: Vec<UserSshKey>,
    /// Seeds with the clusters each of them hosts
    pub seeds: Vec<(Seed, Vec<Cluster>)>,
}

/// Read the full inventory, failing on the first error
pub async fn collect_inventory(api: &dyn KubermaticApi) -> Result<Inventory, AgentError> {
    let list_error =
        |resource: &'static str| move |source| AgentError::List { resource, source };

    let projects = api.list_projects().await.map_err(list_error("projects"))?;
    info!(projects = projects.len(), "Collected projects");

    let users = api.list_users().await.map_err(list_error("users"))?;
    info!(users = users.len(), "Collected users");

    let ssh_keys = api.list_ssh_keys().await.map_err(list_error("ssh keys"))?;
    info!(keys = ssh_keys.len(), "Collected SSH keys");

    let seed_list = api.list_seeds().await.map_err(list_error("seeds"))?;
    let mut seeds = Vec::with_capacity(seed_list.len());
    for seed in seed_list {
        let seed_name = object_name(&seed.metadata).to_string();
        let clusters = api
            .list_seed_clusters(&seed)
            .await
            .map_err(|source| AgentError::SeedClusters {
                seed: seed_name.clone(),
                source,
            })?;
        info!(seed = %seed_name, clusters = clusters.len(), "Collected userclusters");
        seeds.push((seed, clusters));
    }
    info!(seeds = seeds.len(), "Collected seeds");

    Ok(Inventory {
        projects,
        users,
        ssh_keys,
        seeds,
    })
}

/// Pick the single KubermaticConfiguration out of a listing
pub fn single_configuration(
    mut configurations: Vec<KubermaticConfiguration>,
    scope: &str,
) -> Result<KubermaticConfiguration, AgentError> {
    match configurations.len() {
        1 => Ok(configurations.remove(0)),
        0 => Err(AgentError::Configuration(format!(
            "no KubermaticConfiguration found in {scope}"
        ))),
        n => Err(AgentError::Configuration(format!(
            "expected exactly one KubermaticConfiguration in {scope}, found {n}"
        ))),
    }
}

/// Installation-wide expose strategy of a configuration
pub fn default_expose_strategy(configuration: &KubermaticConfiguration) -> String {
    if configuration.spec.expose_strategy.is_empty() {
        DEFAULT_EXPOSE_STRATEGY.to_string()
    } else {
        configuration.spec.expose_strategy.clone()
    }
}

/// Convert a project
pub fn project_from_kube(project: &Project) -> record::Project {
    record::Project {
        uuid: generate_uuid(object_name(&project.metadata)),
    }
}

/// Convert a user
pub fn user_from_kube(user: &User) -> record::User {
    record::User {
        uuid: generate_uuid(object_name(&user.metadata)),
        is_admin: user.spec.is_admin,
    }
}

/// Convert a user SSH key
pub fn ssh_key_from_kube(key: &UserSshKey) -> record::SshKey {
    let owner_project_uuid = key
        .metadata
        .owner_references
        .iter()
        .flatten()
        .find(|owner| owner.kind == PROJECT_KIND)
        .map(|owner| generate_uuid(&owner.name));

    record::SshKey {
        uuid: generate_uuid(object_name(&key.metadata)),
        owner_project_uuid,
        cluster_uuids: key
            .spec
            .clusters
            .iter()
            .map(|cluster| generate_uuid(cluster))
            .collect(),
    }
}

/// Convert a seed and its datacenters
///
/// Datacenters are emitted in name order.
pub fn seed_from_kube(
    seed: &Seed,
    default_expose_strategy: &str,
) -> Result<record::Seed, AgentError> {
    let datacenters = seed
        .spec
        .datacenters
        .iter()
        .map(|(name, datacenter)| -> Result<record::Datacenter, AgentError> {
            let provider =
                cloud_provider_name(&datacenter.spec, || format!("datacenter {name}"))?;
            Ok(record::Datacenter {
                uuid: generate_uuid(name),
                country: non_empty(&datacenter.country),
                location: non_empty(&datacenter.location),
                provider: provider.map(str::to_string),
                region: provider.and_then(|p| datacenter_region(&datacenter.spec, p)),
            })
        })
        .collect::<Result<Vec<_>, AgentError>>()?;

    let expose_strategy = if seed.spec.expose_strategy.is_empty() {
        default_expose_strategy
    } else {
        &seed.spec.expose_strategy
    };

    Ok(record::Seed {
        uuid: generate_uuid(object_name(&seed.metadata)),
        country: non_empty(&seed.spec.country),
        location: non_empty(&seed.spec.location),
        expose_strategy: non_empty(expose_strategy),
        datacenters,
    })
}

/// Convert a user cluster into the v1 cluster shape
pub fn cluster_from_kube(
    cluster: &Cluster,
    seed_name: &str,
) -> Result<record::Cluster, AgentError> {
    let name = object_name(&cluster.metadata);
    let spec = &cluster.spec;
    let provider = cloud_provider_name(&spec.cloud, || format!("cluster {name}"))?;

    let project_uuid = cluster
        .metadata
        .labels
        .as_ref()
        .and_then(|labels| labels.get(PROJECT_ID_LABEL))
        .filter(|project| !project.is_empty())
        .map(|project| generate_uuid(project));

    let mla = spec
        .mla
        .as_ref()
        .map(|mla| record::MlaSettings {
            monitoring_enabled: mla.monitoring_enabled,
            logging_enabled: mla.logging_enabled,
        })
        .unwrap_or_default();

    Ok(record::Cluster {
        uuid: generate_uuid(name),
        seed_uuid: generate_uuid(seed_name),
        project_uuid,
        expose_strategy: non_empty(&spec.expose_strategy),
        etcd_cluster_size: spec.components_override.etcd.cluster_size.unwrap_or(0),
        kubernetes_server_version: non_empty(&spec.version),
        kubermatic_version: non_empty(&cluster.status.kubermatic_version),
        cloud: record::Cloud {
            provider_name: provider.map(str::to_string),
            datacenter_uuid: non_empty(&spec.cloud.datacenter_name)
                .map(|dc| generate_uuid(&dc)),
        },
        opa_integration_enabled: spec
            .opa_integration
            .as_ref()
            .map(|opa| opa.enabled)
            .unwrap_or(false),
        mla,
        user_ssh_key_agent_enabled: spec.enable_user_ssh_key_agent.unwrap_or(false),
    })
}
