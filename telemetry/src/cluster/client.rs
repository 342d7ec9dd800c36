//! kube-rs backed cluster access

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Secret};
use kube::api::{Api, ApiResource, DynamicObject, GroupVersionKind, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::kubermatic::{
    object_name, Cluster, KubermaticConfiguration, Project, Seed, User, UserSshKey,
};
use super::{ClusterError, KubermaticApi, KubernetesApi, KUBERMATIC_NAMESPACE};

const DEFAULT_KUBECONFIG_KEY: &str = "kubeconfig";

/// Kubermatic API group generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiGroup {
    /// `kubermatic.k8s.io/v1` with `operator.kubermatic.io/v1alpha1` configurations
    Legacy,
    /// `kubermatic.k8c.io/v1`
    Current,
}

impl ApiGroup {
    fn group(self) -> &'static str {
        match self {
            Self::Legacy => "kubermatic.k8s.io",
            Self::Current => "kubermatic.k8c.io",
        }
    }

    /// API resource for a Kubermatic kind
    pub fn resource(self, kind: &str, plural: &str) -> ApiResource {
        ApiResource::from_gvk_with_plural(&GroupVersionKind::gvk(self.group(), "v1", kind), plural)
    }

    /// API resource of UserSSHKey, whose legacy plural was generated as `usersshkeies`
    pub fn ssh_key_resource(self) -> ApiResource {
        match self {
            Self::Legacy => self.resource("UserSSHKey", "usersshkeies"),
            Self::Current => self.resource("UserSSHKey", "usersshkeys"),
        }
    }

    /// API resource of KubermaticConfiguration
    pub fn configuration_resource(self) -> ApiResource {
        match self {
            Self::Legacy => ApiResource::from_gvk_with_plural(
                &GroupVersionKind::gvk(
                    "operator.kubermatic.io",
                    "v1alpha1",
                    "KubermaticConfiguration",
                ),
                "kubermaticconfigurations",
            ),
            Self::Current => self.resource("KubermaticConfiguration", "kubermaticconfigurations"),
        }
    }
}

/// Secret location of a seed's kubeconfig
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KubeconfigSecretRef {
    pub namespace: String,
    pub name: String,
    pub key: String,
}

/// Resolve the seed's kubeconfig reference, applying the seed namespace and
/// `kubeconfig` key defaults
pub(crate) fn kubeconfig_secret_ref(seed: &Seed) -> Result<KubeconfigSecretRef, ClusterError> {
    let seed_name = object_name(&seed.metadata);
    let missing = |reason: &str| ClusterError::SeedKubeconfig {
        seed: seed_name.to_string(),
        reason: reason.to_string(),
    };

    let reference = seed
        .spec
        .kubeconfig
        .as_ref()
        .ok_or_else(|| missing("no kubeconfig reference"))?;
    let name = reference
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| missing("kubeconfig reference has no secret name"))?;
    let namespace = reference
        .namespace
        .as_deref()
        .filter(|n| !n.is_empty())
        .or(seed.metadata.namespace.as_deref())
        .unwrap_or(KUBERMATIC_NAMESPACE);
    let key = reference
        .field_path
        .as_deref()
        .filter(|k| !k.is_empty())
        .unwrap_or(DEFAULT_KUBECONFIG_KEY);

    Ok(KubeconfigSecretRef {
        namespace: namespace.to_string(),
        name: name.to_string(),
        key: key.to_string(),
    })
}

/// Cluster access through a kube-rs client
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
    group: ApiGroup,
}

impl KubeCluster {
    /// Wrap a connected client
    pub fn new(client: Client, group: ApiGroup) -> Self {
        Self { client, group }
    }

    async fn seed_client(&self, seed: &Seed) -> Result<Client, ClusterError> {
        let secret_ref = kubeconfig_secret_ref(seed)?;
        let seed_name = object_name(&seed.metadata).to_string();

        let secret = Api::<Secret>::namespaced(self.client.clone(), &secret_ref.namespace)
            .get(&secret_ref.name)
            .await?;
        let data = secret
            .data
            .and_then(|mut data| data.remove(&secret_ref.key))
            .ok_or_else(|| ClusterError::SeedKubeconfig {
                seed: seed_name.clone(),
                reason: format!(
                    "secret {}/{} has no key {}",
                    secret_ref.namespace, secret_ref.name, secret_ref.key
                ),
            })?;
        let yaml = String::from_utf8(data.0).map_err(|_| ClusterError::SeedKubeconfig {
            seed: seed_name,
            reason: "kubeconfig is not valid UTF-8".to_string(),
        })?;

        let kubeconfig = Kubeconfig::from_yaml(&yaml)?;
        let config =
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
        Ok(Client::try_from(config)?)
    }
}

async fn list_objects<T: DeserializeOwned>(
    api: Api<DynamicObject>,
    kind: &'static str,
) -> Result<Vec<T>, ClusterError> {
    let list = api.list(&ListParams::default()).await?;
    debug!(kind, count = list.items.len(), "Listed objects");

    list.items
        .into_iter()
        .map(|object| {
            let name = object_name(&object.metadata).to_string();
            serde_json::to_value(object)
                .and_then(serde_json::from_value)
                .map_err(|source| ClusterError::Decode { kind, name, source })
        })
        .collect()
}

#[async_trait]
impl KubernetesApi for KubeCluster {
    async fn server_version(&self) -> Result<String, ClusterError> {
        let info = self.client.apiserver_version().await?;
        Ok(info.git_version)
    }

    async fn list_nodes(&self, limit: Option<u32>) -> Result<Vec<Node>, ClusterError> {
        let mut params = ListParams::default();
        if let Some(limit) = limit {
            params = params.limit(limit);
        }
        let nodes = Api::<Node>::all(self.client.clone()).list(&params).await?;
        Ok(nodes.items)
    }
}

#[async_trait]
impl KubermaticApi for KubeCluster {
    async fn kubermatic_configurations(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<KubermaticConfiguration>, ClusterError> {
        let resource = self.group.configuration_resource();
        let api = match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        };
        list_objects(api, "KubermaticConfiguration").await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClusterError> {
        let resource = self.group.resource("Project", "projects");
        list_objects(Api::all_with(self.client.clone(), &resource), "Project").await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClusterError> {
        let resource = self.group.resource("User", "users");
        list_objects(Api::all_with(self.client.clone(), &resource), "User").await
    }

    async fn list_ssh_keys(&self) -> Result<Vec<UserSshKey>, ClusterError> {
        let resource = self.group.ssh_key_resource();
        list_objects(Api::all_with(self.client.clone(), &resource), "UserSSHKey").await
    }

    async fn list_seeds(&self) -> Result<Vec<Seed>, ClusterError> {
        let resource = self.group.resource("Seed", "seeds");
        list_objects(Api::all_with(self.client.clone(), &resource), "Seed").await
    }

    async fn list_seed_clusters(&self, seed: &Seed) -> Result<Vec<Cluster>, ClusterError> {
        let seed_client = self.seed_client(seed).await?;
        let resource = self.group.resource("Cluster", "clusters");
        list_objects(Api::all_with(seed_client, &resource), "Cluster").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seed(value: serde_json::Value) -> Seed {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_api_group_resources() {
        let projects = ApiGroup::Current.resource("Project", "projects");
        assert_eq!(projects.api_version, "kubermatic.k8c.io/v1");
        assert_eq!(projects.plural, "projects");

        assert_eq!(ApiGroup::Legacy.ssh_key_resource().plural, "usersshkeies");
        assert_eq!(ApiGroup::Current.ssh_key_resource().plural, "usersshkeys");
        assert_eq!(
            ApiGroup::Legacy.configuration_resource().api_version,
            "operator.kubermatic.io/v1alpha1"
        );
        assert_eq!(
            ApiGroup::Current.configuration_resource().group,
            "kubermatic.k8c.io"
        );
    }

    #[test]
    fn test_kubeconfig_ref_defaults() {
        let seed = seed(json!({
            "metadata": {"name": "eu", "namespace": "kkp"},
            "spec": {"kubeconfig": {"name": "kubeconfig-eu"}}
        }));
        let reference = kubeconfig_secret_ref(&seed).unwrap();
        assert_eq!(
            reference,
            KubeconfigSecretRef {
                namespace: "kkp".to_string(),
                name: "kubeconfig-eu".to_string(),
                key: "kubeconfig".to_string(),
            }
        );
    }

    #[test]
    fn test_kubeconfig_ref_explicit_fields() {
        let seed = seed(json!({
            "metadata": {"name": "eu"},
            "spec": {"kubeconfig": {"name": "s", "namespace": "other", "fieldPath": "config"}}
        }));
        let reference = kubeconfig_secret_ref(&seed).unwrap();
        assert_eq!(reference.namespace, "other");
        assert_eq!(reference.key, "config");
    }

    #[test]
    fn test_kubeconfig_ref_missing() {
        let err = kubeconfig_secret_ref(&seed(json!({"metadata": {"name": "eu"}}))).unwrap_err();
        assert!(matches!(err, ClusterError::SeedKubeconfig { seed, .. } if seed == "eu"));
    }
}
