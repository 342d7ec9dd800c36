//! Kubernetes agent integration tests

mod support;

use std::sync::Arc;

use serde_json::json;
use support::{from_json, FakeCluster, MemoryStore};
use telemetry_client::agent::{Agent, KubernetesAgent};
use telemetry_common::anonymize::hash_of;
use telemetry_common::record::kubernetes::v1::Record;
use tempfile::TempDir;

fn node(name: &str, provider_id: &str) -> k8s_openapi::api::core::v1::Node {
    from_json(json!({
        "metadata": {"name": name},
        "spec": {"providerID": provider_id},
        "status": {
            "capacity": {"cpu": "2", "memory": "4Gi"},
            "nodeInfo": {
                "machineID": format!("{name}-machine"),
                "systemUUID": format!("{name}-system"),
                "bootID": "",
                "kernelVersion": "5.15.0",
                "osImage": "Flatcar Container Linux",
                "containerRuntimeVersion": "containerd://1.6.28",
                "kubeletVersion": "v1.28.7",
                "kubeProxyVersion": "v1.28.7",
                "operatingSystem": "linux",
                "architecture": "arm64"
            }
        }
    }))
}

#[tokio::test]
async fn test_collect_stores_one_record() {
    let mut cluster = FakeCluster::new("v1.28.7");
    cluster.nodes = vec![
        node("worker-a", "hcloud://101"),
        node("worker-b", "openstack:///b12"),
    ];
    let store = Arc::new(MemoryStore::default());

    let agent = KubernetesAgent::new(Arc::new(cluster), store.clone());
    agent.collect().await.unwrap();

    let documents = store.json();
    assert_eq!(documents.len(), 1);
    let record = &documents[0];
    assert_eq!(record["kind"], "kubernetes");
    assert_eq!(record["version"], "v1");
    assert_eq!(record["kubernetes_version"], "v1.28.7");

    let nodes = record["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0]["id"], hash_of("worker-aworker-a-machineworker-a-system"));
    assert_eq!(nodes[0]["cloud_provider"], "hcloud");
    assert_eq!(nodes[1]["cloud_provider"], "openstack");
    assert_eq!(nodes[0]["architecture"], "arm64");
}

#[tokio::test]
async fn test_record_is_readable_back() {
    let mut cluster = FakeCluster::new("v1.29.0");
    cluster.nodes = vec![node("n1", "aws:///eu-west-1a/i-1")];
    let store = Arc::new(MemoryStore::default());

    KubernetesAgent::new(Arc::new(cluster), store.clone())
        .collect()
        .await
        .unwrap();

    let documents = store.documents.lock().unwrap();
    let record: Record = serde_json::from_slice(&documents[0]).unwrap();
    assert_eq!(record.nodes.len(), 1);
    assert_eq!(record.nodes[0].cloud_provider.as_deref(), Some("aws"));
    assert_eq!(record.nodes[0].capacity.len(), 2);
}

#[tokio::test]
async fn test_empty_cluster_omits_nodes() {
    let store = Arc::new(MemoryStore::default());
    KubernetesAgent::new(Arc::new(FakeCluster::new("v1.30.1")), store.clone())
        .collect()
        .await
        .unwrap();

    let record = &store.json()[0];
    assert!(record.get("nodes").is_none());
}

#[tokio::test]
async fn test_collect_into_file_store() {
    let dir = TempDir::new().unwrap();
    let mut cluster = FakeCluster::new("v1.28.7");
    cluster.nodes = vec![node("worker-a", "hcloud://101")];

    let store = Arc::new(telemetry_client::datastore::FileStore::new(dir.path()));
    KubernetesAgent::new(Arc::new(cluster), store)
        .collect()
        .await
        .unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("record-") && name.ends_with(".json"));

    let content = std::fs::read_to_string(&files[0]).unwrap();
    assert!(!content.contains("worker-a"));
}
