//! Kubermaticレコード v2
//!
//! v1の全フィールドに加えて、エディション・Kubermaticバージョン（トップレベル）と
//! クラスタごとのCNIプラグイン・ネットワーク設定を持つ。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::KindVersion;

use super::v1::is_zero;
pub use super::v1::{Cloud, Datacenter, MlaSettings, Project, Seed, SshKey, User};

/// Kubermaticインストールのレコード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// 種別とバージョン
    #[serde(flatten)]
    pub kind_version: KindVersion,
    /// レコード生成時刻（UTC）
    pub time: DateTime<Utc>,
    /// マスタークラスタのKubernetesバージョン
    pub kubernetes_version: String,
    /// Kubermaticのエディション（"ce" / "ee"）
    pub kubermatic_edition: String,
    /// Kubermaticのリリースバージョン
    pub kubermatic_version: String,
    /// シード一覧
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seeds: Vec<Seed>,
    /// ユーザークラスタ一覧
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<Cluster>,
    /// ユーザー一覧
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    /// プロジェクト一覧
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    /// SSHキー一覧
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_keys: Vec<SshKey>,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record kind: {} version: {}",
            self.kind_version.kind, self.kind_version.version
        )
    }
}

/// ユーザークラスタ情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cluster {
    /// クラスタ名から導出したUUID
    pub uuid: String,
    /// 所属シードのUUID
    pub seed_uuid: String,
    /// 所属プロジェクトのUUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<String>,
    /// CNIプラグイン設定
    #[serde(default)]
    pub cni_plugin: CniPluginSettings,
    /// 公開方式
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose_strategy: Option<String>,
    /// etcdクラスタのサイズ（未設定は0）
    #[serde(default, skip_serializing_if = "is_zero")]
    pub etcd_cluster_size: i64,
    /// コントロールプレーンのバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_server_version: Option<String>,
    /// クラスタを管理しているKubermaticのバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubermatic_version: Option<String>,
    /// クラウドプロバイダー設定
    #[serde(default)]
    pub cloud: Cloud,
    /// OPA連携が有効か
    #[serde(default)]
    pub opa_integration_enabled: bool,
    /// クラスタネットワーク設定
    #[serde(default)]
    pub cluster_network: ClusterNetworkingConfig,
    /// 監視・ロギング・アラート設定
    #[serde(default)]
    pub mla: MlaSettings,
    /// ユーザーSSHキーエージェントをデプロイするか
    #[serde(default)]
    pub user_ssh_key_agent_enabled: bool,
}

/// CNIプラグイン設定
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CniPluginSettings {
    /// プラグイン種別（canal / cilium / none）
    #[serde(rename = "type", default)]
    pub plugin_type: String,
    /// プラグインのバージョン
    #[serde(default)]
    pub version: String,
}

/// クラスタネットワーク設定
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterNetworkingConfig {
    /// IPファミリー（"" / "IPv4" / "IPv4+IPv6"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_family: Option<String>,
    /// Konnectivityが有効か
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub konnectivity_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cluster() -> Cluster {
        Cluster {
            uuid: "c1".to_string(),
            seed_uuid: "s1".to_string(),
            project_uuid: Some("p1".to_string()),
            cni_plugin: CniPluginSettings {
                plugin_type: "cilium".to_string(),
                version: "1.15".to_string(),
            },
            expose_strategy: Some("Tunneling".to_string()),
            etcd_cluster_size: 3,
            kubernetes_server_version: Some("1.29.2".to_string()),
            kubermatic_version: None,
            cloud: Cloud {
                provider_name: Some("aws".to_string()),
                datacenter_uuid: Some("dc".to_string()),
            },
            opa_integration_enabled: true,
            cluster_network: ClusterNetworkingConfig {
                ip_family: Some("IPv4".to_string()),
                konnectivity_enabled: true,
            },
            mla: MlaSettings::default(),
            user_ssh_key_agent_enabled: false,
        }
    }

    #[test]
    fn test_cni_plugin_type_field_name() {
        let json = serde_json::to_value(sample_cluster()).unwrap();
        assert_eq!(json["cni_plugin"]["type"], "cilium");
        assert_eq!(json["cluster_network"]["konnectivity_enabled"], true);
        assert_eq!(json["etcd_cluster_size"], 3);
    }

    #[test]
    fn test_v2_cluster_is_readable_as_v1() {
        let json = serde_json::to_string(&sample_cluster()).unwrap();
        let v1: super::super::v1::Cluster = serde_json::from_str(&json).unwrap();
        assert_eq!(v1.uuid, "c1");
        assert_eq!(v1.project_uuid.as_deref(), Some("p1"));
        assert_eq!(v1.etcd_cluster_size, 3);
        assert_eq!(v1.cloud.provider_name.as_deref(), Some("aws"));
        assert!(v1.opa_integration_enabled);
    }

    #[test]
    fn test_konnectivity_disabled_is_omitted() {
        let mut cluster = sample_cluster();
        cluster.cluster_network = ClusterNetworkingConfig::default();
        let json = serde_json::to_value(cluster).unwrap();
        assert_eq!(json["cluster_network"], serde_json::json!({}));
    }
}
