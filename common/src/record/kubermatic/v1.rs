//! Kubermaticレコード v1
//!
//! シード・ユーザークラスタ・ユーザー・プロジェクト・SSHキーの構成情報。
//! 名前はすべて[`generate_uuid`](crate::anonymize::generate_uuid)で導出したUUIDに置き換える。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::KindVersion;

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

/// シード情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seed {
    /// シード名から導出したUUID
    pub uuid: String,
    /// ISO-3166の2文字国コード（例: DE）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// 詳細な設置場所（例: "Hamburg"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// 公開方式（未指定の場合はマスターのデフォルト）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose_strategy: Option<String>,
    /// このシードに属するデータセンター（名前順）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datacenters: Vec<Datacenter>,
}

/// データセンター情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Datacenter {
    /// データセンター名から導出したUUID
    pub uuid: String,
    /// ISO-3166の2文字国コード
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// 詳細な設置場所
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// クラウドプロバイダー名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// クラウドプロバイダーのリージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
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
    /// 公開方式（NodePort / LoadBalancer / Tunneling）
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
    /// 監視・ロギング・アラート設定
    #[serde(default)]
    pub mla: MlaSettings,
    /// ユーザーSSHキーエージェントをデプロイするか
    #[serde(default)]
    pub user_ssh_key_agent_enabled: bool,
}

/// クラウドプロバイダー設定
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cloud {
    /// プロバイダー名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    /// データセンターのUUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_uuid: Option<String>,
}

/// MLA（Monitoring, Logging, Alerting）設定
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MlaSettings {
    /// ユーザークラスタの監視が有効か
    #[serde(default)]
    pub monitoring_enabled: bool,
    /// ユーザークラスタのロギングが有効か
    #[serde(default)]
    pub logging_enabled: bool,
}

/// プロジェクト情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// プロジェクト名から導出したUUID
    pub uuid: String,
}

/// ユーザー情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// ユーザー名から導出したUUID
    pub uuid: String,
    /// 管理者権限を持つか
    #[serde(default)]
    pub is_admin: bool,
}

/// SSHキー情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SshKey {
    /// キー名から導出したUUID
    pub uuid: String,
    /// 所有プロジェクトのUUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_project_uuid: Option<String>,
    /// キーが割り当てられたクラスタのUUID
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_uuids: Vec<String>,
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
