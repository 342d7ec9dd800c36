//! Kubernetesレコード v1
//!
//! ノードごとのOS・ランタイム・容量情報。ノード名は含めず、
//! 識別子にはハッシュ値を用いる。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::KindVersion;

/// Kubernetesクラスタのレコード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// 種別とバージョン
    #[serde(flatten)]
    pub kind_version: KindVersion,
    /// レコード生成時刻（UTC）
    pub time: DateTime<Utc>,
    /// APIサーバーのKubernetesバージョン
    pub kubernetes_version: String,
    /// ノード情報の一覧
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
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

/// ノード情報
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// ノードを一意に識別する値
    ///
    /// ノード名・マシンID・システムUUIDから導出したハッシュ。
    /// 個人を特定できる情報をそのまま含めてはならない。
    pub id: String,
    /// ノードステータスが報告するOS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    /// ノードステータスが報告するOSイメージ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_image: Option<String>,
    /// カーネルバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel_version: Option<String>,
    /// CPUアーキテクチャ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    /// コンテナランタイムのバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_runtime_version: Option<String>,
    /// kubeletのバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet_version: Option<String>,
    /// ProviderIDの`<ProviderName>`部分
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<String>,
    /// リソース容量（リソース名順）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capacity: Vec<Resource>,
}

/// リソース容量
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// リソース名
    pub resource: String,
    /// 値の文字列表現
    pub value: String,
}
