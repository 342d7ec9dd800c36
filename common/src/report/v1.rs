//! v1レポート
//!
//! マスタークラスタのノードIPとコレクターが補完する位置情報を持つ。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::Location;
use crate::version::V1_VERSION;

/// v1レポート
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    /// スキーマバージョン（"v1"）
    pub version: String,
    /// レポート生成時刻（UTC）
    pub time: DateTime<Utc>,
    /// 送信元クライアントのUUID
    pub client_uuid: String,
    /// マスタークラスタノードの外部IP
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub master_ip: String,
    /// 位置情報
    #[serde(default)]
    pub location: Location,
    /// 埋め込まれたレコード
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Box<RawValue>>,
}

impl Report {
    /// 現在時刻で空のレポートを作成
    pub fn new(client_uuid: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            version: V1_VERSION.to_string(),
            time,
            client_uuid: client_uuid.into(),
            master_ip: String::new(),
            location: Location::default(),
            records: Vec::new(),
        }
    }

    /// 位置情報を設定
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

impl super::Report for Report {
    fn records(&self) -> &[Box<RawValue>] {
        &self.records
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Report version: {}, time: {}, clientUUID: {}",
            self.version, self.time, self.client_uuid
        )
    }
}
