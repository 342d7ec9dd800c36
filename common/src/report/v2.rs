//! v2レポート
//!
//! v1の`location`を送信元（クライアント）とマスタークラスタの2つに分けたもの。
//! いずれもコレクター側でIPから補完される。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::Location;
use crate::version::V2_VERSION;

/// v2レポート
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    /// スキーマバージョン（"v2"）
    pub version: String,
    /// レポート生成時刻（UTC）
    pub time: DateTime<Utc>,
    /// 送信元クライアントのUUID
    pub client_uuid: String,
    /// HTTPリクエスト元IPから得た位置情報
    #[serde(default)]
    pub client_location: Location,
    /// マスタークラスタノードのIPから得た位置情報
    #[serde(default)]
    pub master_location: Location,
    /// 埋め込まれたレコード
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Box<RawValue>>,
}

impl Report {
    /// 空のレポートを作成
    pub fn new(client_uuid: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            version: V2_VERSION.to_string(),
            time,
            client_uuid: client_uuid.into(),
            client_location: Location::default(),
            master_location: Location::default(),
            records: Vec::new(),
        }
    }

    /// クライアントの位置情報を設定
    pub fn set_client_location(&mut self, location: Location) {
        self.client_location = location;
    }

    /// マスタークラスタの位置情報を設定
    pub fn set_master_location(&mut self, location: Location) {
        self.master_location = location;
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
