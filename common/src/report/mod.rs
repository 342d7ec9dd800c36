//! レポート型定義
//!
//! レポーターが保存済みレコードをまとめて送信する際のエンベロープ。
//! レコード本体は解釈せず、生のJSONとしてそのまま埋め込む。

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{CommonError, CommonResult};
use crate::version::{V1_VERSION, V2_VERSION};

/// v1レポート
pub mod v1;

/// v2レポート
pub mod v2;

/// IPアドレスから得られる位置情報
///
/// 受信側コレクターがip-apiで補完する。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// 都市名
    #[serde(default)]
    pub city: String,
    /// 国名
    #[serde(default)]
    pub country: String,
    /// 国コード
    #[serde(rename = "countryCode", default)]
    pub country_code: String,
    /// 緯度
    #[serde(rename = "lat", default)]
    pub latitude: f32,
    /// 経度
    #[serde(rename = "lon", default)]
    pub longitude: f32,
    /// 組織名
    #[serde(rename = "org", default)]
    pub organization: String,
    /// IPアドレス
    #[serde(default)]
    pub ip: String,
    /// 地域コード
    #[serde(default)]
    pub region: String,
    /// 地域名
    #[serde(rename = "regionName", default)]
    pub region_name: String,
    /// タイムゾーン
    #[serde(default)]
    pub timezone: String,
    /// 郵便番号
    #[serde(default)]
    pub zip: String,
}

/// レポート共通インターフェース
pub trait Report {
    /// 埋め込まれたレコード一覧
    fn records(&self) -> &[Box<RawValue>];
}

/// バージョン判定用のヘッダー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    /// スキーマバージョン
    pub version: String,
}

/// バージョン別にデコードしたレポート
#[derive(Debug)]
pub enum VersionedReport {
    /// v1レポート
    V1(v1::Report),
    /// v2レポート
    V2(v2::Report),
}

impl VersionedReport {
    /// スキーマバージョン文字列
    pub fn version(&self) -> &str {
        match self {
            Self::V1(report) => &report.version,
            Self::V2(report) => &report.version,
        }
    }
}

impl Report for VersionedReport {
    fn records(&self) -> &[Box<RawValue>] {
        match self {
            Self::V1(report) => report.records(),
            Self::V2(report) => report.records(),
        }
    }
}

/// `version`フィールドを見てレポートをデコードする
pub fn decode(data: &[u8]) -> CommonResult<VersionedReport> {
    let header: Version = serde_json::from_slice(data)?;
    match header.version.as_str() {
        V1_VERSION => Ok(VersionedReport::V1(serde_json::from_slice(data)?)),
        V2_VERSION => Ok(VersionedReport::V2(serde_json::from_slice(data)?)),
        other => Err(CommonError::UnsupportedVersion(other.to_string())),
    }
}

/// 生のJSONバイト列をレコードとして検証する
pub fn raw_record(data: &[u8]) -> CommonResult<Box<RawValue>> {
    let text = std::str::from_utf8(data)
        .map_err(|e| CommonError::Validation(format!("record is not valid UTF-8: {}", e)))?;
    Ok(RawValue::from_string(text.trim().to_string())?)
}
