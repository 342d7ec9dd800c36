//! レコード型定義
//!
//! エージェントが1回の収集ごとに生成するJSONレコード。
//! `kind`と`version`の組でスキーマを識別する。

use serde::{Deserialize, Serialize};

/// Kubernetesクラスタのレコード
pub mod kubernetes;

/// Kubermaticのレコード
pub mod kubermatic;

/// Kubernetesエージェントのレコード種別
pub const KUBERNETES_KIND: &str = "kubernetes";

/// Kubermaticエージェントのレコード種別
pub const KUBERMATIC_KIND: &str = "kubermatic";

/// レコード種別とスキーマバージョン
///
/// 各レコードのトップレベルに展開される。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindVersion {
    /// レコード種別（"kubernetes" / "kubermatic"）
    pub kind: String,
    /// スキーマバージョン（"v1" / "v2"）
    pub version: String,
}

impl KindVersion {
    /// 種別とバージョンを指定して作成
    pub fn new(kind: &str, version: &str) -> Self {
        Self {
            kind: kind.to_string(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_version_serialize() {
        let kv = KindVersion::new(KUBERNETES_KIND, crate::version::V1_VERSION);
        let json = serde_json::to_value(&kv).unwrap();
        assert_eq!(json["kind"], "kubernetes");
        assert_eq!(json["version"], "v1");
    }
}
