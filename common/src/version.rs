//! スキーマバージョン
//!
//! レコード・レポートの`version`フィールドに書き込まれる値。
//! 新しいバージョンは既存フィールドを削除せず、追加のみ行う。

/// 初版スキーマ
pub const V1_VERSION: &str = "v1";

/// 第2版スキーマ（v1への追加のみ）
pub const V2_VERSION: &str = "v2";
