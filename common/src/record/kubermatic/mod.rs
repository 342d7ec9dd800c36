//! Kubermaticレコード
//!
//! v2はv1のフィールドをすべて保持したまま、エディション・CNI・
//! クラスタネットワーク設定を追加したスキーマ。

/// v1スキーマ
pub mod v1;

/// v2スキーマ
pub mod v2;
