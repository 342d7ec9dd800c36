//! Telemetry Common
//!
//! エージェントとレポーターで共有するレコード/レポートのスキーマ定義

#![warn(missing_docs)]

/// 匿名化ユーティリティ（ハッシュ・UUID導出）
pub mod anonymize;

/// 共通エラー型
pub mod error;

/// エージェントが生成するレコード型
pub mod record;

/// レポーターが送信するレポート型
pub mod report;

/// スキーマバージョン定数
pub mod version;
