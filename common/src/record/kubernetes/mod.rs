//! Kubernetesレコード

/// v1スキーマ
pub mod v1;
