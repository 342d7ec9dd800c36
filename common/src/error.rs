//! エラー型定義
//!
//! 共通レイヤーの統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Common layer result type
pub type CommonResult<T> = Result<T, CommonError>;
