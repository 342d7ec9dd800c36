//! Record persistence backends
//!
//! Every backend accepts arbitrary raw JSON bytes. Agents write records
//! through a [`DataStore`]; the reporter writes its aggregated report through
//! one as well, so the same three sinks serve both sides of the pipeline.

mod file;
mod http;
mod stdout;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use http::{HttpStore, DEFAULT_HTTP_TIMEOUT};
pub use stdout::StdoutStore;

/// Error types for data store operations
#[derive(Debug, Error)]
pub enum DataStoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path the operation was performed on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The record directory exists but is not a directory
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    /// No unused record file name could be found
    #[error("could not find an unused record file name in {0}")]
    NameExhausted(PathBuf),

    /// Payload is not valid JSON
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Writing to the output stream failed
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote endpoint answered with a non-success status
    #[error("{url} returned {status}: {body}")]
    UnexpectedStatus {
        /// Target URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Response body (may be empty)
        body: String,
    },
}

/// Sink for raw JSON records and reports
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Persist or forward one JSON document
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError>;
}

#[async_trait]
impl<T: DataStore + ?Sized> DataStore for std::sync::Arc<T> {
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError> {
        (**self).store(data).await
    }
}

#[async_trait]
impl<T: DataStore + ?Sized> DataStore for Box<T> {
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError> {
        (**self).store(data).await
    }
}
