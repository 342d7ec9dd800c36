//! Report assembly
//!
//! A reporter bundles the records agents left in a record directory into one
//! report and hands the serialized report to its [`DataStore`].

pub mod v1;
pub mod v2;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::value::RawValue;
use telemetry_common::error::CommonError;
use telemetry_common::report::raw_record;
use thiserror::Error;
use tracing::{debug, info};

use crate::cluster::ClusterError;
use crate::datastore::{DataStore, DataStoreError};

pub use v1::FileReporter as FileReporterV1;
pub use v2::FileReporter as FileReporterV2;

/// Error types for reporting
#[derive(Debug, Error)]
pub enum ReporterError {
    /// Record path does not exist
    #[error("record path {0} does not exist")]
    NotFound(PathBuf),

    /// Filesystem access failed
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A record file does not hold valid JSON
    #[error("invalid record {path}: {source}")]
    InvalidRecord {
        /// Offending file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: CommonError,
    },

    /// Master node lookup failed
    #[error("failed listing nodes: {0}")]
    Cluster(#[from] ClusterError),

    /// Report could not be serialized
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report could not be stored
    #[error("failed to store report: {0}")]
    Store(#[from] DataStoreError),
}

/// Produces one report per invocation
#[async_trait]
pub trait Reporter: Send + Sync {
    /// Assemble the report from stored records and hand it on
    async fn report(&self) -> Result<(), ReporterError>;
}

/// Location of the records to report
#[derive(Debug, Clone)]
pub struct RecordSource {
    path: PathBuf,
}

impl RecordSource {
    /// Use `path`, which must exist
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ReporterError> {
        let path = path.into();
        if !path.exists() {
            return Err(ReporterError::NotFound(path));
        }
        Ok(Self { path })
    }

    /// Read every record
    ///
    /// A directory yields its regular files in file name order; a file
    /// yields itself.
    pub async fn read_records(&self) -> Result<Vec<Box<RawValue>>, ReporterError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| ReporterError::Io { path, source }
        };

        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(io_error(&self.path))?;

        let files = if metadata.is_dir() {
            let mut files = Vec::new();
            let mut entries = tokio::fs::read_dir(&self.path)
                .await
                .map_err(io_error(&self.path))?;
            while let Some(entry) = entries.next_entry().await.map_err(io_error(&self.path))? {
                let path = entry.path();
                // follows symlinks, so mounted ConfigMap keys count as files
                let metadata = tokio::fs::metadata(&path).await.map_err(io_error(&path))?;
                if metadata.is_file() {
                    files.push(path);
                } else {
                    debug!(path = %path.display(), "Skipping non-file entry");
                }
            }
            files.sort();
            files
        } else {
            vec![self.path.clone()]
        };

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let data = tokio::fs::read(&path).await.map_err(io_error(&path))?;
            let record = raw_record(&data)
                .map_err(|source| ReporterError::InvalidRecord { path, source })?;
            records.push(record);
        }

        info!(records = records.len(), path = %self.path.display(), "Read records");
        Ok(records)
    }
}

pub(crate) async fn store_report<T: serde::Serialize + std::fmt::Display>(
    store: &dyn DataStore,
    report: &T,
) -> Result<(), ReporterError> {
    let data = serde_json::to_vec(report)?;
    info!(report = %report, "Sending report");
    store.store(&data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = RecordSource::new(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ReporterError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reads_directory_in_name_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("record-2.json"), r#"{"n":2}"#).unwrap();
        std::fs::write(dir.path().join("record-1.json"), "{\"n\":1}\n").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let source = RecordSource::new(dir.path()).unwrap();
        let records = source.read_records().await.unwrap();
        let raw: Vec<&str> = records.iter().map(|r| r.get()).collect();
        assert_eq!(raw, vec![r#"{"n":1}"#, r#"{"n":2}"#]);
    }

    #[tokio::test]
    async fn test_reads_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("only.json");
        std::fs::write(&file, r#"{"kind":"kubernetes"}"#).unwrap();

        let records = RecordSource::new(&file).unwrap().read_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(), r#"{"kind":"kubernetes"}"#);
    }

    #[tokio::test]
    async fn test_empty_directory_has_no_records() {
        let dir = TempDir::new().unwrap();
        let records = RecordSource::new(dir.path()).unwrap().read_records().await.unwrap();
        assert!(records.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_symlinked_records() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("..data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(data.join("record.json"), r#"{"kind":"kubermatic"}"#).unwrap();
        std::os::unix::fs::symlink("..data/record.json", dir.path().join("record.json")).unwrap();

        let elsewhere = TempDir::new().unwrap();
        let target = elsewhere.path().join("other.json");
        std::fs::write(&target, r#"{"kind":"kubernetes"}"#).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("z-other.json")).unwrap();

        let records = RecordSource::new(dir.path()).unwrap().read_records().await.unwrap();
        let raw: Vec<&str> = records.iter().map(|r| r.get()).collect();
        assert_eq!(raw, vec![r#"{"kind":"kubermatic"}"#, r#"{"kind":"kubernetes"}"#]);
    }

    #[tokio::test]
    async fn test_invalid_record_names_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.json"), "not json").unwrap();

        let err = RecordSource::new(dir.path())
            .unwrap()
            .read_records()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
