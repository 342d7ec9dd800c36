//! Local directory store
//!
//! Each call writes one `record-<random>.json` file. Files are created with
//! `create_new`, so an existing record is never overwritten; on a name
//! collision another name is drawn.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{DataStore, DataStoreError};

const MAX_NAME_ATTEMPTS: usize = 8;

/// Writes each document to a new file in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
    next_id: fn() -> u64,
}

impl FileStore {
    /// Create a store writing into `directory`
    ///
    /// The directory is checked on every store call, not here, so the store
    /// can be built before the volume is mounted.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            next_id: rand::random::<u64>,
        }
    }

    #[cfg(test)]
    fn with_id_source(directory: impl Into<PathBuf>, next_id: fn() -> u64) -> Self {
        Self {
            directory: directory.into(),
            next_id,
        }
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> DataStoreError {
        DataStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl DataStore for FileStore {
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError> {
        let metadata = tokio::fs::metadata(&self.directory)
            .await
            .map_err(|e| self.io_error(&self.directory, e))?;
        if !metadata.is_dir() {
            return Err(DataStoreError::NotADirectory(self.directory.clone()));
        }

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = self
                .directory
                .join(format!("record-{}.json", (self.next_id)()));

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&filename)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(filename = %filename.display(), "Record file name taken, drawing another");
                    continue;
                }
                Err(e) => return Err(self.io_error(&filename, e)),
            };

            file.write_all(data)
                .await
                .map_err(|e| self.io_error(&filename, e))?;
            file.flush()
                .await
                .map_err(|e| self.io_error(&filename, e))?;

            info!(filename = %filename.display(), "Stored data on disk");
            return Ok(());
        }

        Err(DataStoreError::NameExhausted(self.directory.clone()))
    }
}
