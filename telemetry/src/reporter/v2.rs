//! v2 report
//!
//! Client and master locations are left empty; the collector fills them in
//! from the request it receives.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use telemetry_common::report::v2::Report;

use super::{store_report, RecordSource, Reporter, ReporterError};
use crate::datastore::DataStore;

/// Reports records from disk as a v2 report
pub struct FileReporter {
    source: RecordSource,
    client_uuid: String,
    store: Arc<dyn DataStore>,
}

impl FileReporter {
    /// Create a reporter; `source` must already exist
    pub fn new(
        source: RecordSource,
        client_uuid: impl Into<String>,
        store: Arc<dyn DataStore>,
    ) -> Self {
        Self {
            source,
            client_uuid: client_uuid.into(),
            store,
        }
    }

    /// Build the report without storing it
    pub async fn build(&self) -> Result<Report, ReporterError> {
        let mut report = Report::new(self.client_uuid.clone(), Utc::now());
        report.records = self.source.read_records().await?;
        Ok(report)
    }
}

#[async_trait]
impl Reporter for FileReporter {
    async fn report(&self) -> Result<(), ReporterError> {
        let report = self.build().await?;
        store_report(self.store.as_ref(), &report).await
    }
}
