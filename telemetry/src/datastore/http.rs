//! HTTP store
//!
//! POSTs each document to a collector URL. Anything but a 2xx answer is an
//! error; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};

use super::{DataStore, DataStoreError};

/// Default request timeout
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Forwards documents to a remote collector
#[derive(Debug, Clone)]
pub struct HttpStore {
    url: String,
    client: Client,
}

impl HttpStore {
    /// Store posting to `url` with the given request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DataStoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(url, client))
    }

    /// Store posting to `url` through a caller-provided client
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl DataStore for HttpStore {
    async fn store(&self, data: &[u8]) -> Result<(), DataStoreError> {
        info!(target_url = %self.url, bytes = data.len(), "Sending data via HTTP");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(data.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataStoreError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = %status, "Collector accepted data");
        Ok(())
    }
}
