//! Document store client

use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Per-request ceiling for store writes.
const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

/// A single write failure. Isolated per record by the uploader.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status} for {doc_id}")]
    Status {
        doc_id: String,
        status: reqwest::StatusCode,
    },
}

/// Thin PUT client for the document index.
#[derive(Debug, Clone)]
pub struct DocStore {
    base_url: String,
    client: reqwest::Client,
}

impl DocStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(WRITE_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    /// PUT one serialized record under `doc_id`.
    ///
    /// The response status and body are logged; no response field is
    /// consumed programmatically.
    pub async fn put_document(&self, doc_id: &str, payload: String) -> Result<(), StoreError> {
        let uri = format!("{}/{}", self.base_url, doc_id);
        let response = self
            .client
            .put(&uri)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        info!(%doc_id, %status, body = %body, "store write response");

        if !status.is_success() {
            return Err(StoreError::Status {
                doc_id: doc_id.to_string(),
                status,
            });
        }

        Ok(())
    }
}
