//! Bounded fan-out upload of flat records to the document store
//!
//! One write task per record, admitted through a counting semaphore so
//! that at most `concurrency` writes are ever in flight. The dispatch loop
//! suspends on admission; already-dispatched writes run to completion
//! regardless. Write failures are logged and never surfaced to the caller.

use crate::relabel::relabel_payload;
use crate::store::{DocStore, StoreError};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, error};

/// Failure to encode a record before dispatch.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Document identifier for the record at `seq` within one upload call.
///
/// The counter is local to the call and follows iteration order, not date
/// order. Repeating a call with the same `index_name` reuses the same
/// identifiers and overwrites the previous documents.
pub fn document_id(index_name: &str, seq: usize) -> String {
    format!("{index_name}{seq}")
}

/// Serializes records in iteration order, pairing each with its identifier.
fn to_payloads<T: Serialize>(
    records: &[T],
    index_name: &str,
) -> Result<Vec<(String, String)>, UploadError> {
    records
        .iter()
        .enumerate()
        .map(|(seq, record)| {
            Ok((document_id(index_name, seq), serde_json::to_string(record)?))
        })
        .collect()
}

/// Spawns one write task per payload, admitting at most `concurrency` at a
/// time. Returns once every task is spawned; writes may still be in flight.
async fn dispatch<W, Fut>(payloads: Vec<(String, String)>, concurrency: usize, write: W)
where
    W: Fn(String, String) -> Fut,
    Fut: Future<Output = Result<(), StoreError>> + Send + 'static,
{
    let slots = Arc::new(Semaphore::new(concurrency.max(1)));

    for (doc_id, payload) in payloads {
        debug!(%doc_id, payload = %payload, "dispatching record");

        // Suspends the dispatch loop, not the in-flight writes. The
        // semaphore is never closed, so acquisition cannot fail.
        let Ok(permit) = slots.clone().acquire_owned().await else {
            break;
        };

        let request = write(doc_id.clone(), payload);
        tokio::spawn(async move {
            if let Err(e) = request.await {
                error!(%doc_id, "store write failed: {e}");
            }
            // Slot freed on success and failure alike.
            drop(permit);
        });
    }
}

/// Serializes `records`, assigns `index_name` + sequence-number document
/// identifiers in iteration order, and dispatches one bounded write per
/// record through `write`.
///
/// Returns once every write is dispatched; completion is not awaited and
/// individual write failures are logged, not returned. Callers that need
/// completion or per-document results must layer their own barrier on top.
pub async fn upload_with<T, W, Fut>(
    records: &[T],
    index_name: &str,
    concurrency: usize,
    write: W,
) -> Result<(), UploadError>
where
    T: Serialize,
    W: Fn(String, String) -> Fut,
    Fut: Future<Output = Result<(), StoreError>> + Send + 'static,
{
    let payloads = to_payloads(records, index_name)?;
    dispatch(payloads, concurrency, write).await;
    Ok(())
}

/// Uploads flat records to the document index with a bounded number of
/// writes in flight.
#[derive(Debug, Clone)]
pub struct Uploader {
    store: DocStore,
}

impl Uploader {
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }

    /// Upload records under `index_name` + sequence-number identifiers.
    pub async fn upload<T: Serialize>(
        &self,
        records: &[T],
        index_name: &str,
        concurrency: usize,
    ) -> Result<(), UploadError> {
        let payloads = to_payloads(records, index_name)?;
        self.dispatch_to_store(payloads, concurrency).await;
        Ok(())
    }

    /// Like [`Uploader::upload`], for window-parameterized metrics: the
    /// generic average field in each serialized payload is relabeled with
    /// the window suffix of `index_name` before transmission.
    pub async fn upload_windowed<T: Serialize>(
        &self,
        records: &[T],
        index_name: &str,
        concurrency: usize,
    ) -> Result<(), UploadError> {
        let mut payloads = to_payloads(records, index_name)?;
        for (_, payload) in &mut payloads {
            *payload = relabel_payload(payload, index_name);
        }
        self.dispatch_to_store(payloads, concurrency).await;
        Ok(())
    }

    async fn dispatch_to_store(&self, payloads: Vec<(String, String)>, concurrency: usize) {
        let store = self.store.clone();
        dispatch(payloads, concurrency, move |doc_id, payload| {
            let store = store.clone();
            async move { store.put_document(&doc_id, payload).await }
        })
        .await;
    }
}
