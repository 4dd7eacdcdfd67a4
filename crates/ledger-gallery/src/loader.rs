//! Keeps at most one gallery fetch in flight and publishes its outcome.

use crate::client::AirtableClient;
use crate::record::Record;
use crate::view::GalleryState;
use crate::Result;
use async_trait::async_trait;
use futures::future::{AbortHandle, Aborted, abortable};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Anything that can list the records of a table view.
#[async_trait]
pub trait RecordSource: Send + Sync + 'static {
    async fn list_records(&self, table: &str, view: &str) -> Result<Vec<Record>>;
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn list_records(&self, table: &str, view: &str) -> Result<Vec<Record>> {
        AirtableClient::list_records(self, table, view).await
    }
}

pub struct GalleryLoader<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<GalleryState>>,
    key: Option<(String, String)>,
    in_flight: Option<AbortHandle>,
    generation: Arc<AtomicU64>,
}

impl<S: RecordSource> GalleryLoader<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(GalleryState::default());
        Self {
            source: Arc::new(source),
            state: Arc::new(state),
            key: None,
            in_flight: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GalleryState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GalleryState {
        self.state.borrow().clone()
    }

    /// Starts a fetch for `(table, view)` unless that is already the current key. A different key
    /// aborts the fetch in flight. Returns whether a fetch was started.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request(&mut self, table: &str, view: &str) -> bool {
        if self
            .key
            .as_ref()
            .is_some_and(|(t, v)| t == table && v == view)
        {
            return false;
        }
        self.cancel();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.key = Some((table.to_string(), view.to_string()));
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
            s.records.clear();
            s.selected = None;
        });

        let source = Arc::clone(&self.source);
        let (table, view) = (table.to_string(), view.to_string());
        let (fetch, handle) = abortable(async move { source.list_records(&table, &view).await });
        self.in_flight = Some(handle);

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        tokio::spawn(async move {
            let result = match fetch.await {
                Ok(result) => result,
                Err(Aborted) => {
                    tracing::debug!(generation, "gallery fetch aborted");
                    return;
                }
            };
            // Checked under the channel lock so a newer request cannot interleave.
            state.send_if_modified(|s| {
                if current.load(Ordering::SeqCst) != generation {
                    tracing::debug!(generation, "ignoring stale gallery result");
                    return false;
                }
                s.loading = false;
                match result {
                    Ok(records) => s.records = records,
                    Err(err) => {
                        tracing::warn!(error = %err, "gallery fetch failed");
                        s.error = Some(err.to_string());
                    }
                }
                true
            });
        });
        true
    }

    /// Opens the detail view for a loaded record.
    pub fn select(&self, id: &str) -> bool {
        self.state.send_if_modified(|s| {
            if s.selected.as_deref() == Some(id) || !s.records.iter().any(|r| r.id == id) {
                return false;
            }
            s.selected = Some(id.to_string());
            true
        })
    }

    pub fn close(&self) -> bool {
        self.state.send_if_modified(|s| s.selected.take().is_some())
    }

    /// Cancels any fetch and forgets the current key. Results that still arrive are dropped.
    pub fn teardown(&mut self) {
        self.cancel();
        self.key = None;
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl<S> Drop for GalleryLoader<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
