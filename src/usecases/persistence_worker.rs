//! Async task: listens to catalog change events and saves snapshots.
//!
//! Runs alongside the UI. Keeps storage I/O out of the synchronous mutation path.
//! Each save writes the latest snapshot, so bursts of changes collapse into few writes.

use crate::domain::{CatalogEvent, CatalogStore};
use crate::ports::CatalogRepoPort;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

/// Persistence worker. Consumes store events and saves via CatalogRepoPort.
pub struct PersistenceWorker {
    store: Arc<CatalogStore>,
    repo: Arc<dyn CatalogRepoPort>,
    rx: broadcast::Receiver<CatalogEvent>,
    saved_revision: u64,
}

impl PersistenceWorker {
    /// Subscribes immediately, so no change made after construction is missed.
    /// The store's current revision counts as already persisted.
    pub fn new(store: Arc<CatalogStore>, repo: Arc<dyn CatalogRepoPort>) -> Self {
        let rx = store.subscribe();
        let saved_revision = store.revision();
        Self {
            store,
            repo,
            rx,
            saved_revision,
        }
    }

    /// Run the worker until `shutdown` fires (or its sender is dropped).
    /// Unsaved changes are flushed before returning.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                received = self.rx.recv() => match received {
                    Ok(event) => {
                        debug!(revision = event.revision, change = ?event.change, "change received");
                        self.save_if_stale().await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "persistence worker lagged; saving latest snapshot");
                        self.save_if_stale().await;
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        self.save_if_stale().await;
        info!(revision = self.saved_revision, "persistence worker finished");
    }

    /// Saves the current snapshot unless it is already on record.
    async fn save_if_stale(&mut self) {
        let snapshot = self.store.snapshot();
        if snapshot.revision <= self.saved_revision {
            return;
        }
        match self.repo.save(&snapshot).await {
            Ok(()) => {
                debug!(revision = snapshot.revision, "catalog snapshot saved");
                self.saved_revision = snapshot.revision;
            }
            Err(e) => {
                error!(revision = snapshot.revision, error = %e, "catalog save failed");
            }
        }
    }
}
