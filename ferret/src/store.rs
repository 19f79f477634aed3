//! IndexStore: the load-at-most-once document cache.
//!
//! Lifecycle: `Unloaded → Loading → Ready`. `Ready` is terminal for the
//! store's lifetime; a failed load settles to the empty index rather than
//! surfacing an error, so a broken index renders exactly like an index with
//! no matching content.
//!
//! Concurrency: the cache cell is a one-shot async cell. Every concurrent
//! caller awaits the same in-flight initialization and observes the same
//! settled `Arc`: at most one fetch per store, by construction rather than
//! by a racy flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::models::Document;
use crate::source::IndexSource;

/// Where the store is in its load-once lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready,
}

pub struct IndexStore {
    source: Box<dyn IndexSource>,
    docs: OnceCell<Arc<Vec<Document>>>,
    load_started: AtomicBool,
}

impl IndexStore {
    pub fn new(source: impl IndexSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            docs: OnceCell::new(),
            load_started: AtomicBool::new(false),
        }
    }

    /// The index, fetching it on first use. Never fails: any source error
    /// is logged and settles the store to the empty index.
    pub async fn ensure_loaded(&self) -> Arc<Vec<Document>> {
        self.docs
            .get_or_init(|| async {
                self.load_started.store(true, Ordering::Release);
                match self.source.fetch_index().await {
                    Ok(docs) => {
                        tracing::debug!(count = docs.len(), "search index loaded");
                        Arc::new(docs)
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "search index unavailable");
                        Arc::new(Vec::new())
                    }
                }
            })
            .await
            .clone()
    }

    /// The cached index without triggering I/O.
    pub fn cached(&self) -> Option<Arc<Vec<Document>>> {
        self.docs.get().cloned()
    }

    pub fn state(&self) -> LoadState {
        if self.docs.initialized() {
            LoadState::Ready
        } else if self.load_started.load(Ordering::Acquire) {
            LoadState::Loading
        } else {
            LoadState::Unloaded
        }
    }
}
