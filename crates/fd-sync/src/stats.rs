//! Usage counters. Everything goes through the store's atomic
//! create-or-increment so concurrent visitors never lose updates to a
//! read-modify-write race.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fd_core::error::{AppError, Result};
use fd_core::models::{StatField, Stats};
use fd_core::traits::{StatsFeed, StatsStore};

#[derive(Clone)]
pub struct StatsCounter {
    store: Arc<dyn StatsStore>,
}

impl StatsCounter {
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        Self { store }
    }

    /// One page-session load. Callers must invoke this once per session,
    /// not per re-render; use [`VisitTracker`] to enforce that.
    pub async fn record_visit(&self) -> Result<Stats> {
        self.increment(StatField::Visitors).await
    }

    pub async fn record_link_click(&self) -> Result<Stats> {
        self.increment(StatField::LinkClicks).await
    }

    /// Fired on every successful clipboard copy in the AI tool.
    pub async fn record_prompt_copy(&self) -> Result<Stats> {
        self.increment(StatField::PromptCopies).await
    }

    /// Current counters, zeroed while the document does not exist yet.
    pub async fn current(&self) -> Result<Stats> {
        Ok(self
            .store
            .fetch()
            .await
            .map_err(AppError::store)?
            .unwrap_or_default())
    }

    /// Read-only live feed for display surfaces.
    pub fn subscribe(&self) -> StatsFeed {
        self.store.watch()
    }

    async fn increment(&self, field: StatField) -> Result<Stats> {
        self.store.increment(field).await.map_err(AppError::store)
    }
}

/// Session-scoped guard around visit recording. A view tree may call
/// [`VisitTracker::record`] on every re-render; only the first call per
/// session reaches the store, so the counter is never inflated.
pub struct VisitTracker {
    counter: StatsCounter,
    recorded: AtomicBool,
}

impl VisitTracker {
    pub fn new(counter: StatsCounter) -> Self {
        Self {
            counter,
            recorded: AtomicBool::new(false),
        }
    }

    pub async fn record(&self) -> Result<()> {
        if self.recorded.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Err(err) = self.counter.record_visit().await {
            // The visit was not persisted; allow a later retry to count.
            self.recorded.store(false, Ordering::SeqCst);
            return Err(err);
        }
        Ok(())
    }
}
