//! # fd-store-memory
//!
//! In-process implementation of the document-store ports. Stands in for the
//! managed real-time database: every successful write publishes a fresh
//! snapshot over a `tokio::sync::watch` channel, so the writer observes its
//! own write immediately and every other subscriber is pushed the new state.
//!
//! Consistency notes:
//! - Each collection is guarded by its own mutex; updates within one feed
//!   are delivered in commit order. No cross-collection ordering exists.
//! - Config merges resolve per field, last write wins. The merge itself is
//!   atomic under the lock, so no partial document is ever observable.
//! - Stats increments are create-or-increment under the lock and can never
//!   lose updates to a concurrent writer.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;

use fd_core::models::{
    Article, ConfigPatch, Notification, SiteConfig, SocialLink, StatField, Stats,
};
use fd_core::traits::{
    ArticleFeed, ConfigFeed, ConfigStore, ContentRepo, LinkFeed, NotificationFeed,
    NotificationRepo, StatsFeed, StatsStore, RECENT_NOTIFICATIONS,
};

/// A mutex poisoned by a panicking writer still holds consistent data for
/// our usage (all mutations complete before unlock), so recover the guard.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MemoryStore {
    config: Mutex<Option<SiteConfig>>,
    config_tx: watch::Sender<Option<SiteConfig>>,

    articles: Mutex<HashMap<String, Article>>,
    articles_tx: watch::Sender<Vec<Article>>,

    links: Mutex<Vec<SocialLink>>,
    links_tx: watch::Sender<Vec<SocialLink>>,

    stats: Mutex<Option<Stats>>,
    stats_tx: watch::Sender<Option<Stats>>,

    notifications: Mutex<Vec<Notification>>,
    notifications_tx: watch::Sender<Vec<Notification>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (config_tx, _) = watch::channel(None);
        let (articles_tx, _) = watch::channel(Vec::new());
        let (links_tx, _) = watch::channel(Vec::new());
        let (stats_tx, _) = watch::channel(None);
        let (notifications_tx, _) = watch::channel(Vec::new());
        Self {
            config: Mutex::new(None),
            config_tx,
            articles: Mutex::new(HashMap::new()),
            articles_tx,
            links: Mutex::new(Vec::new()),
            links_tx,
            stats: Mutex::new(None),
            stats_tx,
            notifications: Mutex::new(Vec::new()),
            notifications_tx,
        }
    }

    /// Loads externally-managed links. The links collection has no admin
    /// surface in this system; deployments seed it out of band.
    pub fn seed_links(&self, links: Vec<SocialLink>) {
        let mut guard = lock(&self.links);
        *guard = links.clone();
        drop(guard);
        self.links_tx.send_replace(links);
    }

    /// Articles snapshot in display order: `createdAt` descending, id as a
    /// stable tie-breaker.
    fn article_snapshot(map: &HashMap<String, Article>) -> Vec<Article> {
        let mut items: Vec<Article> = map.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    fn recent_snapshot(all: &[Notification], limit: usize) -> Vec<Notification> {
        let mut items = all.to_vec();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items.truncate(limit);
        items
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn fetch(&self) -> anyhow::Result<Option<SiteConfig>> {
        Ok(lock(&self.config).clone())
    }

    async fn put(&self, config: SiteConfig) -> anyhow::Result<()> {
        let mut guard = lock(&self.config);
        *guard = Some(config.clone());
        drop(guard);
        self.config_tx.send_replace(Some(config));
        Ok(())
    }

    async fn merge(&self, patch: ConfigPatch) -> anyhow::Result<()> {
        let mut guard = lock(&self.config);
        // Merging against a missing document creates it, patch over safe
        // defaults, matching the managed store's merge-on-write behavior.
        let mut next = guard.clone().unwrap_or_default();
        patch.apply_to(&mut next);
        *guard = Some(next.clone());
        drop(guard);
        self.config_tx.send_replace(Some(next));
        Ok(())
    }

    fn watch(&self) -> ConfigFeed {
        self.config_tx.subscribe()
    }
}

#[async_trait]
impl ContentRepo for MemoryStore {
    async fn list_articles(&self) -> anyhow::Result<Vec<Article>> {
        Ok(Self::article_snapshot(&lock(&self.articles)))
    }

    async fn get_article(&self, id: &str) -> anyhow::Result<Option<Article>> {
        Ok(lock(&self.articles).get(id).cloned())
    }

    async fn create_article(&self, article: Article) -> anyhow::Result<()> {
        let mut guard = lock(&self.articles);
        guard.insert(article.id.clone(), article);
        let snapshot = Self::article_snapshot(&guard);
        drop(guard);
        self.articles_tx.send_replace(snapshot);
        Ok(())
    }

    async fn update_article(&self, id: &str, article: Article) -> anyhow::Result<bool> {
        let mut guard = lock(&self.articles);
        if !guard.contains_key(id) {
            return Ok(false);
        }
        guard.insert(id.to_string(), article);
        let snapshot = Self::article_snapshot(&guard);
        drop(guard);
        self.articles_tx.send_replace(snapshot);
        Ok(true)
    }

    async fn delete_article(&self, id: &str) -> anyhow::Result<()> {
        let mut guard = lock(&self.articles);
        if guard.remove(id).is_none() {
            // Absent target: deletion is a no-op, not an error.
            return Ok(());
        }
        let snapshot = Self::article_snapshot(&guard);
        drop(guard);
        self.articles_tx.send_replace(snapshot);
        Ok(())
    }

    fn watch_articles(&self) -> ArticleFeed {
        self.articles_tx.subscribe()
    }

    async fn list_links(&self) -> anyhow::Result<Vec<SocialLink>> {
        Ok(lock(&self.links).clone())
    }

    fn watch_links(&self) -> LinkFeed {
        self.links_tx.subscribe()
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn fetch(&self) -> anyhow::Result<Option<Stats>> {
        Ok(*lock(&self.stats))
    }

    async fn increment(&self, field: StatField) -> anyhow::Result<Stats> {
        let mut guard = lock(&self.stats);
        let mut next = match *guard {
            Some(current) => current,
            None => {
                log::info!("stats document created on first increment");
                Stats::default()
            }
        };
        match field {
            StatField::Visitors => next.visitors += 1,
            StatField::LinkClicks => next.link_clicks += 1,
            StatField::PromptCopies => next.prompt_copies += 1,
        }
        *guard = Some(next);
        drop(guard);
        self.stats_tx.send_replace(Some(next));
        Ok(next)
    }

    fn watch(&self) -> StatsFeed {
        self.stats_tx.subscribe()
    }
}

#[async_trait]
impl NotificationRepo for MemoryStore {
    async fn append(&self, note: Notification) -> anyhow::Result<()> {
        let mut guard = lock(&self.notifications);
        guard.push(note);
        let snapshot = Self::recent_snapshot(&guard, RECENT_NOTIFICATIONS);
        drop(guard);
        self.notifications_tx.send_replace(snapshot);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> anyhow::Result<Vec<Notification>> {
        Ok(Self::recent_snapshot(&lock(&self.notifications), limit))
    }

    fn watch_recent(&self) -> NotificationFeed {
        self.notifications_tx.subscribe()
    }
}
