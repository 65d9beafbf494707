//! # Core Traits (Ports)
//!
//! Any store or collaborator plugin must implement these traits to be used
//! by the binary. Reads and writes are plain async calls; live propagation
//! happens over `tokio::sync::watch` feeds returned by the `watch_*`
//! methods. Dropping a receiver is the unsubscribe; every holder must drop
//! its feed when its owning scope tears down.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::models::{Article, ConfigPatch, Notification, SiteConfig, SocialLink, StatField, Stats};

/// Live feed of the config document. `None` until the document exists.
pub type ConfigFeed = watch::Receiver<Option<SiteConfig>>;
/// Live feed of the articles collection, newest-first.
pub type ArticleFeed = watch::Receiver<Vec<Article>>;
/// Live feed of the links collection, store default order.
pub type LinkFeed = watch::Receiver<Vec<SocialLink>>;
/// Live feed of the stats singleton. `None` until first increment.
pub type StatsFeed = watch::Receiver<Option<Stats>>;
/// Live feed of the most recent notifications, newest-first.
pub type NotificationFeed = watch::Receiver<Vec<Notification>>;

/// Persistence contract for the singleton config document.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Option<SiteConfig>>;

    /// Full-document write. Used only by the first-run bootstrap; admin
    /// save paths must go through `merge`.
    async fn put(&self, config: SiteConfig) -> anyhow::Result<()>;

    /// Merge write: only fields present in the patch change, everything
    /// else keeps its prior value. Creates the document when absent.
    async fn merge(&self, patch: ConfigPatch) -> anyhow::Result<()>;

    fn watch(&self) -> ConfigFeed;
}

/// Persistence contract for articles and links.
#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// All articles ordered by `createdAt` descending.
    async fn list_articles(&self) -> anyhow::Result<Vec<Article>>;
    async fn get_article(&self, id: &str) -> anyhow::Result<Option<Article>>;
    async fn create_article(&self, article: Article) -> anyhow::Result<()>;
    /// Full-field overwrite of the targeted document.
    /// Returns `false` when no document carries the id.
    async fn update_article(&self, id: &str, article: Article) -> anyhow::Result<bool>;
    /// Deleting an absent document is a no-op, matching store semantics.
    async fn delete_article(&self, id: &str) -> anyhow::Result<()>;
    fn watch_articles(&self) -> ArticleFeed;

    /// Links in store default order. No ordering is guaranteed; callers
    /// must not assume display order is creation order.
    async fn list_links(&self) -> anyhow::Result<Vec<SocialLink>>;
    fn watch_links(&self) -> LinkFeed;
}

/// Persistence contract for the usage counters singleton.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Option<Stats>>;

    /// Atomic create-or-increment: an absent document is created with the
    /// targeted field at 1 and the others at 0; otherwise the field grows
    /// by exactly 1. Concurrent increments must never lose updates.
    async fn increment(&self, field: StatField) -> anyhow::Result<Stats>;

    fn watch(&self) -> StatsFeed;
}

/// How many notifications the display feed shows.
pub const RECENT_NOTIFICATIONS: usize = 5;

/// Persistence contract for broadcast notifications. Append-only.
#[async_trait]
pub trait NotificationRepo: Send + Sync {
    async fn append(&self, note: Notification) -> anyhow::Result<()>;
    /// The most recent `limit` notifications, timestamp descending.
    async fn recent(&self, limit: usize) -> anyhow::Result<Vec<Notification>>;
    fn watch_recent(&self) -> NotificationFeed;
}

/// External AI text-generation collaborator. Plain text in, plain text out;
/// failures are opaque and surfaced to the user in the active UI language.
#[async_trait]
pub trait PromptEngine: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
