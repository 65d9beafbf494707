//! Owns the singleton config document: first-run bootstrap, merge-only
//! writes from admin forms, and the live feed every page subscribes to.

use std::sync::Arc;

use fd_core::error::{AppError, Result};
use fd_core::models::{ConfigPatch, SiteConfig};
use fd_core::traits::{ConfigFeed, ConfigStore};

#[derive(Clone)]
pub struct ConfigSynchronizer {
    store: Arc<dyn ConfigStore>,
}

impl ConfigSynchronizer {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Attaches to the config document and returns its live feed, creating
    /// the document with first-run defaults when absent.
    ///
    /// The bootstrap races other cold-starting instances. Every racer
    /// writes the same complete document and the store resolves last write
    /// wins, so no partial state can survive; an existing document is never
    /// overwritten.
    pub async fn start(&self) -> Result<ConfigFeed> {
        if self.store.fetch().await.map_err(AppError::store)?.is_none() {
            self.store
                .put(SiteConfig::bootstrap())
                .await
                .map_err(AppError::store)?;
            log::info!("config document created: admin_config/settings");
        }
        Ok(self.store.watch())
    }

    /// Current document, or safe defaults while none exists yet.
    pub async fn current(&self) -> Result<SiteConfig> {
        Ok(self
            .store
            .fetch()
            .await
            .map_err(AppError::store)?
            .unwrap_or_default())
    }

    /// Merge write from an admin form. Only the fields present in the patch
    /// change; fields owned by other admin panels keep their values.
    pub async fn save(&self, patch: ConfigPatch) -> Result<()> {
        self.store.merge(patch).await.map_err(AppError::store)
    }

    pub fn subscribe(&self) -> ConfigFeed {
        self.store.watch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fd_store_memory::MemoryStore;

    #[tokio::test]
    async fn start_bootstraps_absent_document() {
        let store = Arc::new(MemoryStore::new());
        let sync = ConfigSynchronizer::new(store);

        let feed = sync.start().await.unwrap();
        let cfg = feed.borrow().clone().unwrap();
        assert_eq!(cfg, SiteConfig::bootstrap());
    }

    #[tokio::test]
    async fn start_never_overwrites_existing_document() {
        let store = Arc::new(MemoryStore::new());
        let sync = ConfigSynchronizer::new(store);
        sync.start().await.unwrap();

        let patch = ConfigPatch {
            owner_name_en: Some("Edited".into()),
            ..ConfigPatch::default()
        };
        sync.save(patch).await.unwrap();

        // A second cold start must leave the admin edit in place.
        sync.start().await.unwrap();
        assert_eq!(sync.current().await.unwrap().owner_name_en, "Edited");
    }

    #[tokio::test]
    async fn concurrent_bootstraps_converge_on_complete_defaults() {
        let store = Arc::new(MemoryStore::new());
        let a = ConfigSynchronizer::new(store.clone());
        let b = ConfigSynchronizer::new(store);

        let (ra, rb) = tokio::join!(a.start(), b.start());
        ra.unwrap();
        rb.unwrap();

        // Whoever won, the surviving document is the full default set.
        assert_eq!(a.current().await.unwrap(), SiteConfig::bootstrap());
    }

    #[tokio::test]
    async fn save_fans_out_to_all_subscribers() {
        let store = Arc::new(MemoryStore::new());
        let sync = ConfigSynchronizer::new(store);
        let mut feed = sync.start().await.unwrap();
        feed.borrow_and_update();

        let patch = ConfigPatch {
            site_logo: Some("https://cdn/logo.png".into()),
            ..ConfigPatch::default()
        };
        sync.save(patch).await.unwrap();

        feed.changed().await.unwrap();
        let cfg = feed.borrow_and_update().clone().unwrap();
        assert_eq!(cfg.site_logo, "https://cdn/logo.png");
        // Untouched fields survived the merge.
        assert_eq!(cfg.password, "password123");
    }
}
