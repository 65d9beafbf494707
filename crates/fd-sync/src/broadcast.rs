//! Append-only notification broadcast. Anyone may read the capped recent
//! feed; this is a deliberate public broadcast, not a private inbox.

use std::sync::Arc;

use uuid::Uuid;

use fd_core::error::{AppError, Result};
use fd_core::models::{now_millis, Notification};
use fd_core::traits::{NotificationFeed, NotificationRepo, RECENT_NOTIFICATIONS};

#[derive(Clone)]
pub struct Broadcaster {
    repo: Arc<dyn NotificationRepo>,
}

impl Broadcaster {
    pub fn new(repo: Arc<dyn NotificationRepo>) -> Self {
        Self { repo }
    }

    /// Appends a notification stamped with the current time. Empty or
    /// whitespace-only messages are rejected before any store call.
    pub async fn broadcast(&self, message: &str) -> Result<Notification> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::ValidationError(
                "broadcast message must not be empty".into(),
            ));
        }
        let note = Notification {
            id: Uuid::now_v7().to_string(),
            message: message.to_string(),
            timestamp: now_millis(),
            read: false,
        };
        self.repo
            .append(note.clone())
            .await
            .map_err(AppError::store)?;
        log::info!("broadcast sent: {}", note.id);
        Ok(note)
    }

    /// The most recent notifications, newest first, capped for display.
    pub async fn recent(&self) -> Result<Vec<Notification>> {
        self.repo
            .recent(RECENT_NOTIFICATIONS)
            .await
            .map_err(AppError::store)
    }

    pub fn subscribe(&self) -> NotificationFeed {
        self.repo.watch_recent()
    }
}
