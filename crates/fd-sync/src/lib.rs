//! # fd-sync
//!
//! The synchronization services: everything between admin form state and the
//! document store. Each service wraps one port, validates before any store
//! call, and exposes the store's live feed to its consumers. All propagation
//! is push-based; nothing here polls.

pub mod broadcast;
pub mod config;
pub mod content;
pub mod context;
pub mod session;
pub mod stats;

pub use broadcast::Broadcaster;
pub use config::ConfigSynchronizer;
pub use content::{sample_articles, ContentService, SAMPLE_ID_PREFIX};
pub use context::AppContext;
pub use session::{LoginChallenge, LoginStep};
pub use stats::{StatsCounter, VisitTracker};
