//! # Fender Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::io;
use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpServer};

use fd_api::handlers::AppState;
use fd_api::middleware;
use fd_core::traits::PromptEngine;
use fd_sync::{Broadcaster, ConfigSynchronizer, ContentService, LoginChallenge, StatsCounter};

// Feature-gated imports: the binary is assembled from whichever plugins
// were compiled in.
#[cfg(feature = "store-memory")]
use fd_store_memory::MemoryStore;

#[cfg(feature = "ai-gemini")]
use fd_ai_gemini::GeminiEngine;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // 1. Initialize the document store
    #[cfg(feature = "store-memory")]
    let store = Arc::new(MemoryStore::new());

    // 2. Attach to the config document, creating first-run defaults if absent
    let config = ConfigSynchronizer::new(store.clone());
    config
        .start()
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    // 3. Initialize the AI collaborator. Missing key is not fatal: the AI
    //    tool degrades to an inline error while the rest of the site runs.
    #[cfg(feature = "ai-gemini")]
    let engine: Option<Box<dyn PromptEngine>> = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Some(Box::new(GeminiEngine::new(key))),
        _ => {
            log::warn!("GEMINI_API_KEY not set; prompt generation is disabled");
            None
        }
    };
    #[cfg(not(feature = "ai-gemini"))]
    let engine: Option<Box<dyn PromptEngine>> = None;

    // 4. Wrap in AppState (dynamic dispatch keeps the handlers plugin-agnostic)
    let state = web::Data::new(AppState {
        config,
        content: ContentService::new(store.clone()),
        stats: StatsCounter::new(store.clone()),
        broadcaster: Broadcaster::new(store),
        engine,
        admin: Mutex::new(LoginChallenge::new()),
    });

    let bind = std::env::var("FENDER_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("🚀 Fender starting on http://{bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(fd_api::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
