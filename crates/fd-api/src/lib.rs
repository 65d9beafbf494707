//! # fd-api
//!
//! The web routing and orchestration layer for Fender: JSON endpoints under
//! `/api` plus HTML views over the same data model.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the site.
///
/// # Developer Note
/// We use a scoped configuration so the binary can mount the API under a
/// different prefix if a deployment ever needs it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Config document
            .route("/config", web::get().to(handlers::get_config))
            .route("/config/stream", web::get().to(handlers::stream_config))
            // Articles & links (public reads; /stream before the {id} catch-all)
            .route("/articles", web::get().to(handlers::list_articles))
            .route("/articles/stream", web::get().to(handlers::stream_articles))
            .route("/articles/{id}", web::get().to(handlers::get_article))
            .route("/links", web::get().to(handlers::list_links))
            .route("/links/stream", web::get().to(handlers::stream_links))
            // Notifications (public broadcast feed)
            .route("/notifications", web::get().to(handlers::recent_notifications))
            // Usage counters
            .route("/stats", web::get().to(handlers::get_stats))
            .route("/stats/visit", web::post().to(handlers::record_visit))
            .route("/stats/link-click", web::post().to(handlers::record_link_click))
            .route("/stats/prompt-copy", web::post().to(handlers::record_prompt_copy))
            // AI tool
            .route("/ai/generate", web::post().to(handlers::generate_prompt))
            // Admin console
            .route("/admin/login/email", web::post().to(handlers::login_email))
            .route("/admin/login/password", web::post().to(handlers::login_password))
            .route("/admin/logout", web::post().to(handlers::logout))
            .route("/admin/config", web::put().to(handlers::save_config))
            .route("/admin/articles", web::get().to(handlers::admin_list_articles))
            .route("/admin/articles", web::post().to(handlers::create_article))
            .route("/admin/articles/{id}", web::put().to(handlers::update_article))
            .route("/admin/articles/{id}", web::delete().to(handlers::delete_article))
            .route("/admin/notifications", web::post().to(handlers::send_notification)),
    )
    // HTML views
    .route("/", web::get().to(handlers::home_page))
    .route("/links", web::get().to(handlers::links_page))
    .route("/ai-tools", web::get().to(handlers::ai_page))
    .route("/article/{id}", web::get().to(handlers::article_page));
}
