//! # fd-api Handlers
//!
//! Coordinates the flow between HTTP requests and the sync services. Every
//! failure degrades to a visible response: validation stops before any
//! store call (400), store failures surface as transient inline errors
//! (500, logged), unresolved ids are a terminal not-found state (404).

use std::sync::{Mutex, MutexGuard, PoisonError};

use actix_web::{web, HttpResponse};
use askama::Template;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::watch;

use fd_core::error::AppError;
use fd_core::models::{ArticleDraft, ConfigPatch, Language};
use fd_core::traits::PromptEngine;
use fd_sync::{Broadcaster, ConfigSynchronizer, ContentService, LoginChallenge, StatsCounter};
use fd_ui::{AiToolTemplate, ArticleTemplate, HomeTemplate, LinksTemplate, NotFoundTemplate};

/// State shared across all workers.
pub struct AppState {
    pub config: ConfigSynchronizer,
    pub content: ContentService,
    pub stats: StatsCounter,
    pub broadcaster: Broadcaster,
    /// Absent when no API key is configured; the AI tool degrades to an
    /// inline error instead of failing the whole site.
    pub engine: Option<Box<dyn PromptEngine>>,
    /// The single ephemeral admin session. Nothing is persisted; a process
    /// restart de-authenticates.
    pub admin: Mutex<LoginChallenge>,
}

fn lock(admin: &Mutex<LoginChallenge>) -> MutexGuard<'_, LoginChallenge> {
    admin.lock().unwrap_or_else(PoisonError::into_inner)
}

fn error_response(err: AppError) -> HttpResponse {
    match &err {
        AppError::ValidationError(msg) => {
            HttpResponse::BadRequest().json(json!({ "error": msg }))
        }
        AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({ "error": msg })),
        AppError::NotFound(..) => HttpResponse::NotFound().json(json!({ "error": err.to_string() })),
        AppError::Internal(_) => {
            log::error!("store operation failed: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "operation failed" }))
        }
    }
}

/// Gate for admin write endpoints. Returns the rejection response when the
/// session has not completed the two-step challenge.
fn admin_guard(state: &AppState) -> Option<HttpResponse> {
    if lock(&state.admin).is_authenticated() {
        None
    } else {
        Some(HttpResponse::Unauthorized().json(json!({ "error": "Access Denied" })))
    }
}

fn render(result: Result<String, askama::Error>, status: actix_web::http::StatusCode) -> HttpResponse {
    match result {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(err) => {
            log::error!("template rendering failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    lang: Option<Language>,
}

impl LangQuery {
    fn language(&self) -> Language {
        self.lang.unwrap_or(Language::En)
    }
}

// ---- Config document ----

pub async fn get_config(state: web::Data<AppState>) -> HttpResponse {
    match state.config.current().await {
        Ok(cfg) => HttpResponse::Ok().json(cfg),
        Err(err) => error_response(err),
    }
}

/// Merge write: only fields present in the submitted patch change, so the
/// identity and monetization panels can save independently without erasing
/// each other's fields.
pub async fn save_config(state: web::Data<AppState>, patch: web::Json<ConfigPatch>) -> HttpResponse {
    if let Some(denied) = admin_guard(&state) {
        return denied;
    }
    match state.config.save(patch.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "saved" })),
        Err(err) => {
            log::error!("config save failed: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "Error saving settings." }))
        }
    }
}

/// Server-sent events over a live feed: the current snapshot first, then
/// every subsequent commit until the client disconnects (dropping the
/// stream drops the subscription).
fn sse_feed<T>(feed: watch::Receiver<T>) -> HttpResponse
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    let stream = futures_util::stream::unfold((feed, true), |(mut feed, first)| async move {
        if !first && feed.changed().await.is_err() {
            return None;
        }
        let snapshot = feed.borrow_and_update().clone();
        let payload = serde_json::to_string(&snapshot).unwrap_or_else(|_| "null".to_string());
        let frame = web::Bytes::from(format!("data: {payload}\n\n"));
        Some((Ok::<_, actix_web::Error>(frame), (feed, false)))
    });
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream)
}

pub async fn stream_config(state: web::Data<AppState>) -> HttpResponse {
    sse_feed(state.config.subscribe())
}

pub async fn stream_articles(state: web::Data<AppState>) -> HttpResponse {
    sse_feed(state.content.watch_articles())
}

pub async fn stream_links(state: web::Data<AppState>) -> HttpResponse {
    sse_feed(state.content.watch_links())
}

// ---- Articles & links ----

pub async fn list_articles(state: web::Data<AppState>) -> HttpResponse {
    match state.content.list_articles().await {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(err) => error_response(err),
    }
}

pub async fn get_article(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.content.get_article(&id).await {
        Ok(Some(article)) => HttpResponse::Ok().json(article),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Article not found" })),
        Err(err) => error_response(err),
    }
}

pub async fn admin_list_articles(state: web::Data<AppState>) -> HttpResponse {
    if let Some(denied) = admin_guard(&state) {
        return denied;
    }
    match state.content.list_published().await {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(err) => error_response(err),
    }
}

pub async fn create_article(
    state: web::Data<AppState>,
    draft: web::Json<ArticleDraft>,
) -> HttpResponse {
    if let Some(denied) = admin_guard(&state) {
        return denied;
    }
    match state.content.create_article(draft.into_inner()).await {
        Ok(article) => HttpResponse::Created().json(article),
        Err(err) => error_response(err),
    }
}

pub async fn update_article(
    state: web::Data<AppState>,
    path: web::Path<String>,
    draft: web::Json<ArticleDraft>,
) -> HttpResponse {
    if let Some(denied) = admin_guard(&state) {
        return denied;
    }
    match state
        .content
        .update_article(&path.into_inner(), draft.into_inner())
        .await
    {
        Ok(article) => HttpResponse::Ok().json(article),
        Err(err) => error_response(err),
    }
}

/// Deletion is confirmed client-side before this is dispatched; the server
/// deletes unconditionally.
pub async fn delete_article(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    if let Some(denied) = admin_guard(&state) {
        return denied;
    }
    match state.content.delete_article(&path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

pub async fn list_links(state: web::Data<AppState>) -> HttpResponse {
    match state.content.list_links().await {
        Ok(links) => HttpResponse::Ok().json(links),
        Err(err) => error_response(err),
    }
}

// ---- Notifications ----

pub async fn recent_notifications(state: web::Data<AppState>) -> HttpResponse {
    match state.broadcaster.recent().await {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct BroadcastForm {
    #[serde(default)]
    message: String,
}

pub async fn send_notification(
    state: web::Data<AppState>,
    form: web::Json<BroadcastForm>,
) -> HttpResponse {
    if let Some(denied) = admin_guard(&state) {
        return denied;
    }
    match state.broadcaster.broadcast(&form.message).await {
        Ok(note) => HttpResponse::Created().json(note),
        Err(err) => error_response(err),
    }
}

// ---- Usage counters ----

pub async fn get_stats(state: web::Data<AppState>) -> HttpResponse {
    match state.stats.current().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err),
    }
}

/// One call per page-session; the client holds the session guard.
pub async fn record_visit(state: web::Data<AppState>) -> HttpResponse {
    match state.stats.record_visit().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err),
    }
}

pub async fn record_link_click(state: web::Data<AppState>) -> HttpResponse {
    match state.stats.record_link_click().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err),
    }
}

pub async fn record_prompt_copy(state: web::Data<AppState>) -> HttpResponse {
    match state.stats.record_prompt_copy().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(err) => error_response(err),
    }
}

// ---- AI tool ----

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    language: Option<Language>,
}

pub async fn generate_prompt(
    state: web::Data<AppState>,
    form: web::Json<GenerateForm>,
) -> HttpResponse {
    let prompt = form.prompt.trim();
    if prompt.is_empty() {
        // Validation failure: no collaborator call, no error document.
        return HttpResponse::BadRequest().json(json!({ "error": "prompt must not be empty" }));
    }
    let language = form.language.unwrap_or(Language::En);
    let failure = if language.is_arabic() {
        "خطأ: لا يمكن معالجة الطلب. تحقق من إعدادات API."
    } else {
        "Error: Could not process request. Check API configuration."
    };
    let Some(engine) = state.engine.as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({ "error": failure }));
    };
    match engine.generate(prompt).await {
        Ok(text) => HttpResponse::Ok().json(json!({ "text": text })),
        Err(err) => {
            // Opaque collaborator: log the cause, surface a generic error
            // in the active UI language.
            log::error!("prompt generation failed: {err}");
            HttpResponse::BadGateway().json(json!({ "error": failure }))
        }
    }
}

// ---- Admin session gate ----

#[derive(Debug, Deserialize)]
pub struct EmailForm {
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    password: String,
}

pub async fn login_email(state: web::Data<AppState>, form: web::Json<EmailForm>) -> HttpResponse {
    let cfg = match state.config.current().await {
        Ok(cfg) => cfg,
        Err(err) => return error_response(err),
    };
    let mut challenge = lock(&state.admin);
    match challenge.submit_email(&cfg, &form.email) {
        Ok(()) => HttpResponse::Ok().json(json!({ "step": "password" })),
        Err(err) => error_response(err),
    }
}

pub async fn login_password(
    state: web::Data<AppState>,
    form: web::Json<PasswordForm>,
) -> HttpResponse {
    let cfg = match state.config.current().await {
        Ok(cfg) => cfg,
        Err(err) => return error_response(err),
    };
    let mut challenge = lock(&state.admin);
    match challenge.submit_password(&cfg, &form.password) {
        Ok(()) => HttpResponse::Ok().json(json!({ "authenticated": true })),
        Err(err) => error_response(err),
    }
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    lock(&state.admin).logout();
    HttpResponse::Ok().json(json!({ "authenticated": false }))
}

// ---- HTML views ----

pub async fn home_page(state: web::Data<AppState>, query: web::Query<LangQuery>) -> HttpResponse {
    let language = query.language();
    let articles = match state.content.list_articles().await {
        Ok(articles) => articles,
        Err(err) => return error_response(err),
    };
    let cfg = match state.config.current().await {
        Ok(cfg) => cfg,
        Err(err) => return error_response(err),
    };
    render(
        HomeTemplate::new(&articles, &cfg, language).render(),
        actix_web::http::StatusCode::OK,
    )
}

pub async fn links_page(state: web::Data<AppState>, query: web::Query<LangQuery>) -> HttpResponse {
    let language = query.language();
    match state.content.list_links().await {
        Ok(links) => render(
            LinksTemplate::new(&links, language).render(),
            actix_web::http::StatusCode::OK,
        ),
        Err(err) => error_response(err),
    }
}

pub async fn ai_page(state: web::Data<AppState>, query: web::Query<LangQuery>) -> HttpResponse {
    let language = query.language();
    match state.config.current().await {
        Ok(cfg) => render(
            AiToolTemplate::new(&cfg, language).render(),
            actix_web::http::StatusCode::OK,
        ),
        Err(err) => error_response(err),
    }
}

pub async fn article_page(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LangQuery>,
) -> HttpResponse {
    let language = query.language();
    let id = path.into_inner();
    let cfg = match state.config.current().await {
        Ok(cfg) => cfg,
        Err(err) => return error_response(err),
    };
    match state.content.get_article(&id).await {
        Ok(Some(article)) => render(
            ArticleTemplate::new(&article, &cfg, language).render(),
            actix_web::http::StatusCode::OK,
        ),
        // Not-found is a rendered terminal state, not an exception path.
        Ok(None) => render(
            NotFoundTemplate::new(language).render(),
            actix_web::http::StatusCode::NOT_FOUND,
        ),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, App};
    use serde_json::Value;

    use fd_store_memory::MemoryStore;

    use super::*;
    use crate::configure_routes;

    async fn state() -> web::Data<AppState> {
        let store = Arc::new(MemoryStore::new());
        let config = ConfigSynchronizer::new(store.clone());
        config.start().await.unwrap();
        web::Data::new(AppState {
            config,
            content: ContentService::new(store.clone()),
            stats: StatsCounter::new(store.clone()),
            broadcaster: Broadcaster::new(store),
            engine: None,
            admin: Mutex::new(LoginChallenge::new()),
        })
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! login {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/admin/login/email")
                .set_json(json!({ "email": "admin@fender.ai" }))
                .to_request();
            assert!(test::call_service($app, req).await.status().is_success());

            let req = test::TestRequest::post()
                .uri("/api/admin/login/password")
                .set_json(json!({ "password": "password123" }))
                .to_request();
            assert!(test::call_service($app, req).await.status().is_success());
        }};
    }

    #[actix_web::test]
    async fn admin_writes_require_authentication() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::put()
            .uri("/api/admin/config")
            .set_json(json!({ "owner_name_en": "Intruder" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let req = test::TestRequest::post()
            .uri("/api/admin/notifications")
            .set_json(json!({ "message": "hi" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn two_step_login_gates_on_each_credential() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/admin/login/email")
            .set_json(json!({ "email": "nobody@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Identity not recognized"));

        let req = test::TestRequest::post()
            .uri("/api/admin/login/email")
            .set_json(json!({ "email": "admin@fender.ai" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/admin/login/password")
            .set_json(json!({ "password": "letmein" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Incorrect credentials"));

        // Still at step 2: the right password now completes the challenge.
        let req = test::TestRequest::post()
            .uri("/api/admin/login/password")
            .set_json(json!({ "password": "password123" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    #[actix_web::test]
    async fn config_save_merges_only_submitted_fields() {
        let state = state().await;
        let app = app!(state);
        login!(&app);

        let req = test::TestRequest::put()
            .uri("/api/admin/config")
            .set_json(json!({ "owner_name_en": "New Name" }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/api/config").to_request();
        let cfg: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cfg["owner_name_en"], "New Name");
        // Untouched fields kept their bootstrap values.
        assert_eq!(cfg["contact_email"], "ahmedtaktok917@gmail.com");
        assert_eq!(cfg["show_header_ad"], true);
    }

    #[actix_web::test]
    async fn article_lifecycle_over_http() {
        let state = state().await;
        let app = app!(state);
        login!(&app);

        let req = test::TestRequest::post()
            .uri("/api/admin/articles")
            .set_json(json!({
                "title": "Launch Notes",
                "description": "line one\nline two",
                "imageUrl": "https://img.example/cover.png",
                "category": "News"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/articles/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["title"], "Launch Notes");
        assert_eq!(fetched["imageUrl"], "https://img.example/cover.png");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/admin/articles/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 204);

        let req = test::TestRequest::get()
            .uri(&format!("/api/articles/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn empty_store_serves_samples_publicly_only() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/articles").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed[0]["id"], "sample-1");

        login!(&app);
        let req = test::TestRequest::get()
            .uri("/api/admin/articles")
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 0);
    }

    #[actix_web::test]
    async fn collection_streams_answer_as_server_sent_events() {
        let state = state().await;
        let app = app!(state);

        for uri in [
            "/api/config/stream",
            "/api/articles/stream",
            "/api/links/stream",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success(), "{uri}");
            assert_eq!(
                resp.headers().get("content-type").unwrap(),
                "text/event-stream",
                "{uri}"
            );
        }
    }

    #[actix_web::test]
    async fn visit_endpoint_increments_the_counter() {
        let state = state().await;
        let app = app!(state);

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/stats/visit")
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["visitors"], 2);
        assert_eq!(stats["linkClicks"], 0);
    }

    #[actix_web::test]
    async fn generation_without_an_engine_degrades_localized() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/ai/generate")
            .set_json(json!({ "prompt": "مدينة نيون", "language": "ar" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("خطأ"));
    }

    #[actix_web::test]
    async fn article_page_renders_and_unknown_id_is_404_html() {
        let state = state().await;
        let app = app!(state);

        let req = test::TestRequest::get().uri("/article/sample-1").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("The Future of Generative AI"));

        let req = test::TestRequest::get().uri("/article/ghost").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Article not found"));
    }
}
