//! CRUD over the articles collection plus the read-only links collection,
//! with the built-in sample fallback that keeps a fresh deployment's UI
//! populated before any real article exists.

use std::sync::Arc;

use uuid::Uuid;

use fd_core::error::{AppError, Result};
use fd_core::models::{now_millis, Article, ArticleDraft, SocialLink};
use fd_core::traits::{ArticleFeed, ContentRepo, LinkFeed};

/// Ids starting with this prefix resolve from the built-in sample set and
/// are rejected on every write path, so persisted articles can never shadow
/// or mutate a sample.
pub const SAMPLE_ID_PREFIX: &str = "sample-";

/// The fixed placeholder set shown while the articles collection is empty.
/// Display-only; never persisted.
pub fn sample_articles() -> Vec<Article> {
    let now = now_millis();
    vec![
        Article {
            id: "sample-1".into(),
            title: "The Future of Generative AI".into(),
            description: "Generative AI is rapidly evolving, moving beyond simple text prompts to complex multimodal interactions. As models like Gemini 1.5 Pro and GPT-4o emerge, the barrier between human creativity and machine execution blurs.\n\nIn this article, we explore how these advancements are reshaping digital art, coding, and even strategic decision-making. The future isn't just about \"generating\" content; it's about \"collaborating\" with intelligence.\n\nKey takeaways include:\n- The rise of long-context windows.\n- Multimodal reasoning capabilities.\n- The democratization of high-end creative tools.".into(),
            image_url: "https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&q=80&w=800".into(),
            category: "AI Trends".into(),
            article_prompt: Some("A futuristic digital art studio with holographic displays floating in mid-air, a human artist collaborating with a glowing AI entity, cyberpunk aesthetic, neon blue and purple lighting, cinematic composition, 8k resolution, unreal engine 5 render.".into()),
            created_at: now,
        },
        Article {
            id: "sample-2".into(),
            title: "Prompt Engineering 101".into(),
            description: "Prompt engineering is the new coding. It requires a mix of logic, creativity, and linguistic precision. To get the best out of LLMs, one must understand the nuances of context, persona, and constraints.\n\nThis guide covers the \"Chain of Thought\" prompting technique, few-shot learning, and how to structure your requests for maximum fidelity. Whether you are generating code or writing a novel, the quality of your output depends entirely on the quality of your input.".into(),
            image_url: "https://images.unsplash.com/photo-1620712943543-bcc4688e7485?auto=format&fit=crop&q=80&w=800".into(),
            category: "Tutorials".into(),
            article_prompt: Some("A close-up macro shot of a glowing fiber optic cable connecting to a human brain synapse, representing the connection between human language and machine logic, blue and gold color palette, depth of field, high detail.".into()),
            created_at: now - 100_000,
        },
        Article {
            id: "sample-3".into(),
            title: "Cyberpunk Aesthetics".into(),
            description: "Neon lights, rain-slicked streets, and high-tech low-life. Cyberpunk is more than just a visual style; it is a commentary on the convergence of technology and society.\n\nFrom \"Blade Runner\" to modern UI design, the cyberpunk aesthetic influences color palettes (cyan/magenta), typography (glitch/mono), and layout (grid-breaking). Learn how to incorporate these elements into your web projects without sacrificing usability.".into(),
            image_url: "https://images.unsplash.com/photo-1535378437327-1e649afc20f1?auto=format&fit=crop&q=80&w=800".into(),
            category: "Design".into(),
            article_prompt: Some("A rainy futuristic Tokyo street at night, neon signs reflecting on wet pavement, a cyborg figure in a trench coat walking away from camera, blade runner style, atmospheric lighting, volumetric fog, cinematic.".into()),
            created_at: now - 200_000,
        },
    ]
}

/// New article ids are UUID v7 strings: time-ordered, and structurally
/// incapable of starting with the reserved sample prefix.
fn new_article_id() -> String {
    Uuid::now_v7().to_string()
}

#[derive(Clone)]
pub struct ContentService {
    repo: Arc<dyn ContentRepo>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepo>) -> Self {
        Self { repo }
    }

    /// Public listing, newest-first. Substitutes the sample set while the
    /// collection is empty; the moment one real article exists only store
    /// content is returned.
    pub async fn list_articles(&self) -> Result<Vec<Article>> {
        let stored = self.repo.list_articles().await.map_err(AppError::store)?;
        if stored.is_empty() {
            Ok(sample_articles())
        } else {
            Ok(stored)
        }
    }

    /// Admin listing: raw store contents, no sample substitution, so the
    /// workshop always shows what is actually persisted.
    pub async fn list_published(&self) -> Result<Vec<Article>> {
        self.repo.list_articles().await.map_err(AppError::store)
    }

    /// Not-found is `Ok(None)`, a terminal state for the caller to render,
    /// never an error.
    pub async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        if id.starts_with(SAMPLE_ID_PREFIX) {
            return Ok(sample_articles().into_iter().find(|a| a.id == id));
        }
        self.repo.get_article(id).await.map_err(AppError::store)
    }

    pub async fn create_article(&self, draft: ArticleDraft) -> Result<Article> {
        if draft.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "article title must not be empty".into(),
            ));
        }
        let article = Article {
            id: new_article_id(),
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            category: draft.category,
            article_prompt: normalize_prompt(draft.article_prompt),
            created_at: now_millis(),
        };
        self.repo
            .create_article(article.clone())
            .await
            .map_err(AppError::store)?;
        log::info!("article published: {}", article.id);
        Ok(article)
    }

    /// Full-field overwrite of an existing article. The original creation
    /// timestamp is preserved so the listing order does not jump on edit.
    pub async fn update_article(&self, id: &str, draft: ArticleDraft) -> Result<Article> {
        reject_reserved_id(id)?;
        if draft.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "article title must not be empty".into(),
            ));
        }
        let existing = self
            .repo
            .get_article(id)
            .await
            .map_err(AppError::store)?
            .ok_or_else(|| AppError::NotFound("Article".into(), id.into()))?;
        let article = Article {
            id: id.to_string(),
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            category: draft.category,
            article_prompt: normalize_prompt(draft.article_prompt),
            created_at: existing.created_at,
        };
        let found = self
            .repo
            .update_article(id, article.clone())
            .await
            .map_err(AppError::store)?;
        if !found {
            return Err(AppError::NotFound("Article".into(), id.into()));
        }
        Ok(article)
    }

    /// Caller-side confirmation is a UI concern; the service dispatches
    /// unconditionally. Deleting an absent id is a no-op.
    pub async fn delete_article(&self, id: &str) -> Result<()> {
        reject_reserved_id(id)?;
        self.repo.delete_article(id).await.map_err(AppError::store)
    }

    pub fn watch_articles(&self) -> ArticleFeed {
        self.repo.watch_articles()
    }

    pub async fn list_links(&self) -> Result<Vec<SocialLink>> {
        self.repo.list_links().await.map_err(AppError::store)
    }

    pub fn watch_links(&self) -> LinkFeed {
        self.repo.watch_links()
    }
}

fn reject_reserved_id(id: &str) -> Result<()> {
    if id.starts_with(SAMPLE_ID_PREFIX) {
        return Err(AppError::ValidationError(format!(
            "the '{SAMPLE_ID_PREFIX}' id prefix is reserved for built-in samples"
        )));
    }
    Ok(())
}

fn normalize_prompt(prompt: Option<String>) -> Option<String> {
    prompt.filter(|p| !p.trim().is_empty())
}
