//! # fd-ui
//!
//! Askama templates for the public pages plus the two display contracts
//! they depend on: the ceiling-of-half content splitter and the ad-slot
//! view model (hidden / placeholder / raw trusted markup).

use askama::Template;
use chrono::DateTime;

use fd_core::models::{Article, Language, SiteConfig, SocialLink};

/// Splits newline-delimited text into two halves for ad interleaving.
/// The first part takes the ceiling of half the lines; single-line text
/// lands entirely in part one.
pub fn split_description(text: &str) -> (String, String) {
    if text.is_empty() {
        return (String::new(), String::new());
    }
    let parts: Vec<&str> = text.split('\n').collect();
    if parts.len() <= 1 {
        return (text.to_string(), String::new());
    }
    let mid = (parts.len() + 1) / 2;
    (parts[..mid].join("\n"), parts[mid..].join("\n"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdSlot {
    Header,
    Mid,
    Bottom,
    Sidebar,
}

impl AdSlot {
    fn label(self) -> &'static str {
        match self {
            AdSlot::Header => "AD BANNER TOP",
            AdSlot::Mid => "AD BANNER MID",
            AdSlot::Bottom => "AD BANNER BOTTOM",
            AdSlot::Sidebar => "SIDEBAR AD",
        }
    }
}

/// Resolved render state of one ad slot.
///
/// Markup is admin-controlled and emitted verbatim, scripts included. That
/// is an explicit trusted-input capability of this system, not something to
/// sanitize here.
#[derive(Debug, Clone)]
pub struct AdSlotView {
    pub enabled: bool,
    pub markup: String,
    pub label: &'static str,
}

impl AdSlotView {
    pub fn resolve(config: &SiteConfig, slot: AdSlot) -> Self {
        let (enabled, markup) = match slot {
            AdSlot::Header => (config.show_header_ad, &config.ad_header),
            AdSlot::Mid => (config.show_mid_ad, &config.ad_mid),
            AdSlot::Bottom => (config.show_bottom_ad, &config.ad_bottom),
            AdSlot::Sidebar => (config.show_sidebar_ad, &config.ad_sidebar),
        };
        Self {
            enabled,
            markup: markup.trim().to_string(),
            label: slot.label(),
        }
    }

    pub fn has_markup(&self) -> bool {
        self.enabled && !self.markup.is_empty()
    }
}

/// Bilingual label set for the public pages.
#[derive(Debug, Clone)]
pub struct Labels {
    pub dir: &'static str,
    pub back: &'static str,
    pub articles: &'static str,
    pub links: &'static str,
    pub no_links: &'static str,
    pub prompt_box: &'static str,
    pub copy: &'static str,
    pub share: &'static str,
    pub not_found: &'static str,
    pub ai_tool: &'static str,
}

impl Labels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self {
                dir: "ltr",
                back: "Back",
                articles: "Articles",
                links: "Important Links",
                no_links: "No links found.",
                prompt_box: "Article Prompt",
                copy: "COPY",
                share: "Share this article",
                not_found: "Article not found",
                ai_tool: "AI Prompt Generator",
            },
            Language::Ar => Self {
                dir: "rtl",
                back: "عودة",
                articles: "المقالات",
                links: "روابط هامة",
                no_links: "لا توجد روابط حالياً.",
                prompt_box: "برومبت المقال",
                copy: "نسخ",
                share: "مشاركة المقال",
                not_found: "المقال غير موجود",
                ai_tool: "مولد البرومبت",
            },
        }
    }
}

fn format_date(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub articles: &'a [Article],
    pub owner_name: String,
    pub owner_email: String,
    pub labels: Labels,
}

impl<'a> HomeTemplate<'a> {
    pub fn new(articles: &'a [Article], config: &SiteConfig, language: Language) -> Self {
        let owner_name = if language.is_arabic() {
            config.owner_name_ar.clone()
        } else {
            config.owner_name_en.clone()
        };
        Self {
            articles,
            owner_name,
            owner_email: config.contact_email.clone(),
            labels: Labels::for_language(language),
        }
    }
}

#[derive(Template)]
#[template(path = "links.html")]
pub struct LinksTemplate<'a> {
    pub links: &'a [SocialLink],
    pub labels: Labels,
}

impl<'a> LinksTemplate<'a> {
    pub fn new(links: &'a [SocialLink], language: Language) -> Self {
        Self {
            links,
            labels: Labels::for_language(language),
        }
    }
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate<'a> {
    pub article: &'a Article,
    pub part1: String,
    pub part2: String,
    pub published: String,
    pub header_ad: AdSlotView,
    pub mid_ad: AdSlotView,
    pub bottom_ad: AdSlotView,
    pub labels: Labels,
}

impl<'a> ArticleTemplate<'a> {
    pub fn new(article: &'a Article, config: &SiteConfig, language: Language) -> Self {
        let (part1, part2) = split_description(&article.description);
        Self {
            article,
            part1,
            part2,
            published: format_date(article.created_at),
            header_ad: AdSlotView::resolve(config, AdSlot::Header),
            mid_ad: AdSlotView::resolve(config, AdSlot::Mid),
            bottom_ad: AdSlotView::resolve(config, AdSlot::Bottom),
            labels: Labels::for_language(language),
        }
    }
}

#[derive(Template)]
#[template(path = "ai.html")]
pub struct AiToolTemplate {
    pub sidebar_ad: AdSlotView,
    pub labels: Labels,
}

impl AiToolTemplate {
    pub fn new(config: &SiteConfig, language: Language) -> Self {
        Self {
            sidebar_ad: AdSlotView::resolve(config, AdSlot::Sidebar),
            labels: Labels::for_language(language),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub labels: Labels,
}

impl NotFoundTemplate {
    pub fn new(language: Language) -> Self {
        Self {
            labels: Labels::for_language(language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_takes_the_ceiling_of_half() {
        let (p1, p2) = split_description("a\nb\nc\nd");
        assert_eq!(p1, "a\nb");
        assert_eq!(p2, "c\nd");

        let (p1, p2) = split_description("a\nb\nc");
        assert_eq!(p1, "a\nb");
        assert_eq!(p2, "c");
    }

    #[test]
    fn single_line_lands_entirely_in_part_one() {
        let (p1, p2) = split_description("only line");
        assert_eq!(p1, "only line");
        assert_eq!(p2, "");

        let (p1, p2) = split_description("");
        assert_eq!(p1, "");
        assert_eq!(p2, "");
    }

    #[test]
    fn ad_slot_states() {
        let mut config = SiteConfig::default();

        // Enabled with blank markup: placeholder.
        let ad = AdSlotView::resolve(&config, AdSlot::Header);
        assert!(ad.enabled);
        assert!(!ad.has_markup());
        assert_eq!(ad.label, "AD BANNER TOP");

        // Enabled with markup: rendered verbatim.
        config.ad_header = " <script src=\"https://ads.example/u.js\"></script> ".into();
        let ad = AdSlotView::resolve(&config, AdSlot::Header);
        assert!(ad.has_markup());
        assert_eq!(ad.markup, "<script src=\"https://ads.example/u.js\"></script>");

        // Toggled off: hidden regardless of markup.
        config.show_header_ad = false;
        let ad = AdSlotView::resolve(&config, AdSlot::Header);
        assert!(!ad.enabled);
        assert!(!ad.has_markup());
    }

    #[test]
    fn article_page_renders_split_and_trusted_markup() {
        let mut config = SiteConfig::bootstrap();
        config.ad_mid = "<div id=\"mid-ad\"></div>".into();
        let article = Article {
            id: "a1".into(),
            title: "Hello <World>".into(),
            description: "a\nb\nc\nd".into(),
            image_url: String::new(),
            category: "AI".into(),
            article_prompt: Some("neon city".into()),
            created_at: 1_700_000_000_000,
        };

        let html = ArticleTemplate::new(&article, &config, Language::En)
            .render()
            .unwrap();
        // Article text is escaped; ad markup is not.
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("<div id=\"mid-ad\"></div>"));
        assert!(html.contains("neon city"));
    }

    #[test]
    fn arabic_labels_switch_direction() {
        let labels = Labels::for_language(Language::Ar);
        assert_eq!(labels.dir, "rtl");
        assert_eq!(labels.back, "عودة");
    }
}
