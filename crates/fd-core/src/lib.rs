//! fender/crates/fd-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Fender.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn bootstrap_carries_first_run_defaults() {
        let cfg = SiteConfig::bootstrap();
        assert_eq!(cfg.allowed_email, "admin@fender.ai");
        assert_eq!(cfg.password, "password123");
        assert_eq!(cfg.owner_name_en, "Ahmed Farag");
        assert_eq!(cfg.owner_name_ar, "أحمد فرج");
        assert_eq!(cfg.contact_email, "ahmedtaktok917@gmail.com");
        assert_eq!(cfg.site_logo, "");
        assert_eq!(cfg.owner_image, "");
        for slot in [&cfg.ad_header, &cfg.ad_mid, &cfg.ad_bottom, &cfg.ad_sidebar] {
            assert_eq!(slot, "");
        }
        assert!(cfg.show_header_ad && cfg.show_mid_ad && cfg.show_bottom_ad && cfg.show_sidebar_ad);
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let mut cfg = SiteConfig::bootstrap();
        cfg.ad_header = "<script>ad()</script>".into();

        let patch = ConfigPatch {
            owner_name_en: Some("X".into()),
            ..ConfigPatch::default()
        };
        patch.apply_to(&mut cfg);

        assert_eq!(cfg.owner_name_en, "X");
        assert_eq!(cfg.ad_header, "<script>ad()</script>");
        assert_eq!(cfg.allowed_email, "admin@fender.ai");
    }

    #[test]
    fn config_deserializes_with_every_field_absent() {
        let cfg: SiteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.owner_name_en, "");
        // Absent toggles read as enabled.
        assert!(cfg.show_sidebar_ad);
    }

    #[test]
    fn article_keeps_persisted_field_names() {
        let article = Article {
            id: "a1".into(),
            title: "Hello".into(),
            description: "p1\np2".into(),
            image_url: "https://img".into(),
            category: "AI".into(),
            article_prompt: None,
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["imageUrl"], "https://img");
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert!(json.get("article_prompt").is_none());
    }

    #[test]
    fn unknown_platform_falls_back_to_website() {
        let link: SocialLink =
            serde_json::from_str(r#"{"id":"l1","platform":"myspace","url":"https://x"}"#).unwrap();
        assert_eq!(link.platform, Platform::Website);
        let stats: Stats = serde_json::from_str(r#"{"visitors":3,"linkClicks":1}"#).unwrap();
        assert_eq!(stats.link_clicks, 1);
        assert_eq!(stats.prompt_copies, 0);
    }
}
