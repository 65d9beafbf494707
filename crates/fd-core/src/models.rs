//! # Domain Models
//!
//! These structs mirror the persisted document shapes of the Fender site.
//! Serde renames keep the on-the-wire field names (`imageUrl`, `createdAt`,
//! `linkClicks`) stable across deployments that already hold data.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current wall-clock time as epoch milliseconds, the timestamp unit every
/// persisted document uses.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn default_true() -> bool {
    true
}

/// The singleton site configuration document (`admin_config/settings`).
///
/// Exactly one exists per deployment. Every field is optional on the wire;
/// absent fields deserialize to a safe default (empty string, `true` for the
/// ad toggles) so readers never have to special-case a half-written document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site_logo: String,
    #[serde(default)]
    pub owner_image: String,

    /// Advisory access gate. Compared verbatim; this is a deliberate
    /// non-cryptographic placeholder, not a security boundary.
    #[serde(default)]
    pub allowed_email: String,
    #[serde(default)]
    pub password: String,

    // Owner identity
    #[serde(default)]
    pub owner_name_en: String,
    #[serde(default)]
    pub owner_name_ar: String,
    #[serde(default)]
    pub contact_email: String,

    // Social counters. Counts are free-form strings ("1.5M" is valid).
    #[serde(default)]
    pub youtube_count: String,
    #[serde(default)]
    pub youtube_url: String,
    #[serde(default)]
    pub tiktok_count: String,
    #[serde(default)]
    pub tiktok_url: String,
    #[serde(default)]
    pub facebook_count: String,
    #[serde(default)]
    pub facebook_url: String,
    #[serde(default)]
    pub instagram_count: String,
    #[serde(default)]
    pub instagram_url: String,

    // Ad slot toggles. Absent reads as enabled.
    #[serde(default = "default_true")]
    pub show_header_ad: bool,
    #[serde(default = "default_true")]
    pub show_mid_ad: bool,
    #[serde(default = "default_true")]
    pub show_bottom_ad: bool,
    #[serde(default = "default_true")]
    pub show_sidebar_ad: bool,

    // Ad slot markup. Raw HTML/JS supplied by the admin, rendered verbatim.
    #[serde(default)]
    pub ad_header: String,
    #[serde(default)]
    pub ad_mid: String,
    #[serde(default)]
    pub ad_bottom: String,
    #[serde(default)]
    pub ad_sidebar: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_logo: String::new(),
            owner_image: String::new(),
            allowed_email: String::new(),
            password: String::new(),
            owner_name_en: String::new(),
            owner_name_ar: String::new(),
            contact_email: String::new(),
            youtube_count: String::new(),
            youtube_url: String::new(),
            tiktok_count: String::new(),
            tiktok_url: String::new(),
            facebook_count: String::new(),
            facebook_url: String::new(),
            instagram_count: String::new(),
            instagram_url: String::new(),
            show_header_ad: true,
            show_mid_ad: true,
            show_bottom_ad: true,
            show_sidebar_ad: true,
            ad_header: String::new(),
            ad_mid: String::new(),
            ad_bottom: String::new(),
            ad_sidebar: String::new(),
        }
    }
}

impl SiteConfig {
    /// The complete first-run document written when no config exists yet.
    /// Keeps the public site fully functional before any admin edit.
    pub fn bootstrap() -> Self {
        Self {
            allowed_email: "admin@fender.ai".into(),
            password: "password123".into(),
            owner_name_en: "Ahmed Farag".into(),
            owner_name_ar: "أحمد فرج".into(),
            contact_email: "ahmedtaktok917@gmail.com".into(),
            ..Self::default()
        }
    }
}

macro_rules! merge_fields {
    ($patch:expr, $cfg:expr, $($field:ident),+ $(,)?) => {
        $( if let Some(v) = &$patch.$field { $cfg.$field = v.clone(); } )+
    };
}

/// A partial-field update for [`SiteConfig`].
///
/// Admin panels edit disjoint field subsets; a merge write touches only the
/// fields a panel actually submitted, so concurrent panels never erase each
/// other's settings. `None` always means "leave unchanged", never "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_header_ad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_mid_ad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_bottom_ad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_sidebar_ad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_sidebar: Option<String>,
}

impl ConfigPatch {
    /// Copies every present field onto `cfg`, leaving the rest untouched.
    pub fn apply_to(&self, cfg: &mut SiteConfig) {
        merge_fields!(
            self, cfg,
            site_logo, owner_image, allowed_email, password,
            owner_name_en, owner_name_ar, contact_email,
            youtube_count, youtube_url, tiktok_count, tiktok_url,
            facebook_count, facebook_url, instagram_count, instagram_url,
            show_header_ad, show_mid_ad, show_bottom_ad, show_sidebar_ad,
            ad_header, ad_mid, ad_bottom, ad_sidebar,
        );
    }
}

/// A published article (`articles/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Plain text; paragraphs are newline-delimited.
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    /// Optional generation prompt surfaced with a copy action on the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_prompt: Option<String>,
    /// Epoch milliseconds; articles list newest-first on this field.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Known social platforms. Unknown stored values fall back to `Website`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Facebook,
    Twitter,
    Instagram,
    Linkedin,
    Github,
    #[serde(other)]
    Website,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::Github => "github",
            Platform::Website => "website",
        };
        f.write_str(s)
    }
}

/// A "link-in-bio" entry (`links/{id}`). Read-only from this system; the
/// collection is managed externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: Platform,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A broadcast notification (`notifications/{id}`). Append-only; never
/// updated or deleted after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    /// Epoch milliseconds; the display feed orders on this, descending.
    pub timestamp: i64,
    /// Persisted for forward compatibility; display logic ignores it.
    #[serde(default)]
    pub read: bool,
}

/// The singleton usage counters document (`stats/main`).
///
/// All counters are monotonically non-decreasing and mutated only through
/// atomic increments after creation; a full overwrite would lose concurrent
/// increments to a last-write-wins race.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub visitors: u64,
    #[serde(rename = "linkClicks", default)]
    pub link_clicks: u64,
    #[serde(rename = "promptCopies", default)]
    pub prompt_copies: u64,
}

/// Selects which counter an increment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Visitors,
    LinkClicks,
    PromptCopies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Active UI language. Drives EN/AR labels, text direction, and the
/// language-mirroring rule of the AI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ar,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    pub fn is_arabic(self) -> bool {
        matches!(self, Language::Ar)
    }
}

/// Admin-submitted article fields. Ids and timestamps are assigned by the
/// content service, never by the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub article_prompt: Option<String>,
}
