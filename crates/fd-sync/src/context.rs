//! The explicit application context passed down the view hierarchy instead
//! of ambient globals. Created at application start, torn down at exit.
//!
//! The HTTP views do not hold one of these: the server is stateless per
//! request, so they resolve language from a query parameter instead. This
//! type is for embedding consumers that keep a long-lived view tree.

use fd_core::models::{Language, SiteConfig, Theme};

#[derive(Debug, Clone)]
pub struct AppContext {
    theme: Theme,
    language: Language,
    config: Option<SiteConfig>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext {
    /// Dark theme, English: the shipped defaults.
    pub fn new() -> Self {
        Self {
            theme: Theme::Dark,
            language: Language::En,
            config: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// `None` until the first config snapshot arrives from the feed.
    pub fn config(&self) -> Option<&SiteConfig> {
        self.config.as_ref()
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    pub fn set_config(&mut self, config: SiteConfig) {
        self.config = Some(config);
    }
}
