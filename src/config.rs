use crate::fallback::FallbackData;
use log::info;
use web_sys::window;

const API_BASE_ATTRIBUTE: &str = "data-api-base";

pub const TOAST_DELAY_MS: u32 = 2_500;
pub const SEARCH_DELAY_MS: u32 = 1_500;

/// Page-level settings shared by every mounted view.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin. `None` skips remote loads and uses the fallback data.
    pub api_base: Option<String>,
    pub toast_delay_ms: u32,
    pub search_delay_ms: u32,
    pub fallback: FallbackData,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            toast_delay_ms: TOAST_DELAY_MS,
            search_delay_ms: SEARCH_DELAY_MS,
            fallback: FallbackData::default(),
        }
    }
}

impl AppConfig {
    /// Reads `<body data-api-base="...">` from the current page.
    pub fn from_document() -> Self {
        let api_base = window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
            .and_then(|body| body.get_attribute(API_BASE_ATTRIBUTE));

        let config = Self::default().with_api_base(api_base);
        match &config.api_base {
            Some(base) => info!("Using backend at {}", base),
            None => info!("No backend configured, using sample data"),
        }
        config
    }

    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        self.api_base = api_base
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty());
        self
    }

    fn endpoint(&self, path: &str) -> Option<String> {
        self.api_base
            .as_ref()
            .map(|base| format!("{}{}", base, path))
    }

    pub fn posts_url(&self) -> Option<String> {
        self.endpoint("/api/posts")
    }

    pub fn chats_url(&self) -> Option<String> {
        self.endpoint("/api/chats")
    }

    pub fn account_url(&self) -> Option<String> {
        self.endpoint("/api/account")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_by_default() {
        let config = AppConfig::default();
        assert_eq!(config.posts_url(), None);
        assert_eq!(config.toast_delay_ms, 2_500);
        assert_eq!(config.search_delay_ms, 1_500);
    }

    #[test]
    fn endpoints_join_base() {
        let config = AppConfig::default().with_api_base(Some("http://localhost:8000/".into()));
        assert_eq!(
            config.posts_url().as_deref(),
            Some("http://localhost:8000/api/posts")
        );
        assert_eq!(
            config.chats_url().as_deref(),
            Some("http://localhost:8000/api/chats")
        );
        assert_eq!(
            config.account_url().as_deref(),
            Some("http://localhost:8000/api/account")
        );
    }

    #[test]
    fn blank_base_is_offline() {
        let config = AppConfig::default().with_api_base(Some("  ".into()));
        assert_eq!(config.api_base, None);
    }
}
