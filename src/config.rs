use crate::error::{WidgetError, WidgetResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;

/// Bundled config for builds that have no `.env` next to them (wasm, packaged desktop)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const BACKEND_URL_KEY: &str = "TEXTBOOK_BACKEND_URL";
pub const CONTENT_SELECTOR_KEY: &str = "TEXTBOOK_CONTENT_SELECTOR";
pub const LOG_LEVEL_KEY: &str = "TEXTBOOK_LOG_LEVEL";

const DEFAULT_CONTENT_SELECTOR: &str = "article";
const DEFAULT_LOG_LEVEL: &str = "info";

const QUERY_PATH: &str = "/api/query";
const TRANSLATE_PATH: &str = "/api/translate";

static CONFIG: Lazy<WidgetConfig> = Lazy::new(WidgetConfig::load);

/// Resolved configuration, read once per page load.
pub fn config() -> &'static WidgetConfig {
    &CONFIG
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub backend_url: Option<String>,
    pub content_selector: String,
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl WidgetConfig {
    fn load() -> Self {
        load_dotenv();
        let bundled = parse_env_file(BUNDLED_CONFIG);
        Self::resolve(|key| env::var(key).ok().or_else(|| bundled.get(key).cloned()))
    }

    /// Build a config from a key lookup. Blank values count as unset.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            backend_url: get(BACKEND_URL_KEY).map(|url| url.trim_end_matches('/').to_string()),
            content_selector: get(CONTENT_SELECTOR_KEY)
                .unwrap_or_else(|| DEFAULT_CONTENT_SELECTOR.to_string()),
            log_level: get(LOG_LEVEL_KEY).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.backend_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    pub fn query_endpoint(&self) -> WidgetResult<String> {
        self.endpoint(QUERY_PATH)
    }

    pub fn translate_endpoint(&self) -> WidgetResult<String> {
        self.endpoint(TRANSLATE_PATH)
    }

    fn endpoint(&self, path: &str) -> WidgetResult<String> {
        self.backend_url
            .as_deref()
            .map(|base| format!("{base}{path}"))
            .ok_or(WidgetError::ConfigurationMissing)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // A missing .env is the normal case outside of local development
    let _ = dotenvy::dotenv();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

/// Parse `KEY=VALUE` lines, skipping comments and blank lines.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bundled_file() {
        let values = parse_env_file("# comment\n\nA=1\n B = two \nnot a pair\n");
        assert_eq!(values.get("A").map(String::as_str), Some("1"));
        assert_eq!(values.get("B").map(String::as_str), Some("two"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn bundled_config_names_a_backend() {
        let values = parse_env_file(BUNDLED_CONFIG);
        assert!(values.contains_key(BACKEND_URL_KEY));
    }

    #[test]
    fn resolves_defaults_and_endpoints() {
        let config = WidgetConfig::resolve(|key| match key {
            BACKEND_URL_KEY => Some("https://books.example.com/".to_string()),
            _ => None,
        });
        assert_eq!(config.content_selector, "article");
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.query_endpoint().unwrap(),
            "https://books.example.com/api/query"
        );
        assert_eq!(
            config.translate_endpoint().unwrap(),
            "https://books.example.com/api/translate"
        );
    }

    #[test]
    fn blank_backend_is_missing() {
        let config = WidgetConfig::resolve(|key| match key {
            BACKEND_URL_KEY => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.query_endpoint(), Err(WidgetError::ConfigurationMissing));
    }
}
