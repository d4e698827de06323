use std::collections::HashMap;
use serde::de::DeserializeOwned;

use super::error::ConfigError;
use super::settings::Settings;

pub const SETTINGS_URL: &str = "settings.json";
pub const CONTENT_URL: &str = "questions.json";

/// Where configuration documents come from.
pub trait ConfigSource {
    fn fetch(&self, url: &str) -> Result<String, ConfigError>;
}

/// Documents the host already fetched, keyed by URL.
/// `None` records a fetch the host attempted and lost.
#[derive(Debug, Clone, Default)]
pub struct PrefetchedSource {
    documents: HashMap<String, Option<String>>,
}

impl PrefetchedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, text: Option<String>) -> Self {
        self.documents.insert(url.into(), text);
        self
    }
}

impl ConfigSource for PrefetchedSource {
    fn fetch(&self, url: &str) -> Result<String, ConfigError> {
        self.documents
            .get(url)
            .cloned()
            .flatten()
            .ok_or_else(|| ConfigError::Unavailable { url: url.to_string() })
    }
}

/// Loads settings and content through an injected [`ConfigSource`].
/// Every load succeeds; failures are logged and replaced with defaults.
pub struct ConfigService<S: ConfigSource> {
    source: S,
    settings_url: String,
    content_url: String,
}

impl<S: ConfigSource> ConfigService<S> {
    pub fn new(source: S) -> Self {
        Self::with_urls(source, SETTINGS_URL, CONTENT_URL)
    }

    pub fn with_urls(source: S, settings_url: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            source,
            settings_url: settings_url.into(),
            content_url: content_url.into(),
        }
    }

    pub fn try_load_settings(&self) -> Result<Settings, ConfigError> {
        let text = self.source.fetch(&self.settings_url)?;
        Ok(Settings::from_json(&text)?)
    }

    pub fn try_load_content<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let text = self.source.fetch(&self.content_url)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn load_settings(&self) -> Settings {
        self.try_load_settings().unwrap_or_else(|e| {
            log::error!("settings loading error: {e}; using defaults");
            Settings::default()
        })
    }

    pub fn load_content<T: DeserializeOwned + Default>(&self) -> T {
        self.try_load_content().unwrap_or_else(|e| {
            log::error!("content loading error: {e}; using built-in content");
            T::default()
        })
    }

    pub fn load_all<T: DeserializeOwned + Default>(&self) -> (Settings, T) {
        (self.load_settings(), self.load_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        words: Vec<String>,
    }

    impl Default for Doc {
        fn default() -> Self {
            Self { words: vec!["fallback".into()] }
        }
    }

    #[test]
    fn loads_both_documents() {
        let source = PrefetchedSource::new()
            .with(SETTINGS_URL, Some(r#"{"settings": {"timeLimit": 30}}"#.into()))
            .with(CONTENT_URL, Some(r#"{"words": ["a", "b"]}"#.into()));
        let (settings, doc): (Settings, Doc) = ConfigService::new(source).load_all();
        assert_eq!(settings.time_limit, 30);
        assert_eq!(doc.words, vec!["a", "b"]);
    }

    #[test]
    fn failed_fetch_uses_defaults() {
        let source = PrefetchedSource::new().with(SETTINGS_URL, None);
        let service = ConfigService::new(source);
        assert!(matches!(service.try_load_settings(), Err(ConfigError::Unavailable { .. })));
        assert_eq!(service.load_settings(), Settings::default());
        assert_eq!(service.load_content::<Doc>(), Doc::default());
    }

    #[test]
    fn unparsable_content_uses_default() {
        let source = PrefetchedSource::new().with(CONTENT_URL, Some("{\"words\": 3}".into()));
        let service = ConfigService::new(source);
        assert!(matches!(service.try_load_content::<Doc>(), Err(ConfigError::Parse(_))));
        assert_eq!(service.load_content::<Doc>(), Doc::default());
    }

    #[test]
    fn custom_urls() {
        let source = PrefetchedSource::new().with("wheel.json", Some(r#"{"words": []}"#.into()));
        let service = ConfigService::with_urls(source, "s.json", "wheel.json");
        assert!(service.load_content::<Doc>().words.is_empty());
    }
}
