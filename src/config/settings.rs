//! Settings structures for TuneSearch configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure matching `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (TUNESEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("TUNESEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("TUNESEARCH_BASE_URL") {
            self.search.base_url = val;
        }
        if let Some(val) = lookup("TUNESEARCH_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                self.search.debounce_ms = ms;
            }
        }
        if let Some(val) = lookup("TUNESEARCH_TERM_ENCODING") {
            match val.to_lowercase().as_str() {
                "raw" => self.search.term_encoding = TermEncoding::Raw,
                "percent" => self.search.term_encoding = TermEncoding::Percent,
                _ => {}
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// How the query term is embedded into the search URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermEncoding {
    /// Percent-encode the term before embedding it
    #[default]
    Percent,
    /// Embed the term exactly as typed
    Raw,
}

/// Search endpoint and pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Search endpoint without query string
    pub base_url: String,
    /// Value of the `media` parameter
    pub media: String,
    /// Value of the `entity` parameter
    pub entity: String,
    /// Quiet period before a query is dispatched (milliseconds)
    pub debounce_ms: u64,
    /// Term embedding policy
    pub term_encoding: TermEncoding,
}

impl SearchSettings {
    /// Debounce quiet period
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com/search".to_string(),
            media: "music".to_string(),
            entity: "song".to_string(),
            debounce_ms: 1000,
            term_encoding: TermEncoding::default(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = wait indefinitely)
    pub request_timeout: Option<f64>,
    /// Suffix appended to the user agent
    pub useragent_suffix: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            useragent_suffix: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.search.base_url, "https://itunes.apple.com/search");
        assert_eq!(settings.search.debounce(), Duration::from_millis(1000));
        assert_eq!(settings.search.term_encoding, TermEncoding::Percent);
        assert!(settings.outgoing.request_timeout.is_none());
        assert!(!settings.general.debug);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "search:\n  debounce_ms: 250\n  term_encoding: raw\n";
        let settings = tokio_test::assert_ok!(Settings::from_yaml(yaml));

        assert_eq!(settings.search.debounce_ms, 250);
        assert_eq!(settings.search.term_encoding, TermEncoding::Raw);
        assert_eq!(settings.search.media, "music");
        assert_eq!(settings.outgoing.pool_maxsize, 20);
    }

    #[test]
    fn test_merge_vars() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "TUNESEARCH_DEBUG" => Some("true".to_string()),
            "TUNESEARCH_DEBOUNCE_MS" => Some("not a number".to_string()),
            "TUNESEARCH_TERM_ENCODING" => Some("RAW".to_string()),
            "TUNESEARCH_BASE_URL" => Some("http://localhost:9000/search".to_string()),
            _ => None,
        });

        assert!(settings.general.debug);
        assert_eq!(settings.search.debounce_ms, 1000);
        assert_eq!(settings.search.term_encoding, TermEncoding::Raw);
        assert_eq!(settings.search.base_url, "http://localhost:9000/search");
    }
}
