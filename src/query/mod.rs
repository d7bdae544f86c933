//! Search URL construction
//!
//! Embeds the current query text into the endpoint template
//! `<base>?media=<media>&entity=<entity>&term=<text>`.

use crate::config::{SearchSettings, TermEncoding};
use tracing::debug;
use url::Url;

/// Search endpoint template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    base_url: String,
    media: String,
    entity: String,
    encoding: TermEncoding,
}

impl SearchEndpoint {
    /// Create an endpoint for the given base URL with the default
    /// `media=music&entity=song` filters
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            media: "music".to_string(),
            entity: "song".to_string(),
            encoding: TermEncoding::default(),
        }
    }

    /// Create an endpoint from search settings
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            media: settings.media.clone(),
            entity: settings.entity.clone(),
            encoding: settings.term_encoding,
        }
    }

    /// Set the term encoding policy
    pub fn with_encoding(mut self, encoding: TermEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Build the request URL for a query term.
    ///
    /// Returns `None` when the result is not a valid URL; the caller drops
    /// the term in that case.
    pub fn url_for(&self, term: &str) -> Option<Url> {
        let term = match self.encoding {
            TermEncoding::Percent => urlencoding::encode(term),
            TermEncoding::Raw => term.into(),
        };
        let raw = format!(
            "{}?media={}&entity={}&term={}",
            self.base_url, self.media, self.entity, term
        );

        match Url::parse(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("Dropping query, invalid URL {:?}: {}", raw, e);
                None
            }
        }
    }
}

impl Default for SearchEndpoint {
    fn default() -> Self {
        Self::from_settings(&SearchSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term_of(url: &Url) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == "term")
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_default_template() {
        let url = SearchEndpoint::default().url_for("abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://itunes.apple.com/search?media=music&entity=song&term=abc"
        );
    }

    #[test]
    fn test_percent_encoding_preserves_term() {
        let endpoint = SearchEndpoint::default();
        let url = endpoint.url_for("rock & roll #1").unwrap();

        assert_eq!(term_of(&url).as_deref(), Some("rock & roll #1"));
        assert!(url.fragment().is_none());
        assert_eq!(url.query_pairs().count(), 3);
    }

    #[test]
    fn test_raw_encoding_embeds_as_typed() {
        let endpoint = SearchEndpoint::default().with_encoding(TermEncoding::Raw);

        let url = endpoint.url_for("abc").unwrap();
        assert_eq!(term_of(&url).as_deref(), Some("abc"));

        // an unescaped '#' starts the fragment
        let url = endpoint.url_for("a#b").unwrap();
        assert_eq!(term_of(&url).as_deref(), Some("a"));
        assert_eq!(url.fragment(), Some("b"));
    }

    #[test]
    fn test_empty_term() {
        let url = SearchEndpoint::default().url_for("").unwrap();
        assert_eq!(term_of(&url).as_deref(), Some(""));
    }

    #[test]
    fn test_invalid_base_is_dropped() {
        let endpoint = SearchEndpoint::new("not a url");
        assert!(endpoint.url_for("abc").is_none());
    }
}
