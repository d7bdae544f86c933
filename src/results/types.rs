//! Result type definitions

use serde::Deserialize;
use uuid::Uuid;

/// Response body returned by the search endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Matching tracks
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Project every wire result into a display item
    pub fn into_result_list(self) -> ResultList {
        self.results.iter().map(SearchResult::to_display_item).collect()
    }
}

/// A single track as returned on the wire
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Track title
    pub track_name: String,
    /// Performing artist
    pub artist_name: String,
}

impl SearchResult {
    pub fn new(track_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artist_name: artist_name.into(),
        }
    }

    /// Map into a display item with a freshly generated identifier.
    ///
    /// Two calls on the same value yield two different ids.
    pub fn to_display_item(&self) -> DisplayItem {
        DisplayItem {
            id: Uuid::new_v4(),
            track_name: self.track_name.clone(),
            artist_name: self.artist_name.clone(),
        }
    }
}

/// UI-ready projection of one search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Display identifier, unique per mapping
    pub id: Uuid,
    /// Track title
    pub track_name: String,
    /// Performing artist
    pub artist_name: String,
}

impl DisplayItem {
    /// Whether this item shows the given track and artist
    pub fn shows(&self, track_name: &str, artist_name: &str) -> bool {
        self.track_name == track_name && self.artist_name == artist_name
    }
}

/// Ordered list of display items, replaced wholesale on every update
pub type ResultList = Vec<DisplayItem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let body = r#"{
            "resultCount": 1,
            "results": [
                {"wrapperType": "track", "trackName": "Foo", "artistName": "Bar", "trackId": 42}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.results, vec![SearchResult::new("Foo", "Bar")]);
    }

    #[test]
    fn test_decode_requires_results_field() {
        assert!(serde_json::from_str::<SearchResponse>("{}").is_err());
        assert!(
            serde_json::from_str::<SearchResponse>(r#"{"results":[{"trackName":"x"}]}"#).is_err()
        );
    }

    #[test]
    fn test_fresh_identifier_per_mapping() {
        let result = SearchResult::new("Foo", "Bar");
        let first = result.to_display_item();
        let second = result.to_display_item();

        assert!(first.shows("Foo", "Bar"));
        assert!(second.shows("Foo", "Bar"));
        assert!(!first.id.is_nil());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_into_result_list_keeps_order() {
        let response = SearchResponse {
            results: vec![SearchResult::new("A", "1"), SearchResult::new("B", "2")],
        };
        let list = response.into_result_list();

        assert_eq!(list.len(), 2);
        assert!(list[0].shows("A", "1"));
        assert!(list[1].shows("B", "2"));
    }
}
