//! TuneSearch: an interactive music search client for the iTunes Search API
//!
//! Query text edits flow through a de-duplicating, debouncing, latest-wins
//! pipeline; each surviving query becomes one search request and the newest
//! request's results are published to the presentation layer.

pub mod config;
pub mod context;
pub mod fetcher;
pub mod metrics;
pub mod network;
pub mod pipeline;
pub mod query;
pub mod results;
pub mod view_model;

pub use config::Settings;
pub use context::{Immediate, UiContext, UiQueue};
pub use fetcher::{Fetcher, ItunesFetcher};
pub use results::{DisplayItem, ResultList, SearchResult};
pub use view_model::SearchViewModel;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
