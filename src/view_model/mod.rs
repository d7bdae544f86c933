//! Search view model
//!
//! Owns the two observables the presentation layer binds to: the query
//! text (read/write) and the published result list (read-only). The query
//! pipeline lives exactly as long as the view model.

use crate::config::SearchSettings;
use crate::context::UiContext;
use crate::fetcher::Fetcher;
use crate::metrics::PipelineMetrics;
use crate::pipeline::{Generation, QueryPipeline};
use crate::query::SearchEndpoint;
use crate::results::ResultList;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// View model behind a search screen
pub struct SearchViewModel {
    query_text: watch::Sender<String>,
    music_items: watch::Receiver<ResultList>,
    metrics: Arc<PipelineMetrics>,
    generation: Generation,
    pipeline: JoinHandle<()>,
}

impl SearchViewModel {
    /// Create the view model and start its pipeline.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        context: Arc<dyn UiContext>,
        settings: &SearchSettings,
    ) -> Self {
        Self::with_endpoint(fetcher, context, settings, SearchEndpoint::from_settings(settings))
    }

    /// Create the view model with an explicit URL template
    pub fn with_endpoint(
        fetcher: Arc<dyn Fetcher>,
        context: Arc<dyn UiContext>,
        settings: &SearchSettings,
        endpoint: SearchEndpoint,
    ) -> Self {
        let (query_text, source) = watch::channel(String::new());
        let (items_tx, music_items) = watch::channel(ResultList::new());

        let pipeline = QueryPipeline::with_settings(fetcher, context, items_tx, settings)
            .with_endpoint(endpoint);
        let metrics = pipeline.metrics();
        let generation = pipeline.generation();

        Self {
            query_text,
            music_items,
            metrics,
            generation,
            pipeline: pipeline.spawn(source),
        }
    }

    /// Replace the query text, as the input field does on every edit
    pub fn set_query_text(&self, text: impl Into<String>) {
        self.query_text.send_replace(text.into());
    }

    /// Current query text
    pub fn query_text(&self) -> String {
        self.query_text.borrow().clone()
    }

    /// Snapshot of the published result list
    pub fn music_items(&self) -> ResultList {
        self.music_items.borrow().clone()
    }

    /// Observe the published result list
    pub fn subscribe(&self) -> watch::Receiver<ResultList> {
        self.music_items.clone()
    }

    /// Pipeline counters
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }
}

impl Drop for SearchViewModel {
    fn drop(&mut self) {
        // results already posted to the UI context must not land either
        self.generation.retire();
        self.pipeline.abort();
    }
}
