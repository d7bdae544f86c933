//! Query pipeline execution
//!
//! Turns query text edits into debounced fetches and publishes the result
//! of the most recently started fetch.

use super::debounce::Debouncer;
use super::dedup::RemoveDuplicates;
use super::generation::Generation;
use crate::config::SearchSettings;
use crate::context::UiContext;
use crate::fetcher::Fetcher;
use crate::metrics::PipelineMetrics;
use crate::query::SearchEndpoint;
use crate::results::ResultList;
use futures::future::{BoxFuture, OptionFuture};
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

type InFlight = BoxFuture<'static, (u64, ResultList)>;

/// Query pipeline: de-duplicate, debounce, build URL, fetch, publish.
pub struct QueryPipeline {
    /// Fetcher used for every dispatched URL
    fetcher: Arc<dyn Fetcher>,
    /// URL template
    endpoint: SearchEndpoint,
    /// Debounce quiet period
    debounce: Duration,
    /// Where published state is mutated
    context: Arc<dyn UiContext>,
    /// Published result list
    items: Arc<watch::Sender<ResultList>>,
    /// Latest dispatched fetch
    generation: Generation,
    metrics: Arc<PipelineMetrics>,
}

impl QueryPipeline {
    /// Create a pipeline publishing into `items`
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        context: Arc<dyn UiContext>,
        items: watch::Sender<ResultList>,
    ) -> Self {
        Self::with_settings(fetcher, context, items, &SearchSettings::default())
    }

    /// Create a pipeline from search settings
    pub fn with_settings(
        fetcher: Arc<dyn Fetcher>,
        context: Arc<dyn UiContext>,
        items: watch::Sender<ResultList>,
        settings: &SearchSettings,
    ) -> Self {
        Self {
            fetcher,
            endpoint: SearchEndpoint::from_settings(settings),
            debounce: settings.debounce(),
            context,
            items: Arc::new(items),
            generation: Generation::new(),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Set the URL template
    pub fn with_endpoint(mut self, endpoint: SearchEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Counters shared with the running pipeline
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Generation counter shared with every result posted to the UI context
    pub fn generation(&self) -> Generation {
        self.generation.clone()
    }

    /// Run the pipeline on its own task
    pub fn spawn(self, source: watch::Receiver<String>) -> JoinHandle<()> {
        tokio::spawn(self.run(source))
    }

    /// Drive the pipeline until the query source is closed.
    ///
    /// The value present in `source` at subscription is the first emission.
    /// At most one fetch is polled at a time; dispatching a new one drops
    /// the fetch it supersedes.
    pub async fn run(self, mut source: watch::Receiver<String>) {
        let mut dedup = RemoveDuplicates::new();
        let mut debouncer = Debouncer::new(self.debounce);
        let mut in_flight: Option<InFlight> = None;

        let initial = source.borrow_and_update().clone();
        self.observe(initial, &mut dedup, &mut debouncer);

        loop {
            let deadline = debouncer.deadline();

            tokio::select! {
                changed = source.changed() => {
                    if changed.is_err() {
                        debug!("Query source closed, stopping pipeline");
                        break;
                    }
                    let text = source.borrow_and_update().clone();
                    self.observe(text, &mut dedup, &mut debouncer);
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(text) = debouncer.take_ready(Instant::now()) {
                        if let Some(fetch) = self.dispatch(text) {
                            if in_flight.replace(fetch).is_some() {
                                debug!("Dropping superseded fetch");
                                self.metrics.record_superseded();
                            }
                        }
                    }
                }
                Some((generation, items)) = OptionFuture::from(in_flight.as_mut()),
                    if in_flight.is_some() =>
                {
                    in_flight = None;
                    self.deliver(generation, items);
                }
            }
        }
    }

    /// De-duplicate, then hand the value to the debouncer
    fn observe(
        &self,
        text: String,
        dedup: &mut RemoveDuplicates<String>,
        debouncer: &mut Debouncer<String>,
    ) {
        self.metrics.record_emission();

        if !dedup.accept(&text) {
            debug!("Ignoring repeated query {:?}", text);
            self.metrics.record_duplicate();
            return;
        }

        if let Some(discarded) = debouncer.push(text, Instant::now()) {
            debug!("Debounce reset, discarding {:?}", discarded);
            self.metrics.record_debounced();
        }
    }

    /// Build the URL and start a fetch tagged with a new generation
    fn dispatch(&self, text: String) -> Option<InFlight> {
        let Some(url) = self.endpoint.url_for(&text) else {
            self.metrics.record_invalid_url();
            return None;
        };

        let generation = self.generation.advance();
        self.metrics.record_fetch();
        info!("Fetch #{} for {:?}", generation, text);

        let fetcher = Arc::clone(&self.fetcher);
        Some(
            async move {
                let items = fetcher.fetch(&url).await;
                (generation, items)
            }
            .boxed(),
        )
    }

    /// Post a completed fetch to the UI context if it is still the latest
    fn deliver(&self, generation: u64, items: ResultList) {
        if !self.generation.is_current(generation) {
            debug!(
                "Discarding result of fetch #{} (latest is #{})",
                generation,
                self.generation.current()
            );
            self.metrics.record_superseded();
            return;
        }

        let current = self.generation.clone();
        let published = Arc::clone(&self.items);
        let metrics = Arc::clone(&self.metrics);

        self.context.post(Box::new(move || {
            // a fetch started after this check posts its result behind this one
            if !current.is_current(generation) {
                metrics.record_superseded();
                return;
            }
            info!("Publishing {} items from fetch #{}", items.len(), generation);
            published.send_replace(items);
            metrics.record_published();
        }));
    }
}
