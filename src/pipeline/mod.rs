//! Query pipeline module
//!
//! Turns a stream of query text edits into a de-duplicated, debounced,
//! latest-wins sequence of fetches and publishes the results.

mod debounce;
mod dedup;
mod executor;
mod generation;

pub use debounce::Debouncer;
pub use dedup::RemoveDuplicates;
pub use executor::QueryPipeline;
pub use generation::Generation;
