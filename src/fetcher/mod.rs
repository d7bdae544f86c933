//! Fetcher module
//!
//! Defines the `Fetcher` trait and the iTunes Search API implementation.

mod itunes;
mod traits;

pub use itunes::ItunesFetcher;
pub use traits::*;
