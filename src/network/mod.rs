//! HTTP networking module
//!
//! Provides the HTTP client used to reach the search endpoint.

mod client;
mod user_agent;

pub use client::{HttpClient, HttpResponse};
pub use user_agent::user_agent;
