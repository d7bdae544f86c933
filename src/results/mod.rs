//! Search result types
//!
//! Wire entities decoded from the search endpoint and the display items
//! derived from them.

mod types;

pub use types::*;
