//! Fetch generation counter
//!
//! Every dispatched fetch takes the next generation. A result may only be
//! applied while its generation is still the current one and the counter
//! has not been retired.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct GenerationState {
    current: AtomicU64,
    retired: AtomicBool,
}

/// Shared, monotonically increasing fetch generation
#[derive(Debug, Clone, Default)]
pub struct Generation {
    state: Arc<GenerationState>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding all earlier ones
    pub fn advance(&self) -> u64 {
        self.state.current.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Most recently started generation (0 before the first fetch)
    pub fn current(&self) -> u64 {
        self.state.current.load(Ordering::Acquire)
    }

    /// Invalidate every generation, past and future
    pub fn retire(&self) {
        self.state.retired.store(true, Ordering::Release);
    }

    pub fn is_retired(&self) -> bool {
        self.state.retired.load(Ordering::Acquire)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        !self.is_retired() && self.current() == generation
    }
}
