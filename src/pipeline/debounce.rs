//! Debounce control
//!
//! Holds the most recent value until a quiet period passes with no newer
//! value. Deadlines use the tokio clock so a paused runtime drives them.

use std::time::Duration;
use tokio::time::Instant;

/// Pending value with its quiescence deadline
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the pending value and restart the timer.
    ///
    /// Returns the value that was waiting, which is now discarded.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending
            .replace((value, now + self.delay))
            .map(|(previous, _)| previous)
    }

    /// When the pending value becomes ready, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }
}
