//! UI execution context
//!
//! Published state is only ever mutated by tasks posted to a `UiContext`.
//! The host decides where those tasks run: inline on the pipeline task, or
//! on its own loop through a `UiQueue`.

use tokio::sync::mpsc;
use tracing::debug;

/// Unit of work posted to the UI context
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Serialized executor owned by the presentation layer
pub trait UiContext: Send + Sync + 'static {
    /// Schedule `task` to run on the UI context, after every task posted before it
    fn post(&self, task: UiTask);
}

/// Runs posted tasks immediately on the posting task
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl UiContext for Immediate {
    fn post(&self, task: UiTask) {
        task();
    }
}

/// Handle posting tasks onto a `UiLoop`
#[derive(Clone)]
pub struct UiQueue {
    tx: mpsc::UnboundedSender<UiTask>,
}

impl UiQueue {
    /// Create a queue handle and the loop that drains it
    pub fn new() -> (Self, UiLoop) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, UiLoop { rx })
    }
}

impl UiContext for UiQueue {
    fn post(&self, task: UiTask) {
        if self.tx.send(task).is_err() {
            debug!("UI loop closed, dropping task");
        }
    }
}

/// Receiving end of a `UiQueue`, run by the presentation layer
pub struct UiLoop {
    rx: mpsc::UnboundedReceiver<UiTask>,
}

impl UiLoop {
    /// Run tasks in FIFO order until every `UiQueue` handle is dropped
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            task();
        }
    }

    /// Run the next task, waiting for one to arrive.
    ///
    /// Returns `false` once every handle is dropped.
    pub async fn turn(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run every task already queued without waiting; returns how many ran
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn push(log: &Arc<Mutex<Vec<u32>>>, value: u32) -> UiTask {
        let log = Arc::clone(log);
        Box::new(move || log.lock().unwrap().push(value))
    }

    #[test]
    fn test_immediate_runs_inline() {
        let log = Arc::new(Mutex::new(Vec::new()));
        Immediate.post(push(&log, 1));
        assert_eq!(*log.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_queue_defers_until_drained() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (queue, mut ui) = UiQueue::new();

        queue.post(push(&log, 1));
        queue.post(push(&log, 2));
        assert!(log.lock().unwrap().is_empty());

        assert_eq!(ui.drain(), 2);
        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
        assert_eq!(ui.drain(), 0);
    }

    #[tokio::test]
    async fn test_run_ends_when_handles_dropped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (queue, ui) = UiQueue::new();

        let other = queue.clone();
        queue.post(push(&log, 1));
        other.post(push(&log, 2));
        drop(queue);
        drop(other);

        ui.run().await;
        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_post_after_loop_dropped_is_ignored() {
        let (queue, ui) = UiQueue::new();
        drop(ui);
        queue.post(Box::new(|| panic!("must not run")));
    }
}
