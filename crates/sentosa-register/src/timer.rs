//! # Delayed Tasks
//!
//! A one-shot action scheduled on the tokio runtime that is cancelled when
//! its handle is dropped.
//!
//! ```text
//!   spawn(500ms, f) ──► sleep ──► f()
//!         │
//!         └── drop / cancel before 500ms ──► f never runs
//! ```

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a pending delayed action. Dropping it aborts the action.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Runs `action` after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        DelayedTask { handle }
    }

    /// Cancels the action if it has not run yet.
    pub fn cancel(self) {
        drop(self);
    }

    /// True once the action ran or was aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn flag_task(delay_ms: u64) -> (Arc<AtomicBool>, DelayedTask) {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let task = DelayedTask::spawn(Duration::from_millis(delay_ms), move || {
            flag.store(true, Ordering::SeqCst);
        });
        (fired, task)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (fired, task) = flag_task(500);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(fired.load(Ordering::SeqCst));
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_action() {
        let (fired, task) = flag_task(500);

        tokio::time::sleep(Duration::from_millis(100)).await;
        task.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
