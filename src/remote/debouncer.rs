//! Cancellable per-key timers
//!
//! `schedule(key, job)` replaces any job still waiting for the same key.
//! Only the waiting timer is cancelled: once the delay has elapsed the job
//! runs on its own task and is never aborted by a later schedule.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Debouncer keyed by `K`
#[derive(Debug)]
pub struct Debouncer<K> {
    delay: Duration,
    pending: HashMap<K, JoinHandle<()>>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `job` after the delay unless `key` is scheduled again first
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&mut self, key: K, job: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.cancel(&key) {
            trace!(?key, "Restarted debounce timer");
        }

        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached so a later restart cannot abort an in-flight job
            tokio::spawn(job());
        });
        self.pending.insert(key, timer);
    }

    /// Cancel the waiting timer for `key`, if any
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(timer) => {
                let waiting = !timer.is_finished();
                timer.abort();
                waiting
            }
            None => false,
        }
    }

    /// Cancel every waiting timer
    pub fn cancel_all(&mut self) {
        for (_, timer) in self.pending.drain() {
            timer.abort();
        }
    }

    /// Whether a timer for `key` is still waiting
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending
            .get(key)
            .map(|timer| !timer.is_finished())
            .unwrap_or(false)
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for (_, timer) in self.pending.drain() {
            timer.abort();
        }
    }
}
