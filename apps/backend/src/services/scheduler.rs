//! Deferred callbacks for AI turns and trick display.
//!
//! A `DelayedTask` owns at most one pending timer. Arming it cancels the
//! previous timer first, and every timer carries a generation number that is
//! re-checked after the sleep, so a superseded callback never runs even if
//! the abort raced with the wake-up.

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::domain::Difficulty;

pub struct DelayedTask {
    label: &'static str,
    generation: Arc<AtomicU64>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl DelayedTask {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            generation: Arc::new(AtomicU64::new(0)),
            handle: Mutex::new(None),
        }
    }

    /// Run `callback` after `delay`, replacing whatever was pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = self.handle.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let label = self.label;

        trace!(task = label, generation, delay_ms = delay.as_millis() as u64, "[SCHEDULER] armed");
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                trace!(task = label, generation, "[SCHEDULER] superseded before firing");
                return;
            }
            callback();
        }));
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
            trace!(task = self.label, "[SCHEDULER] cancelled");
        }
    }

    /// Whether a timer is armed and has not yet completed.
    pub fn is_pending(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Simulated thinking window per difficulty, in milliseconds.
pub fn thinking_window(difficulty: Difficulty) -> RangeInclusive<u64> {
    match difficulty {
        Difficulty::Easy => 500..=1000,
        Difficulty::Medium => 1000..=2000,
        Difficulty::Hard => 1500..=3000,
    }
}

pub fn thinking_delay<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Duration {
    Duration::from_millis(rng.random_range(thinking_window(difficulty)))
}
