//! Transient "copied" confirmation.
//!
//! Each copy replaces the value and reschedules the clear; the previous
//! pending clear is aborted. The generation check covers a clear that has
//! already woken up when a newer copy lands.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long the copied indicator stays lit.
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Default)]
struct Slot {
    value: Option<String>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

#[derive(Debug)]
pub struct CopyFeedback {
    slot: Arc<Mutex<Slot>>,
    delay: Duration,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::with_delay(COPY_FEEDBACK_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            delay,
        }
    }

    /// Record `part_number` as copied and schedule its clear.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn copy(&self, part_number: impl Into<String>) {
        let mut slot = lock(&self.slot);
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }
        slot.generation += 1;
        slot.value = Some(part_number.into());

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        slot.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.value = None;
                slot.pending = None;
                tracing::trace!("copy feedback cleared");
            }
        }));
    }

    /// The part number copied within the last [`COPY_FEEDBACK_DELAY`].
    pub fn last_copied(&self) -> Option<String> {
        lock(&self.slot).value.clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.slot).pending.take() {
            pending.abort();
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
