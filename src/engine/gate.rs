//! Serialization gate around engine invocations

use std::future::Future;
use tokio::sync::Mutex;

/// Process-wide mutual exclusion for engine use.
///
/// The underlying engine cannot tolerate overlapping invocations, so every
/// call into it runs through [`with_exclusive`](Self::with_exclusive). The
/// tokio mutex queues waiters in FIFO order, so a steady stream of new
/// arrivals cannot starve an already-queued request.
pub struct GenerationGate {
    slot: Mutex<()>,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self { slot: Mutex::new(()) }
    }

    /// Run `task` while holding exclusive access to the engine.
    ///
    /// The guard is dropped on every exit path, so an error (or panic) inside
    /// `task` never leaves the gate held. No timeout is applied here; bounded
    /// latency is the HTTP layer's concern.
    pub async fn with_exclusive<F>(&self, task: F) -> F::Output
    where
        F: Future,
    {
        let _guard = self.slot.lock().await;
        task.await
    }

    /// Whether a holder is currently inside the gate. Observability only;
    /// the answer can be stale by the time the caller looks at it.
    pub fn is_locked(&self) -> bool {
        self.slot.try_lock().is_err()
    }
}

impl Default for GenerationGate {
    fn default() -> Self {
        Self::new()
    }
}
