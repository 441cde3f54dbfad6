//! One-shot readiness latch.

use tokio::sync::watch;

/// A latch that opens once and stays open.
///
/// Waiters block until the first [`open`](Self::open) and return
/// immediately afterwards. There is no timeout: a gate that is never opened
/// keeps its waiters pending.
#[derive(Debug)]
pub struct ReadinessGate {
    state: watch::Sender<bool>,
}

impl ReadinessGate {
    /// Create a closed gate.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self { state }
    }

    /// Open the gate. Returns `true` only for the call that opened it.
    pub fn open(&self) -> bool {
        self.state.send_if_modified(|open| {
            if *open {
                false
            } else {
                *open = true;
                true
            }
        })
    }

    /// Whether the gate has been opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.state.borrow()
    }

    /// Wait until the gate is open.
    pub async fn wait(&self) {
        if self.is_open() {
            return;
        }
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|open| *open).await;
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}
