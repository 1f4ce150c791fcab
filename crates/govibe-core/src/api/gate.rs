//! Single-flight guard for user-triggered requests.
//!
//! A screen holds one gate per triggering control. While a [`GatePass`] is
//! alive the control is "disabled": further acquisitions fail instead of
//! starting an overlapping lookup or submission.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    busy: Arc<AtomicBool>,
}

/// Proof that the holder owns the gate; releases it on drop.
#[derive(Debug)]
pub struct GatePass {
    busy: Arc<AtomicBool>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or `None` if a request is already outstanding.
    pub fn try_acquire(&self) -> Option<GatePass> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GatePass {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for GatePass {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
