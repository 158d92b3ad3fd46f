use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation gate for scheduled step-transition callbacks.
///
/// Every schedule takes a ticket stamped with the generation at issue
/// time. Issuing a newer ticket (or cancelling) bumps the generation,
/// so a stale callback sees `is_current() == false` and drops its work
/// instead of unlocking a wizard that has since moved on.
#[derive(Debug, Clone, Default)]
pub struct TransitionGate {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct TransitionTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl TransitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a newly scheduled callback, superseding any
    /// ticket issued earlier.
    pub fn issue(&self) -> TransitionTicket {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        TransitionTicket {
            generation: Arc::clone(&self.generation),
            issued,
        }
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl TransitionTicket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}
