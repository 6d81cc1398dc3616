//! Event coalescing
//!
//! Every burst of events arms one timer per event; only the timer armed by
//! the last event of the burst is allowed to run its work. This keeps the
//! browser side free of `clearTimeout` bookkeeping.

use std::cell::Cell;

/// Generation-token debouncer
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: Cell<u64>,
    settled: Cell<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event and return the token its timer must present
    pub fn trigger(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    /// Whether the timer holding `token` should run (at most once per burst)
    pub fn settle(&self, token: u64) -> bool {
        if token != self.generation.get() || token == self.settled.get() {
            return false;
        }
        self.settled.set(token);
        true
    }

    /// Whether a triggered burst has not yet settled
    pub fn is_pending(&self) -> bool {
        self.generation.get() != self.settled.get()
    }
}
