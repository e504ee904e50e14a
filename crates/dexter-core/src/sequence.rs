//! Request-sequence guard for overlapping calls
//!
//! Two calls issued back to back (for example after rapid filter changes) may
//! complete in either order. A view that stores call results through
//! `Latest` only keeps the result of the most recently issued call, so a slow
//! stale response can never overwrite fresher state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Sequence number identifying one issued call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic ticket dispenser
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before it
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Value slot that only accepts results belonging to the latest ticket
#[derive(Debug)]
pub struct Latest<T> {
    sequence: RequestSequence,
    value: Mutex<Option<T>>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            sequence: RequestSequence::new(),
            value: Mutex::new(None),
        }
    }
}

impl<T: Clone> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new call; any call started earlier becomes stale
    pub fn begin(&self) -> Ticket {
        self.sequence.issue()
    }

    /// Store `value` if `ticket` is still current. Returns whether it was kept.
    ///
    /// The freshness check and the store happen under the same lock, so
    /// stored tickets only ever increase.
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.sequence.is_latest(ticket) {
            debug!(ticket = ticket.value(), "Discarding stale response");
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn get(&self) -> Option<T> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
