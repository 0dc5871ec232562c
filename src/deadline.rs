// Absolute search deadline
//
// Computed once per decision and polled at the entry of every search step.

use std::time::{Duration, Instant};

/// The instant after which no further search work may start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Deadline at an absolute instant
    pub fn at(at: Instant) -> Self {
        Deadline { at }
    }

    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Deadline {
            at: Instant::now() + budget,
        }
    }

    /// Derives the search deadline from the externally given timeout,
    /// leaving `safety_margin` for transmitting the move.
    ///
    /// If the margin reaches further back than the platform clock can
    /// represent, the deadline is treated as already passed.
    pub fn from_timeout(timeout: Instant, safety_margin: Duration) -> Self {
        let at = timeout
            .checked_sub(safety_margin)
            .unwrap_or_else(Instant::now);
        Deadline { at }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}
