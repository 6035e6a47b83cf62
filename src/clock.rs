/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Logical simulation clock.
//!
//! A tick is an abstract unit of simulated time; the clock only guarantees
//! monotone non-decreasing values.  The scheduler loop is the single writer
//! (it advances the clock once per iteration); every other component —
//! producer, driver, tests — holds a read-only clone of the handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One unit of simulated time.
pub type Tick = u64;

/// Cloneable handle over the shared tick counter.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    ticks: Arc<AtomicU64>,
}

impl SimClock {
    /// Create a clock starting at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick.
    pub fn now(&self) -> Tick {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Step the clock by one tick and return the new value.
    pub fn advance(&self) -> Tick {
        self.ticks.fetch_add(1, Ordering::SeqCst) + 1
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        assert_eq!(SimClock::new().now(), 0);
    }

    #[test]
    fn advance_is_monotone() {
        let clock = SimClock::new();
        let mut prev = clock.now();
        for _ in 0..100 {
            let next = clock.advance();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn clones_share_the_same_counter() {
        let clock = SimClock::new();
        let reader = clock.clone();
        clock.advance();
        clock.advance();
        assert_eq!(reader.now(), 2);
    }
}
