//! Clock sources for the supervision loop.

use comwatch_common::Ticks;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A source of wrapping millisecond tick readings.
pub trait Clock {
    /// Current reading of the millisecond counter.
    fn now(&self) -> Ticks;
}

/// Wall clock anchored at construction time.
///
/// Readings are milliseconds since construction truncated to `u32`, wrapping
/// every ~49.7 days like a free-running hardware millis counter.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock anchored at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Ticks {
        // The u32 truncation is the wrap: milliseconds modulo 2^32.
        self.start.elapsed().as_millis() as Ticks
    }
}

/// Hand-driven clock for tests and simulations.
///
/// Clones share one counter, so a test can keep a handle while the
/// supervisor owns another. Advancing past `u32::MAX` wraps, same as the
/// real counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    #[must_use]
    pub fn new(start: Ticks) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(start)),
        }
    }

    /// Move the clock forward by `ticks`.
    pub fn advance(&self, ticks: u32) {
        self.now.fetch_add(ticks, Ordering::Release);
    }

    /// Set the clock to an absolute reading.
    pub fn set(&self, now: Ticks) {
        self.now.store(now, Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Ticks {
        self.now.load(Ordering::Acquire)
    }
}
