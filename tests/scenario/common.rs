//! Common utilities for scenario tests.
//!
//! Provides a small harness bundling the output bank and monitor so a
//! timeline reads as a sequence of checks against explicit timestamps.

use comwatch_common::{LineState, Ticks};
use comwatch_io::OutputBank;
use comwatch_monitor::{HeartbeatMonitor, LinkHealth};

/// Alarm channel used by all scenarios.
pub const ALARM_CHANNEL: usize = 13;

/// One monitored link: an output bank, a monitor, and a heartbeat stamp.
pub struct Watch {
    pub bank: OutputBank,
    pub monitor: HeartbeatMonitor,
    pub last_heartbeat: Ticks,
}

impl Watch {
    /// Harness with default timing (10 s timeout, 500 ms blink interval).
    pub fn new() -> Self {
        Self {
            bank: OutputBank::new(),
            monitor: HeartbeatMonitor::new(),
            last_heartbeat: 0,
        }
    }

    /// Harness with explicit timing.
    pub fn with_timing(timeout_ms: u32, blink_ms: u32) -> Self {
        Self {
            bank: OutputBank::new(),
            monitor: HeartbeatMonitor::with_timing(timeout_ms, blink_ms),
            last_heartbeat: 0,
        }
    }

    /// Record a heartbeat stamped `at`.
    pub fn beat_at(&mut self, at: Ticks) {
        self.last_heartbeat = at;
    }

    /// Evaluate the link at `now` and drive the alarm channel.
    pub fn check_at(&mut self, now: Ticks) -> LinkHealth {
        self.monitor
            .check(&mut self.bank, ALARM_CHANNEL, self.last_heartbeat, now)
    }

    /// Current state of the alarm channel.
    pub fn line(&self) -> LineState {
        self.bank.read(ALARM_CHANNEL)
    }
}
