//! Heartbeat timeout detection.

use crate::blink::BlinkDriver;
use crate::port::OutputPort;
use comwatch_common::{elapsed, LineState, Ticks};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default heartbeat timeout in millisecond ticks.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Verdict of a single heartbeat check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkHealth {
    /// A heartbeat arrived within the timeout window.
    #[default]
    Healthy,
    /// The link has been silent for at least the timeout.
    Alarmed,
}

impl LinkHealth {
    /// Returns true if the link is considered lost.
    #[must_use]
    pub fn is_alarmed(&self) -> bool {
        matches!(self, Self::Alarmed)
    }
}

impl fmt::Display for LinkHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "HEALTHY"),
            Self::Alarmed => write!(f, "ALARMED"),
        }
    }
}

/// Heartbeat timeout monitor for one supervised channel.
///
/// On every poll the monitor compares the silence since the last heartbeat
/// against its timeout. While the silence stays below the timeout the alarm
/// channel is written deasserted unconditionally; from the timeout onward the
/// owned [`BlinkDriver`] takes over and toggles the channel at its cadence.
///
/// The monitor carries the per-channel alarm state, so a deployment watching
/// several links runs one monitor per channel. The heartbeat timestamp itself
/// is owned by the caller (the polling loop that actually sees the bytes) and
/// passed in read-only on every check.
///
/// # Example
///
/// ```
/// use comwatch_common::LineState;
/// use comwatch_monitor::{HeartbeatMonitor, LinkHealth, OutputPort};
///
/// struct Led(LineState);
///
/// impl OutputPort for Led {
///     fn read(&self, _channel: usize) -> LineState {
///         self.0
///     }
///     fn write(&mut self, _channel: usize, state: LineState) {
///         self.0 = state;
///     }
/// }
///
/// let mut led = Led(LineState::Deasserted);
/// let mut monitor = HeartbeatMonitor::with_timing(10_000, 500);
///
/// // 9 s of silence: healthy, channel held off.
/// assert_eq!(monitor.check(&mut led, 0, 0, 9_000), LinkHealth::Healthy);
/// assert_eq!(led.0, LineState::Deasserted);
///
/// // Past the timeout: the blink cadence starts.
/// assert_eq!(monitor.check(&mut led, 0, 0, 10_001), LinkHealth::Alarmed);
/// assert_eq!(led.0, LineState::Asserted);
///
/// // A heartbeat at 10.4 s clears the alarm on the very next check.
/// assert_eq!(monitor.check(&mut led, 0, 10_400, 10_450), LinkHealth::Healthy);
/// assert_eq!(led.0, LineState::Deasserted);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatMonitor {
    /// Silence threshold in millisecond ticks.
    timeout: u32,
    /// Alarm cadence driver for this monitor's channel.
    blink: BlinkDriver,
}

impl Default for HeartbeatMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeartbeatMonitor {
    /// Create a monitor with the default 10 s timeout and 500 ms blink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_MS,
            blink: BlinkDriver::new(),
        }
    }

    /// Create a monitor with explicit timing, both in millisecond ticks.
    #[must_use]
    pub fn with_timing(timeout_ms: u32, blink_interval_ms: u32) -> Self {
        Self {
            timeout: timeout_ms,
            blink: BlinkDriver::with_interval(blink_interval_ms),
        }
    }

    /// Run one heartbeat check against `channel`.
    ///
    /// Computes the silence `now - last_heartbeat` with wrapping arithmetic,
    /// so heartbeat timestamps taken before a counter wrap stay valid. At or
    /// past the timeout the alarm cadence advances; below it the channel is
    /// forced deasserted, whatever state the cadence left it in.
    ///
    /// Safe to call at any rate and at irregular intervals; only the
    /// visibility of blinking depends on polling faster than the blink
    /// half-period.
    pub fn check(
        &mut self,
        port: &mut impl OutputPort,
        channel: usize,
        last_heartbeat: Ticks,
        now: Ticks,
    ) -> LinkHealth {
        if elapsed(now, last_heartbeat) >= self.timeout {
            self.blink.blink(port, channel, now);
            LinkHealth::Alarmed
        } else {
            port.write(channel, LineState::Deasserted);
            LinkHealth::Healthy
        }
    }

    /// Silence threshold in millisecond ticks.
    #[must_use]
    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    /// The monitor's alarm cadence driver.
    #[must_use]
    pub fn blink(&self) -> &BlinkDriver {
        &self.blink
    }

    /// Put the alarm cadence back to its power-on phase.
    pub fn reset(&mut self) {
        self.blink.reset();
    }
}
