//! Non-blocking alarm blink cadence.

use crate::port::OutputPort;
use comwatch_common::{elapsed, LineState, Ticks};
use serde::{Deserialize, Serialize};

/// Default blink half-period in millisecond ticks.
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 500;

/// Free-running square-wave toggle for an alarm channel.
///
/// Each call compares the wrapping millisecond counter against the tick of
/// the last toggle. Once at least `interval` ticks have passed, the driver
/// records the new phase, reads the channel's current state and writes its
/// negation. Calls inside the half-period do nothing, so the caller may poll
/// as fast as it likes; toggling only stops being visible when polling is
/// slower than the half-period.
///
/// Phase lives in the driver instance, so independent channels get
/// independent cadences by giving each its own driver. The phase starts at
/// tick zero and survives healthy periods; only [`reset`](Self::reset) puts
/// it back.
///
/// # Timing Diagram
///
/// ```text
///             +--------+        +--------+
/// channel     |        |        |        |
///          ---+        +--------+        +---
///             ^        ^        ^        ^
///             toggle every `interval` ticks while invoked
/// ```
///
/// # Example
///
/// ```
/// use comwatch_common::LineState;
/// use comwatch_monitor::{BlinkDriver, OutputPort};
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
/// let mut blink = BlinkDriver::with_interval(500);
///
/// // Phase starts at tick 0, so the first call past the half-period toggles.
/// blink.blink(&mut led, 0, 600);
/// assert_eq!(led.0, LineState::Asserted);
///
/// // 100 ticks later: inside the half-period, no change.
/// blink.blink(&mut led, 0, 700);
/// assert_eq!(led.0, LineState::Asserted);
///
/// // A full half-period after the toggle: back off.
/// blink.blink(&mut led, 0, 1_100);
/// assert_eq!(led.0, LineState::Deasserted);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlinkDriver {
    /// Blink half-period in millisecond ticks.
    interval: u32,
    /// Tick at which the channel was last toggled.
    last_toggle: Ticks,
    /// Mirror of the state most recently written to the channel.
    state: LineState,
}

impl Default for BlinkDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkDriver {
    /// Create a driver with the default 500 ms half-period.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_BLINK_INTERVAL_MS)
    }

    /// Create a driver with an explicit half-period in millisecond ticks.
    #[must_use]
    pub fn with_interval(interval_ms: u32) -> Self {
        Self {
            interval: interval_ms,
            last_toggle: 0,
            state: LineState::Deasserted,
        }
    }

    /// Advance the cadence by one poll.
    ///
    /// Toggles `channel` when at least `interval` ticks have elapsed since
    /// the last toggle, otherwise leaves it untouched. The new state is the
    /// negation of what the port reads back, so writes made to the channel
    /// by others are honored rather than fought.
    ///
    /// # Arguments
    ///
    /// * `port` - The output bank holding the channel.
    /// * `channel` - Channel to toggle.
    /// * `now` - Current reading of the wrapping millisecond counter.
    pub fn blink(&mut self, port: &mut impl OutputPort, channel: usize, now: Ticks) {
        if elapsed(now, self.last_toggle) >= self.interval {
            self.last_toggle = now;
            let next = port.read(channel).toggled();
            port.write(channel, next);
            self.state = next;
        }
    }

    /// Blink half-period in millisecond ticks.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Tick of the most recent toggle (zero until the first one).
    #[must_use]
    pub fn last_toggle(&self) -> Ticks {
        self.last_toggle
    }

    /// State most recently written to the channel.
    #[must_use]
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Put the phase back to power-on values.
    ///
    /// Does not drive the channel; the next [`blink`](Self::blink) call acts
    /// as if the driver were freshly constructed.
    pub fn reset(&mut self) {
        self.last_toggle = 0;
        self.state = LineState::Deasserted;
    }
}
