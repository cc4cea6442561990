//! Heartbeat supervision function blocks.
//!
//! This crate provides the timing core of comwatch:
//!
//! - **Monitor** ([`monitor`]): heartbeat timeout detection
//! - **Blink** ([`blink`]): non-blocking alarm blink cadence
//! - **Port** ([`port`]): the digital output seam the blocks drive
//!
//! The blocks are pure polling logic over a wrapping millisecond counter.
//! They never block, never allocate, and never fail; a lost link shows up as
//! a blinking alarm channel, not as an error.
//!
//! # Example
//!
//! ```
//! use comwatch_common::LineState;
//! use comwatch_monitor::{HeartbeatMonitor, LinkHealth, OutputPort};
//!
//! struct Led(LineState);
//!
//! impl OutputPort for Led {
//!     fn read(&self, _channel: usize) -> LineState {
//!         self.0
//!     }
//!     fn write(&mut self, _channel: usize, state: LineState) {
//!         self.0 = state;
//!     }
//! }
//!
//! let mut led = Led(LineState::Deasserted);
//! let mut monitor = HeartbeatMonitor::new(); // 10 s timeout, 500 ms blink
//!
//! // 9 s after the last heartbeat: healthy, LED held off.
//! assert_eq!(monitor.check(&mut led, 0, 0, 9_000), LinkHealth::Healthy);
//! assert_eq!(led.0, LineState::Deasserted);
//!
//! // 11 s of silence: the alarm cadence starts.
//! assert_eq!(monitor.check(&mut led, 0, 0, 11_000), LinkHealth::Alarmed);
//! assert_eq!(led.0, LineState::Asserted);
//! ```

pub mod blink;
pub mod monitor;
pub mod port;

// Re-export main types for convenience
pub use blink::{BlinkDriver, DEFAULT_BLINK_INTERVAL_MS};
pub use monitor::{HeartbeatMonitor, LinkHealth, DEFAULT_TIMEOUT_MS};
pub use port::OutputPort;
