//! I/O collaborators for heartbeat supervision.
//!
//! This crate implements the seams the supervision blocks are driven through:
//!
//! - [`bank`]: in-memory digital output image ([`OutputBank`])
//! - [`clock`]: wrapping millisecond clocks ([`SystemClock`], [`ManualClock`])
//! - [`source`]: heartbeat byte sources ([`ScriptedSource`], [`SimulatedSource`])
//! - [`serial`]: non-blocking serial tty source ([`SerialPort`])

pub mod bank;
pub mod clock;
pub mod serial;
pub mod source;

pub use bank::{OutputBank, CHANNEL_COUNT};
pub use clock::{Clock, ManualClock, SystemClock};
pub use serial::SerialPort;
pub use source::{HeartbeatSource, ScriptedSource, SimulatedSource};
