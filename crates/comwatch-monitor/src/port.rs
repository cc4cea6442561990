//! The digital output seam between the supervision blocks and the I/O layer.

use comwatch_common::LineState;

/// A bank of digital output channels.
///
/// The blocks in this crate drive their alarm indicator through this trait;
/// implementations decide what a channel physically is - a bit in a memory
/// image, a GPIO line, a test fixture. Both operations are infallible.
/// Out-of-range channel handling is left to the implementation; the in-memory
/// bank in `comwatch-io` reads such channels as deasserted and ignores writes.
pub trait OutputPort {
    /// Current state of a channel.
    fn read(&self, channel: usize) -> LineState;

    /// Drive a channel to `state`.
    fn write(&mut self, channel: usize, state: LineState);
}

/// In-memory four-channel port used by the unit tests in this crate.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct TestPort {
    states: [LineState; 4],
}

#[cfg(test)]
impl TestPort {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl OutputPort for TestPort {
    fn read(&self, channel: usize) -> LineState {
        self.states.get(channel).copied().unwrap_or_default()
    }

    fn write(&mut self, channel: usize, state: LineState) {
        if let Some(slot) = self.states.get_mut(channel) {
            *slot = state;
        }
    }
}
