//! In-memory digital output image.

use comwatch_common::LineState;
use comwatch_monitor::OutputPort;

/// Number of channels in the bank (one 32-bit word, one bit per channel).
pub const CHANNEL_COUNT: usize = 32;

/// A bank of 32 digital output channels backed by a single word.
///
/// Channel `n` is bit `n` of the word. Out-of-range channels read deasserted
/// and ignore writes, so the polling path never has to guard channel ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputBank {
    word: u32,
}

impl OutputBank {
    /// Create a bank with every channel deasserted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a channel. Out of range reads deasserted.
    #[inline]
    #[must_use]
    pub fn read(&self, channel: usize) -> LineState {
        if channel < CHANNEL_COUNT {
            LineState::from((self.word >> channel) & 1 != 0)
        } else {
            LineState::Deasserted
        }
    }

    /// Drive a channel. Out of range is ignored.
    #[inline]
    pub fn write(&mut self, channel: usize, state: LineState) {
        if channel < CHANNEL_COUNT {
            if state.is_asserted() {
                self.word |= 1 << channel;
            } else {
                self.word &= !(1 << channel);
            }
        }
    }

    /// All channels as one word (bit `n` = channel `n`).
    #[inline]
    #[must_use]
    pub fn as_word(&self) -> u32 {
        self.word
    }

    /// Deassert every channel.
    pub fn clear(&mut self) {
        self.word = 0;
    }
}

impl OutputPort for OutputBank {
    fn read(&self, channel: usize) -> LineState {
        OutputBank::read(self, channel)
    }

    fn write(&mut self, channel: usize, state: LineState) {
        OutputBank::write(self, channel, state);
    }
}
