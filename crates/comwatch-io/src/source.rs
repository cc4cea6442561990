//! Heartbeat byte sources.

use comwatch_common::WatchResult;
use std::collections::VecDeque;

/// A non-blocking source of heartbeat bytes.
///
/// The supervisor takes at most one byte per poll; `None` means nothing is
/// pending. The heartbeat convention is sparse - one character per heartbeat
/// period - so a one-byte poll keeps up with any sane sender.
pub trait HeartbeatSource {
    /// Take the next pending byte, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying device fails. The supervisor
    /// logs it and keeps polling: a dead link stops producing heartbeats
    /// and raises the alarm on its own.
    fn read_byte(&mut self) -> WatchResult<Option<u8>>;
}

/// Scripted source that replays a fixed sequence of poll results.
///
/// Each entry answers exactly one poll, which keeps scripts aligned with
/// supervisor iterations in tests. An exhausted script reads `None` forever.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Option<u8>>,
}

impl ScriptedSource {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte to hand out on the next poll.
    pub fn push_byte(&mut self, byte: u8) {
        self.script.push_back(Some(byte));
    }

    /// Append `polls` empty polls.
    pub fn push_quiet(&mut self, polls: usize) {
        for _ in 0..polls {
            self.script.push_back(None);
        }
    }

    /// Scripted polls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl From<Vec<Option<u8>>> for ScriptedSource {
    fn from(script: Vec<Option<u8>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl HeartbeatSource for ScriptedSource {
    fn read_byte(&mut self) -> WatchResult<Option<u8>> {
        Ok(self.script.pop_front().flatten())
    }
}

/// Synthetic link for simulated runs.
///
/// Emits the heartbeat byte every `beat_every` polls, optionally going
/// silent after `stop_after` beats so the alarm path can be watched without
/// any hardware attached.
#[derive(Debug)]
pub struct SimulatedSource {
    beat: u8,
    beat_every: u64,
    stop_after: Option<u64>,
    polls: u64,
    beats: u64,
}

impl SimulatedSource {
    /// Create a simulated link emitting `beat` every `beat_every` polls.
    #[must_use]
    pub fn new(beat: u8, beat_every: u64, stop_after: Option<u64>) -> Self {
        Self {
            beat,
            beat_every,
            stop_after,
            polls: 0,
            beats: 0,
        }
    }

    /// Beats emitted so far.
    #[must_use]
    pub fn beats(&self) -> u64 {
        self.beats
    }
}

impl HeartbeatSource for SimulatedSource {
    fn read_byte(&mut self) -> WatchResult<Option<u8>> {
        self.polls += 1;
        if self.stop_after.is_some_and(|limit| self.beats >= limit) {
            return Ok(None);
        }
        if self.beat_every > 0 && self.polls % self.beat_every == 0 {
            self.beats += 1;
            return Ok(Some(self.beat));
        }
        Ok(None)
    }
}
