//! Polling supervisor tying the heartbeat source to the link monitor.
//!
//! The supervisor owns one end-to-end watch: it drains at most one byte
//! from the heartbeat source per tick, stamps matching heartbeats, and
//! hands the result to [`HeartbeatMonitor::check`]. Source read failures
//! are logged and absorbed so the alarm output keeps being driven even
//! when the transport misbehaves.

use crate::signals::SignalHandler;
use comwatch_common::{elapsed, LineState, Ticks, WatchConfig};
use comwatch_io::{Clock, HeartbeatSource, OutputBank};
use comwatch_monitor::{HeartbeatMonitor, LinkHealth};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Cooperative polling loop for one monitored link.
///
/// Generic over the heartbeat source and the clock so tests can drive it
/// with scripted bytes and manual time.
#[derive(Debug)]
pub struct Supervisor<S, C> {
    source: S,
    clock: C,
    bank: OutputBank,
    monitor: HeartbeatMonitor,
    channel: usize,
    beat: u8,
    poll_period: Duration,
    status_every: u64,
    last_heartbeat: Ticks,
    health: LinkHealth,
    polls: u64,
    beats: u64,
    read_errors: u64,
    in_failure_streak: bool,
}

impl<S: HeartbeatSource, C: Clock> Supervisor<S, C> {
    /// Create a supervisor from configuration.
    ///
    /// The link starts healthy with a full timeout of grace before the
    /// first heartbeat is due.
    pub fn new(source: S, clock: C, config: &WatchConfig) -> Self {
        let monitor = HeartbeatMonitor::with_timing(
            config.monitor.timeout_ticks(),
            config.monitor.blink_interval_ticks(),
        );
        let last_heartbeat = clock.now();

        Self {
            source,
            clock,
            bank: OutputBank::new(),
            monitor,
            channel: config.monitor.channel,
            beat: config.link.heartbeat_byte(),
            poll_period: config.supervisor.poll_period,
            status_every: config.supervisor.status_every,
            last_heartbeat,
            health: LinkHealth::Healthy,
            polls: 0,
            beats: 0,
            read_errors: 0,
            in_failure_streak: false,
        }
    }

    /// Run one supervision tick.
    ///
    /// Reads at most one byte from the source, stamps it if it is a
    /// heartbeat, then evaluates link health and drives the alarm channel.
    pub fn poll_once(&mut self) {
        self.polls += 1;

        match self.source.read_byte() {
            Ok(Some(byte)) => {
                if byte.eq_ignore_ascii_case(&self.beat) {
                    self.last_heartbeat = self.clock.now();
                    self.beats += 1;
                    debug!(at = self.last_heartbeat, "Heartbeat received");
                }
                self.in_failure_streak = false;
            }
            Ok(None) => {
                self.in_failure_streak = false;
            }
            Err(e) => {
                self.read_errors += 1;
                // Warn once per streak, then stay quiet until a read succeeds.
                if !self.in_failure_streak {
                    warn!(error = %e, "Heartbeat source read failed, continuing");
                    self.in_failure_streak = true;
                }
            }
        }

        let now = self.clock.now();
        let health = self
            .monitor
            .check(&mut self.bank, self.channel, self.last_heartbeat, now);

        if health != self.health {
            match health {
                LinkHealth::Alarmed => warn!(
                    channel = self.channel,
                    silent_ms = elapsed(now, self.last_heartbeat),
                    "Heartbeat lost, blinking alarm"
                ),
                LinkHealth::Healthy => info!(
                    channel = self.channel,
                    "Heartbeat restored, alarm cleared"
                ),
            }
            self.health = health;
        }
    }

    /// Poll until shutdown is requested or `max_polls` ticks have run.
    ///
    /// A `max_polls` of zero means no limit. The configured poll period is
    /// slept between ticks.
    pub fn run(&mut self, signals: &SignalHandler, max_polls: u64) {
        info!(
            channel = self.channel,
            timeout_ms = self.monitor.timeout(),
            blink_ms = self.monitor.blink().interval(),
            "Entering supervision loop"
        );

        loop {
            if signals.shutdown_requested() {
                info!("Shutdown requested, leaving supervision loop");
                break;
            }

            self.poll_once();

            if self.status_every > 0 && self.polls % self.status_every == 0 {
                info!(
                    polls = self.polls,
                    beats = self.beats,
                    read_errors = self.read_errors,
                    health = %self.health,
                    "Periodic status"
                );
            }

            if max_polls > 0 && self.polls >= max_polls {
                info!(polls = self.polls, "Maximum poll count reached");
                break;
            }

            if !self.poll_period.is_zero() {
                std::thread::sleep(self.poll_period);
            }
        }
    }

    /// Current link health.
    #[must_use]
    pub fn health(&self) -> LinkHealth {
        self.health
    }

    /// Current state of the alarm channel.
    #[must_use]
    pub fn line_state(&self) -> LineState {
        self.bank.read(self.channel)
    }

    /// Total supervision ticks run.
    #[must_use]
    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Heartbeats accepted so far.
    #[must_use]
    pub fn beats(&self) -> u64 {
        self.beats
    }

    /// Source read failures absorbed so far.
    #[must_use]
    pub fn read_errors(&self) -> u64 {
        self.read_errors
    }
}
