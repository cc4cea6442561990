//! Alarm timeline scenarios.
//!
//! Walks the monitor through the canonical life of a watched link: boot,
//! quiet healthy operation, heartbeat loss, alarm blinking, and recovery.

use comwatch_common::LineState;
use comwatch_io::{Clock, HeartbeatSource, ManualClock, ScriptedSource};
use comwatch_monitor::LinkHealth;

use super::common::{Watch, ALARM_CHANNEL};

/// Boot with no heartbeat ever received: the line stays down for the
/// whole timeout, then blinks at the configured cadence.
#[test]
fn test_boot_timeline_to_alarm_and_blink() {
    let mut watch = Watch::new();

    for now in [1_000, 3_000, 9_000] {
        assert_eq!(watch.check_at(now), LinkHealth::Healthy);
        assert_eq!(watch.line(), LineState::Deasserted, "at t={now}");
    }

    // Timeout expired: the first alarmed check raises the line.
    assert_eq!(watch.check_at(10_001), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Asserted);

    // Half a period later the line drops again.
    assert_eq!(watch.check_at(10_501), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Deasserted);

    // Within the same half-period nothing moves.
    assert_eq!(watch.check_at(10_600), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Deasserted);
}

/// A heartbeat in the middle of an alarm clears it and forces the line
/// down on the next check, whatever blink phase it was in.
#[test]
fn test_heartbeat_recovery_forces_line_down() {
    let mut watch = Watch::new();

    assert_eq!(watch.check_at(10_001), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Asserted);

    watch.beat_at(10_400);
    assert_eq!(watch.check_at(10_450), LinkHealth::Healthy);
    assert_eq!(watch.line(), LineState::Deasserted);
}

/// Healthy checks repeatedly force the line down, including when
/// something else asserted the channel behind the monitor's back.
#[test]
fn test_healthy_check_is_idempotent() {
    let mut watch = Watch::new();
    watch.beat_at(5_000);

    watch.bank.write(ALARM_CHANNEL, LineState::Asserted);

    for _ in 0..50 {
        assert_eq!(watch.check_at(5_100), LinkHealth::Healthy);
        assert_eq!(watch.line(), LineState::Deasserted);
    }
}

/// A link beating once a second never comes close to alarming.
#[test]
fn test_regular_heartbeats_never_alarm() {
    let mut watch = Watch::new();

    for t in (0..60_000).step_by(1_000) {
        watch.beat_at(t);
        assert_eq!(watch.check_at(t + 500), LinkHealth::Healthy);
        assert_eq!(watch.line(), LineState::Deasserted);
    }
}

/// During silence the alarm toggles once per half-period, giving the
/// nominal 1 Hz square wave.
#[test]
fn test_blink_cadence_during_silence() {
    let mut watch = Watch::new();
    let mut toggles = 0;
    let mut last = watch.line();

    for now in (10_000..=20_000).step_by(50) {
        watch.check_at(now);
        if watch.line() != last {
            toggles += 1;
            last = watch.line();
        }
    }

    // First assertion at 10 s, then one toggle per 500 ms through 20 s.
    assert_eq!(toggles, 21);
}

/// Full link scenario: scripted bytes arrive through the source
/// abstraction, stamped against a manual clock, then the sender dies.
#[test]
fn test_scripted_link_end_to_end() {
    let mut watch = Watch::new();
    let clock = ManualClock::new(0);
    let mut source = ScriptedSource::new();

    // One heartbeat per second for three seconds, then nothing.
    for poll in 0..30 {
        if poll % 10 == 0 {
            source.push_byte(b'T');
        } else {
            source.push_quiet(1);
        }
    }

    // Drain the script at a 100 ms poll period.
    for _ in 0..30 {
        if let Ok(Some(byte)) = source.read_byte() {
            if byte.eq_ignore_ascii_case(&b'T') {
                watch.beat_at(clock.now());
            }
        }
        assert_eq!(watch.check_at(clock.now()), LinkHealth::Healthy);
        clock.advance(100);
    }

    // Last beat landed at t=2000; the line holds until 12 s...
    assert_eq!(watch.check_at(11_999), LinkHealth::Healthy);
    assert_eq!(watch.line(), LineState::Deasserted);

    // ...and alarms exactly at the timeout.
    assert_eq!(watch.check_at(12_000), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Asserted);
}
