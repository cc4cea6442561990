//! Counter wraparound scenarios.
//!
//! The millisecond counter wraps to zero after about 49.7 days of uptime.
//! Elapsed times are computed with wrapping subtraction, so a wrap in the
//! middle of a watch must not fire a spurious alarm or stall the blinker.

use comwatch_common::LineState;
use comwatch_monitor::LinkHealth;

use super::common::Watch;

/// Heartbeat just before the counter wrapped, check just after: the
/// elapsed time is the short way around.
#[test]
fn test_wraparound_elapsed_is_short() {
    let mut watch = Watch::new();
    watch.beat_at(u32::MAX - 5);
    assert_eq!(watch.check_at(10), LinkHealth::Healthy);
    assert_eq!(watch.line(), LineState::Deasserted);

    // A 16 ms timeout sees those same 16 ms as already expired.
    let mut tight = Watch::with_timing(16, 500);
    tight.beat_at(u32::MAX - 5);
    assert_eq!(tight.check_at(10), LinkHealth::Alarmed);
}

/// A link beating once a second straddling the wrap never alarms.
#[test]
fn test_steady_heartbeats_across_wraparound() {
    let mut watch = Watch::new();
    let start = u32::MAX - 10_000;

    for i in 0..20 {
        let t = start.wrapping_add(i * 1_000);
        watch.beat_at(t);
        assert_eq!(watch.check_at(t.wrapping_add(500)), LinkHealth::Healthy);
        assert_eq!(watch.line(), LineState::Deasserted);
    }
}

/// Blink phase carries straight through the wrap: checks landing exactly
/// one half-period apart keep toggling on schedule.
#[test]
fn test_blink_phase_continues_across_wraparound() {
    let mut watch = Watch::new();
    watch.beat_at(u32::MAX - 20_000);

    // Enter the alarm and settle the phase before the boundary.
    assert_eq!(watch.check_at(u32::MAX - 10_000), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Asserted);
    assert_eq!(watch.check_at(u32::MAX - 9_500), LinkHealth::Alarmed);
    assert_eq!(watch.line(), LineState::Deasserted);

    let mut expect = LineState::Asserted;
    let mut now = u32::MAX - 9_000;
    for _ in 0..40 {
        assert_eq!(watch.check_at(now), LinkHealth::Alarmed);
        assert_eq!(watch.line(), expect, "at t={now}");
        expect = expect.toggled();
        now = now.wrapping_add(500);
    }
}
