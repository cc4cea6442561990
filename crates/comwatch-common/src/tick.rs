//! Wrapping millisecond tick arithmetic.
//!
//! The supervision clock is a free-running `u32` millisecond counter that
//! wraps at `u32::MAX` (roughly every 49.7 days). Elapsed time between two
//! readings is computed with modular subtraction, which stays exact across
//! wraparound as long as the true elapsed duration is shorter than the
//! counter range.

/// A reading of the wrapping millisecond counter.
pub type Ticks = u32;

/// Milliseconds elapsed from `since` to `now`.
///
/// Uses unsigned modular subtraction, so a counter wrap between the two
/// readings does not corrupt the result: `elapsed(10, u32::MAX - 5)` is `16`.
#[must_use]
#[inline]
pub fn elapsed(now: Ticks, since: Ticks) -> u32 {
    now.wrapping_sub(since)
}
