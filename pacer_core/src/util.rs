//! Time and rate helpers shared by the pacers and the driver.

use crate::error::PacerError;
use std::time::Duration;

/// Number of nanoseconds in one second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;
/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Ideal cumulative elapsed time for the `tick`-th release at `rate` calls/s.
///
/// Computed as `tick / rate` seconds in floating point, then truncated (not
/// rounded) to whole nanoseconds. Saturates at `u64::MAX` nanoseconds.
#[inline]
pub fn target_elapsed(tick: u64, rate: f64) -> Duration {
    let secs = tick as f64 / rate;
    Duration::from_nanos((secs * NANOS_PER_SEC as f64) as u64)
}

/// Nominal interval between ticks at `rate` calls/s, truncated to nanoseconds.
#[inline]
pub fn period(rate: f64) -> Duration {
    target_elapsed(1, rate)
}

/// Duration as signed nanoseconds, for schedule arithmetic that can go negative.
#[inline]
pub fn signed_nanos(d: Duration) -> i128 {
    d.as_nanos() as i128
}

/// Positive part of a signed nanosecond count as a `Duration`; `None` when <= 0.
#[inline]
pub fn positive_duration(ns: i128) -> Option<Duration> {
    if ns <= 0 {
        return None;
    }
    Some(Duration::from_nanos(u64::try_from(ns).unwrap_or(u64::MAX)))
}

/// Calls per second achieved over `elapsed`. Zero elapsed time reports 0.0.
#[inline]
pub fn actual_rate(iterations: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    iterations as f64 / elapsed.as_secs_f64()
}

/// Validate a target rate: finite and strictly positive.
#[inline]
pub fn check_rate(rate: f64) -> Result<f64, PacerError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(PacerError::InvalidRate(rate))
    }
}

/// Round a configured rate to the integer rate the baseline pacer runs at.
///
/// Rounds half away from zero (`999.6 -> 1000`, `2.5 -> 3`).
pub fn baseline_rate(rate: f64) -> Result<u32, PacerError> {
    let rate = check_rate(rate)?;
    let rounded = rate.round();
    if rounded < 1.0 {
        return Err(PacerError::RoundsToZero {
            configured: rate,
            rounded,
        });
    }
    if rounded > f64::from(u32::MAX) {
        return Err(PacerError::TooLarge(rate));
    }
    Ok(rounded as u32)
}
