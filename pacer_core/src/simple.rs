//! Reference pacer: releases tick `n` at `start + n / rate`.
//!
//! Open loop. When the caller is late by more than [`WARN_THRESHOLD`] the
//! tick is released immediately with a warning and the lost time is never
//! made up by bursting later ticks.
use crate::error::PacerError;
use crate::util::{check_rate, positive_duration, signed_nanos, target_elapsed};
use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use std::time::{Duration, Instant};

/// Lag beyond which a tick is reported and released without sleeping.
pub const WARN_THRESHOLD: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct SimplePacer<C: Clock> {
    rate: f64,
    start: Instant,
    count: u64,
    lagged: u64,
    clock: C,
}

impl<C: Clock> SimplePacer<C> {
    /// Start the schedule now, at `rate` calls per second.
    pub fn new(rate: f64, clock: C) -> Result<Self, PacerError> {
        let rate = check_rate(rate)?;
        let start = clock.now();
        Ok(Self {
            rate,
            start,
            count: 0,
            lagged: 0,
            clock,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Number of ticks taken so far; also the number of the last tick.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Ticks released late (beyond the warning threshold) so far.
    pub fn lagged_ticks(&self) -> u64 {
        self.lagged
    }

    /// Ideal elapsed time since `start` for tick number `tick` (1-based).
    pub fn target_elapsed(&self, tick: u64) -> Duration {
        target_elapsed(tick, self.rate)
    }
}

impl<C: Clock> Pacer for SimplePacer<C> {
    fn take(&mut self) -> Instant {
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.start);
        self.count += 1;
        let target = target_elapsed(self.count, self.rate);
        let sleep_ns = signed_nanos(target) - signed_nanos(elapsed);
        tracing::debug!(
            ?elapsed,
            tick = self.count,
            ?target,
            sleep_ns,
            "pacing tick"
        );

        if sleep_ns < -signed_nanos(WARN_THRESHOLD) {
            self.lagged += 1;
            let behind = positive_duration(-sleep_ns).unwrap_or_default();
            tracing::warn!(
                ?behind,
                tick = self.count,
                rate = self.rate,
                "falling behind schedule, rate too high?"
            );
            return now;
        }

        // Slightly late (within the threshold) means no sleep at all.
        if let Some(d) = positive_duration(sleep_ns) {
            self.clock.sleep(d);
        }
        now
    }
}
