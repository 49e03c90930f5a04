//! Leaky-bucket baseline pacer, used to compare against [`SimplePacer`].
//!
//! Integer rate only. Ticks are spaced `1s / rate` apart relative to the
//! previous release; idle time is banked as slack (up to `slack` intervals)
//! so a caller that falls behind may briefly run faster to catch up.
//!
//! [`SimplePacer`]: crate::simple::SimplePacer
use crate::error::PacerError;
use crate::util::{NANOS_PER_SEC, positive_duration, signed_nanos};
use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use std::time::{Duration, Instant};

/// Intervals of banked idle time a caller may spend catching up.
pub const DEFAULT_SLACK: u32 = 10;

#[derive(Debug)]
pub struct LeakyBucketPacer<C: Clock> {
    rate: u32,
    per: Duration,
    max_slack_ns: i128,
    last: Option<Instant>,
    sleep_for_ns: i128,
    clock: C,
}

impl<C: Clock> LeakyBucketPacer<C> {
    pub fn new(rate: u32, clock: C) -> Result<Self, PacerError> {
        Self::with_slack(rate, DEFAULT_SLACK, clock)
    }

    pub fn with_slack(rate: u32, slack: u32, clock: C) -> Result<Self, PacerError> {
        if rate == 0 {
            return Err(PacerError::InvalidRate(0.0));
        }
        let per = Duration::from_nanos(NANOS_PER_SEC / u64::from(rate));
        Ok(Self {
            rate,
            per,
            max_slack_ns: signed_nanos(per) * i128::from(slack),
            last: None,
            sleep_for_ns: 0,
            clock,
        })
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Interval between releases.
    pub fn per(&self) -> Duration {
        self.per
    }
}

impl<C: Clock> Pacer for LeakyBucketPacer<C> {
    fn take(&mut self) -> Instant {
        let now = self.clock.now();
        let Some(last) = self.last else {
            self.last = Some(now);
            return now;
        };

        let since_last = signed_nanos(now.saturating_duration_since(last));
        self.sleep_for_ns += signed_nanos(self.per) - since_last;
        if self.sleep_for_ns < -self.max_slack_ns {
            self.sleep_for_ns = -self.max_slack_ns;
        }

        let released = match positive_duration(self.sleep_for_ns) {
            Some(d) => {
                self.clock.sleep(d);
                self.sleep_for_ns = 0;
                now + d
            }
            None => now,
        };
        tracing::trace!(sleep_for_ns = self.sleep_for_ns, "leaky bucket tick");
        self.last = Some(released);
        released
    }
}
