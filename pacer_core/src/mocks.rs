//! Test and helper mocks for pacer_core

use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use std::time::{Duration, Instant};

/// A pacer that never waits: it counts calls and advances the clock by a
/// fixed amount of simulated work per call. Useful for driving the run loops
/// on a virtual clock.
#[derive(Debug)]
pub struct CountingPacer<C: Clock> {
    clock: C,
    work: Duration,
    calls: u64,
}

impl<C: Clock> CountingPacer<C> {
    pub fn new(clock: C, work: Duration) -> Self {
        Self {
            clock,
            work,
            calls: 0,
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl<C: Clock> Pacer for CountingPacer<C> {
    fn take(&mut self) -> Instant {
        self.calls += 1;
        let now = self.clock.now();
        self.clock.sleep(self.work);
        now
    }
}
