//! Run loops: call `Pacer::take` until a deadline passes or a count is reached.
//!
//! Both loops are synchronous and single-threaded. The driver does not
//! enforce ordering between ticks; that is the pacer's job.
use crate::config::RunMode;
use crate::util::actual_rate;
use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use std::time::{Duration, Instant};

const MAX_PREALLOC: u64 = 1 << 20;

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub mode: RunMode,
    pub iterations: u64,
    pub elapsed: Duration,
    /// `iterations / elapsed` in calls per second (0.0 when nothing elapsed).
    pub actual_rate: f64,
    /// Instants returned by `take`, in order. Empty unless tick recording is on.
    pub ticks: Vec<Instant>,
}

#[derive(Debug, Clone)]
pub struct Driver<C: Clock> {
    clock: C,
    record_ticks: bool,
}

impl<C: Clock> Driver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            record_ticks: false,
        }
    }

    /// Keep every released instant in `RunResult::ticks` (for run statistics).
    pub fn record_ticks(mut self, on: bool) -> Self {
        self.record_ticks = on;
        self
    }

    pub fn run<P: Pacer + ?Sized>(&self, pacer: &mut P, mode: RunMode) -> RunResult {
        match mode {
            RunMode::Duration(d) => self.run_for_duration(pacer, d),
            RunMode::Count(n) => self.run_for_count(pacer, n),
        }
    }

    /// Tick while less than `duration` has elapsed since the start. The check
    /// runs before each tick, so the last tick may finish after the deadline.
    /// A duration past the clock's range simply never expires.
    pub fn run_for_duration<P: Pacer + ?Sized>(
        &self,
        pacer: &mut P,
        duration: Duration,
    ) -> RunResult {
        tracing::info!(?duration, "duration based run");
        let start = self.clock.now();
        let mut ticks = Vec::new();
        let mut i: u64 = 0;
        while self.clock.now().saturating_duration_since(start) < duration {
            let released = pacer.take();
            i += 1;
            if self.record_ticks {
                ticks.push(released);
            }
            tracing::trace!(iter = i, "tick");
        }
        self.finish(RunMode::Duration(duration), start, i, ticks)
    }

    /// Tick exactly `n` times.
    pub fn run_for_count<P: Pacer + ?Sized>(&self, pacer: &mut P, n: u64) -> RunResult {
        tracing::info!(iterations = n, "count based run");
        let start = self.clock.now();
        let mut ticks = Vec::with_capacity(if self.record_ticks {
            usize::try_from(n.min(MAX_PREALLOC)).unwrap_or(0)
        } else {
            0
        });
        let mut i: u64 = 0;
        while i < n {
            let released = pacer.take();
            i += 1;
            if self.record_ticks {
                ticks.push(released);
            }
            tracing::trace!(iter = i, "tick");
        }
        self.finish(RunMode::Count(n), start, i, ticks)
    }

    fn finish(
        &self,
        mode: RunMode,
        start: Instant,
        iterations: u64,
        ticks: Vec<Instant>,
    ) -> RunResult {
        let elapsed = self.clock.now().saturating_duration_since(start);
        let rate = actual_rate(iterations, elapsed);
        tracing::info!(
            ?elapsed,
            iterations,
            actual_rate = rate,
            "run done"
        );
        RunResult {
            mode,
            iterations,
            elapsed,
            actual_rate: rate,
            ticks,
        }
    }
}
