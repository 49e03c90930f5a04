#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Rate pacing core (clock-agnostic).
//!
//! All time reads and sleeps go through `pacer_traits::Clock`, so every
//! pacer and run loop can be driven by a virtual clock in tests.
//!
//! ## Architecture
//!
//! - **SimplePacer**: tick `n` is released at `start + n / rate` (`simple` module)
//! - **LeakyBucketPacer**: integer-rate baseline for comparison (`leaky` module)
//! - **Driver**: duration-based and count-based run loops (`driver` module)
//! - **Configuration**: run mode and pacer choice (`config` module)
//! - **Stats**: inter-tick interval summary (`stats` module)

pub mod config;
pub mod conversions;
pub mod driver;
pub mod error;
pub mod leaky;
pub mod mocks;
pub mod simple;
pub mod stats;
pub mod util;

pub use config::{PacerChoice, RunMode, RunPlan};
pub use driver::{Driver, RunResult};
pub use error::{PacerError, Result};
pub use leaky::LeakyBucketPacer;
pub use simple::{SimplePacer, WARN_THRESHOLD};
pub use stats::TickStats;

use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use std::time::Instant;

/// The pacer picked for a run. Chosen once, never switched mid-run.
#[derive(Debug)]
pub enum SelectedPacer<C: Clock> {
    Simple(SimplePacer<C>),
    Baseline(LeakyBucketPacer<C>),
}

impl<C: Clock> SelectedPacer<C> {
    pub fn name(&self) -> &'static str {
        match self {
            SelectedPacer::Simple(_) => "simple",
            SelectedPacer::Baseline(_) => "baseline",
        }
    }

    /// Rate the pacer actually runs at (rounded for the baseline).
    pub fn rate(&self) -> f64 {
        match self {
            SelectedPacer::Simple(p) => p.rate(),
            SelectedPacer::Baseline(p) => f64::from(p.rate()),
        }
    }
}

impl<C: Clock> Pacer for SelectedPacer<C> {
    #[inline]
    fn take(&mut self) -> Instant {
        match self {
            SelectedPacer::Simple(p) => p.take(),
            SelectedPacer::Baseline(p) => p.take(),
        }
    }
}

/// Construct the pacer for `choice`. Its schedule starts now.
pub fn build_pacer<C: Clock>(choice: PacerChoice, clock: C) -> Result<SelectedPacer<C>> {
    match choice {
        PacerChoice::Simple { rate } => {
            let p = SimplePacer::new(rate, clock)?;
            tracing::info!(rate, "using simple pacer");
            Ok(SelectedPacer::Simple(p))
        }
        PacerChoice::Baseline { rate } => {
            let rounded = util::baseline_rate(rate)?;
            let p = LeakyBucketPacer::new(rounded, clock)?;
            tracing::info!(
                rate = rounded,
                configured = rate,
                "using baseline leaky-bucket pacer"
            );
            Ok(SelectedPacer::Baseline(p))
        }
    }
}

/// A finished run together with the pacer that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub pacer: &'static str,
    /// Rate the pacer ran at (after rounding, for the baseline).
    pub rate: f64,
    pub result: RunResult,
}

impl RunReport {
    pub fn stats(&self) -> Option<TickStats> {
        TickStats::from_instants(&self.result.ticks, self.rate)
    }
}

/// Build the pacer for `plan` and run it to completion on `clock`.
pub fn execute<C: Clock + Clone>(
    plan: &RunPlan,
    clock: C,
    record_ticks: bool,
) -> Result<RunReport> {
    let mut pacer = build_pacer(plan.pacer, clock.clone())?;
    let driver = Driver::new(clock).record_ticks(record_ticks);
    let result = driver.run(&mut pacer, plan.mode);
    Ok(RunReport {
        pacer: pacer.name(),
        rate: pacer.rate(),
        result,
    })
}
