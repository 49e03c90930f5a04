//! Run configuration as seen by the core.

use std::time::Duration;

/// How long a run lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Tick until the wall-clock deadline `start + duration` has passed.
    Duration(Duration),
    /// Tick exactly this many times.
    Count(u64),
}

impl RunMode {
    /// A positive count supersedes the duration; otherwise the run is timed.
    #[inline]
    pub fn resolve(duration: Duration, exactly: u64) -> Self {
        if exactly > 0 {
            RunMode::Count(exactly)
        } else {
            RunMode::Duration(duration)
        }
    }
}

/// Which pacer implementation drives the run, with its configured rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PacerChoice {
    Simple { rate: f64 },
    /// Rate is rounded to an integer when the pacer is built.
    Baseline { rate: f64 },
}

impl PacerChoice {
    #[inline]
    pub fn select(rate: f64, baseline: bool) -> Self {
        if baseline {
            PacerChoice::Baseline { rate }
        } else {
            PacerChoice::Simple { rate }
        }
    }

    pub fn configured_rate(&self) -> f64 {
        match *self {
            PacerChoice::Simple { rate } | PacerChoice::Baseline { rate } => rate,
        }
    }
}

/// Everything needed to perform one run; resolved once at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunPlan {
    pub pacer: PacerChoice,
    pub mode: RunMode,
}
