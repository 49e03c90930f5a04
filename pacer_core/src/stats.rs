//! Inter-tick interval statistics for a recorded run.

use crate::simple::WARN_THRESHOLD;
use crate::util::period;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct TickStats {
    pub ticks: usize,
    /// Nominal interval at the configured rate.
    pub period: Duration,
    pub min_us: u64,
    pub avg_us: f64,
    pub max_us: u64,
    pub stdev_us: f64,
    /// Intervals longer than `period + WARN_THRESHOLD`.
    pub late: usize,
}

impl TickStats {
    /// Summarize the gaps between consecutive released instants.
    /// Returns `None` with fewer than two ticks (no interval to measure).
    pub fn from_instants(ticks: &[Instant], rate: f64) -> Option<Self> {
        if ticks.len() < 2 {
            return None;
        }
        let period = period(rate);
        let late_after = period.saturating_add(WARN_THRESHOLD);

        let intervals: Vec<Duration> = ticks
            .windows(2)
            .map(|w| w[1].saturating_duration_since(w[0]))
            .collect();
        let us: Vec<u64> = intervals
            .iter()
            .map(|d| d.as_micros().min(u128::from(u64::MAX)) as u64)
            .collect();

        let min_us = us.iter().copied().min().unwrap_or(0);
        let max_us = us.iter().copied().max().unwrap_or(0);
        let n = us.len() as f64;
        let avg_us = us.iter().sum::<u64>() as f64 / n;
        let stdev_us = if us.len() > 1 {
            let var = us
                .iter()
                .map(|&x| (x as f64 - avg_us).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            var.sqrt()
        } else {
            0.0
        };
        let late = intervals.iter().filter(|d| **d > late_after).count();

        Some(Self {
            ticks: ticks.len(),
            period,
            min_us,
            avg_us,
            max_us,
            stdev_us,
            late,
        })
    }
}
