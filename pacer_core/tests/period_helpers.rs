// Focused tests for time/rate helpers.
use std::time::{Duration, Instant};

use pacer_core::TickStats;
use pacer_core::util::{actual_rate, period, positive_duration, target_elapsed};

#[test]
fn period_is_one_over_rate() {
    assert_eq!(period(1.0), Duration::from_secs(1));
    assert_eq!(period(1000.0), Duration::from_millis(1));
    assert_eq!(period(0.25), Duration::from_secs(4));
    // 1/7 s = 142_857_142.857ns, truncated
    assert_eq!(period(7.0), Duration::from_nanos(142_857_142));
}

#[test]
fn target_elapsed_saturates_instead_of_wrapping() {
    assert_eq!(target_elapsed(u64::MAX, 1e-9), Duration::from_nanos(u64::MAX));
}

#[test]
fn positive_duration_drops_non_positive() {
    assert_eq!(positive_duration(0), None);
    assert_eq!(positive_duration(-5), None);
    assert_eq!(positive_duration(1_500), Some(Duration::from_nanos(1_500)));
}

#[test]
fn actual_rate_handles_zero_elapsed() {
    assert_eq!(actual_rate(0, Duration::ZERO), 0.0);
    assert_eq!(actual_rate(10, Duration::ZERO), 0.0);
    assert!((actual_rate(500, Duration::from_millis(250)) - 2000.0).abs() < 1e-9);
}

#[test]
fn tick_stats_need_two_ticks() {
    let t0 = Instant::now();
    assert!(TickStats::from_instants(&[], 100.0).is_none());
    assert!(TickStats::from_instants(&[t0], 100.0).is_none());
}

#[test]
fn tick_stats_summarize_intervals_and_late_ticks() {
    let t0 = Instant::now();
    let at = |ms: u64| t0 + Duration::from_millis(ms);
    // Intervals: 10, 10, 25, 10 (ms). At 100/s a tick is late past 20ms.
    let ticks = [at(0), at(10), at(20), at(45), at(55)];
    let s = TickStats::from_instants(&ticks, 100.0).unwrap();
    assert_eq!(s.ticks, 5);
    assert_eq!(s.period, Duration::from_millis(10));
    assert_eq!(s.min_us, 10_000);
    assert_eq!(s.max_us, 25_000);
    assert!((s.avg_us - 13_750.0).abs() < 1e-6);
    assert!(s.stdev_us > 0.0);
    assert_eq!(s.late, 1);
}
