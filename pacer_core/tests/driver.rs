use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use pacer_core::mocks::CountingPacer;
use pacer_core::{Driver, PacerChoice, RunMode, RunPlan, SimplePacer, execute};
use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use pacer_traits::clock::test_clock::TestClock;
use rstest::rstest;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn zero_duration_runs_no_iterations() {
    let clock = TestClock::new();
    let mut p = CountingPacer::new(clock.clone(), ms(1));
    let res = Driver::new(clock).run_for_duration(&mut p, Duration::ZERO);
    assert_eq!(res.iterations, 0);
    assert_eq!(p.calls(), 0);
    assert_eq!(res.elapsed, Duration::ZERO);
    assert_eq!(res.actual_rate, 0.0);
}

/// Unwind payload used to end a run that has no reachable deadline.
struct RunStopped;

/// Ticks every millisecond of virtual time, then aborts the run.
struct StopAfter {
    left: u32,
    clock: TestClock,
}

impl Pacer for StopAfter {
    fn take(&mut self) -> Instant {
        if self.left == 0 {
            panic::panic_any(RunStopped);
        }
        self.left -= 1;
        self.clock.advance(ms(1));
        self.clock.now()
    }
}

#[rstest]
#[case(Duration::MAX)]
#[case(Duration::from_secs(u64::MAX / 2))]
fn duration_beyond_clock_range_keeps_ticking(#[case] duration: Duration) {
    let clock = TestClock::new();
    let mut pacer = StopAfter {
        left: 3,
        clock: clock.clone(),
    };
    let driver = Driver::new(clock.clone());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        driver.run_for_duration(&mut pacer, duration)
    }));

    let payload = outcome.expect_err("an unreachable deadline never ends the run");
    assert!(
        payload.downcast_ref::<RunStopped>().is_some(),
        "run must reach the pacer instead of failing on deadline arithmetic"
    );
    assert_eq!(clock.offset(), ms(3));
}

#[test]
fn duration_run_on_simple_pacer_hits_nominal_rate() {
    let clock = TestClock::new();
    let mut p = SimplePacer::new(100.0, clock.clone()).unwrap();
    let res = Driver::new(clock).run_for_duration(&mut p, ms(100));
    // Ticks at 0,10,..,90ms; the tenth sleeps up to the 100ms deadline.
    assert_eq!(res.iterations, 10);
    assert_eq!(res.elapsed, ms(100));
    assert!((res.actual_rate - 100.0).abs() < 1e-9);
    assert_eq!(res.mode, RunMode::Duration(ms(100)));
}

#[test]
fn duration_run_checks_deadline_before_each_tick() {
    // 30ms of work per tick: ticks start at 0,30,60,90; the last one ends at 120.
    let clock = TestClock::new();
    let mut p = CountingPacer::new(clock.clone(), ms(30));
    let res = Driver::new(clock).run_for_duration(&mut p, ms(100));
    assert_eq!(res.iterations, 4);
    assert_eq!(res.elapsed, ms(120));
}

#[test]
fn count_run_reports_rate() {
    let clock = TestClock::new();
    let mut p = CountingPacer::new(clock.clone(), ms(2));
    let res = Driver::new(clock).run_for_count(&mut p, 50);
    assert_eq!(res.iterations, 50);
    assert_eq!(p.calls(), 50);
    assert_eq!(res.elapsed, ms(100));
    assert!((res.actual_rate - 500.0).abs() < 1e-9);
}

#[test]
fn count_run_of_zero_is_a_no_op() {
    let clock = TestClock::new();
    let mut p = CountingPacer::new(clock.clone(), ms(2));
    let res = Driver::new(clock).run_for_count(&mut p, 0);
    assert_eq!(res.iterations, 0);
    assert_eq!(p.calls(), 0);
}

#[test]
fn ticks_are_recorded_only_on_request() {
    let clock = TestClock::new();
    let mut p = CountingPacer::new(clock.clone(), ms(1));
    let plain = Driver::new(clock.clone()).run_for_count(&mut p, 5);
    assert!(plain.ticks.is_empty());

    let rec = Driver::new(clock.clone())
        .record_ticks(true)
        .run_for_count(&mut p, 5);
    assert_eq!(rec.ticks.len(), 5);
    assert!(rec.ticks.windows(2).all(|w| w[0] <= w[1]));
}

#[rstest]
#[case(0, ms(100), RunMode::Duration(ms(100)))]
#[case(0, Duration::ZERO, RunMode::Duration(Duration::ZERO))]
#[case(1, ms(100), RunMode::Count(1))]
#[case(5000, ms(100), RunMode::Count(5000))]
fn count_supersedes_duration_only_when_positive(
    #[case] exactly: u64,
    #[case] duration: Duration,
    #[case] want: RunMode,
) {
    assert_eq!(RunMode::resolve(duration, exactly), want);
}

#[test]
fn plan_from_config_falls_back_to_duration() {
    let pacing = pacer_config::Pacing {
        rate: 250.0,
        duration: ms(100),
        exactly: 0,
        baseline: false,
    };
    let plan = RunPlan::from(&pacing);
    assert_eq!(plan.mode, RunMode::Duration(ms(100)));
    assert_eq!(plan.pacer, PacerChoice::Simple { rate: 250.0 });
}

#[test]
fn plan_from_config_selects_baseline_and_count() {
    let cfg = pacer_config::load_toml("[pacing]\nexactly = 12\nbaseline = true\n").unwrap();
    let plan = RunPlan::from(&cfg);
    assert_eq!(plan.mode, RunMode::Count(12));
    assert_eq!(plan.pacer, PacerChoice::Baseline { rate: 1000.0 });
}

#[test]
fn execute_runs_plan_end_to_end() {
    let plan = RunPlan {
        pacer: PacerChoice::Simple { rate: 1000.0 },
        mode: RunMode::Count(50),
    };
    let report = execute(&plan, TestClock::new(), true).unwrap();
    assert_eq!(report.pacer, "simple");
    assert_eq!(report.result.iterations, 50);
    assert_eq!(report.result.elapsed, ms(50));
    let stats = report.stats().expect("50 ticks give stats");
    assert_eq!(stats.ticks, 50);
    assert_eq!(stats.min_us, 1000);
    assert_eq!(stats.max_us, 1000);
    assert_eq!(stats.late, 0);
}

#[test]
fn execute_baseline_over_duration() {
    let plan = RunPlan {
        pacer: PacerChoice::Baseline { rate: 99.6 },
        mode: RunMode::Duration(ms(100)),
    };
    let report = execute(&plan, TestClock::new(), false).unwrap();
    assert_eq!(report.pacer, "baseline");
    assert_eq!(report.rate, 100.0);
    // Immediate first release, then 10ms apart: releases at 0..=100ms.
    assert_eq!(report.result.iterations, 11);
    assert_eq!(report.result.elapsed, ms(100));
    assert!(report.stats().is_none());
}

#[test]
fn execute_rejects_invalid_rate() {
    let plan = RunPlan {
        pacer: PacerChoice::Simple { rate: -1.0 },
        mode: RunMode::Count(1),
    };
    assert!(execute(&plan, TestClock::new(), false).is_err());
}
