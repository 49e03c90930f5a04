use std::time::Duration;

use pacer_core::{Driver, SimplePacer};
use pacer_traits::Pacer;
use pacer_traits::clock::Clock;
use pacer_traits::clock::test_clock::TestClock;
use proptest::prelude::*;

prop_compose! {
    // Per-tick caller work in microseconds; mostly short, sometimes long enough to lag.
    fn work_strategy()(
        len in 1usize..150,
        max_us in 1u64..40_000,
    )(v in prop::collection::vec(0u64..max_us, len)) -> Vec<u64> {
        v
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn ticks_are_numbered_and_released_in_order(
        rate in 1.0f64..5_000.0,
        work in work_strategy(),
    ) {
        let clock = TestClock::new();
        let mut p = SimplePacer::new(rate, clock.clone()).unwrap();
        let start = p.start();
        let mut prev = None;

        for (k, w) in work.iter().enumerate() {
            clock.advance(Duration::from_micros(*w));
            let released = p.take();
            let tick = k as u64 + 1;

            prop_assert_eq!(p.count(), tick);
            if let Some(prev) = prev {
                prop_assert!(released >= prev);
            }
            prev = Some(released);

            // On return the caller is never ahead of the ideal schedule.
            let since_start = clock.now().saturating_duration_since(start);
            prop_assert!(since_start >= p.target_elapsed(tick));
        }
    }

    #[test]
    fn sleeps_never_exceed_one_period_beyond_schedule(
        rate in 1.0f64..5_000.0,
        work in work_strategy(),
    ) {
        let clock = TestClock::new();
        let mut p = SimplePacer::new(rate, clock.clone()).unwrap();
        for w in &work {
            clock.advance(Duration::from_micros(*w));
            p.take();
        }
        // A sleep only ever covers the gap up to the next tick's target.
        let period = p.target_elapsed(1);
        for s in clock.sleeps() {
            prop_assert!(s <= period + Duration::from_nanos(2));
        }
    }

    #[test]
    fn count_run_is_exact_for_any_rate(rate in 0.5f64..100_000.0, n in 0u64..300) {
        let clock = TestClock::new();
        let mut p = SimplePacer::new(rate, clock.clone()).unwrap();
        let res = Driver::new(clock).run_for_count(&mut p, n);
        prop_assert_eq!(res.iterations, n);
        prop_assert_eq!(p.count(), n);
    }

    #[test]
    fn nominal_target_matches_tick_over_rate(rate in 0.01f64..1e6, tick in 1u64..1_000_000) {
        let p = SimplePacer::new(rate, TestClock::new()).unwrap();
        let want = tick as f64 / rate;
        let got = p.target_elapsed(tick).as_secs_f64();
        // Truncation to whole nanoseconds plus float rounding.
        prop_assert!((got - want).abs() <= 2e-9 + want * 1e-12);
    }
}
