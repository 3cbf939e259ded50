// Fade scheduling: interval/step derivation and duration clamping.

use fingertrail::constants::{MAX_DURATION, MIN_DURATION};
use fingertrail::DecayConfig;

fn derived(duration_ms: u32, divisible: u32) -> (u32, u32) {
    let c = DecayConfig::configure(duration_ms, divisible);
    (c.tick_interval_ms, c.steps_per_tick)
}

#[test]
fn short_fade_over_many_units_steps_several_per_tick() {
    // 200ms over 25 units: 2 base ticks, round(25 / 2.0) = 13 units each
    assert_eq!(derived(200, 25), (100, 13));
}

#[test]
fn long_fade_over_few_units_stretches_the_interval() {
    // 4000ms over 2 units: rate 20 > 1, interval floor(40) * 100
    assert_eq!(derived(4000, 2), (4000, 1));
}

#[test]
fn durations_below_floor_behave_like_the_floor() {
    assert_eq!(derived(50, 10), derived(MIN_DURATION, 10));
    assert_eq!(derived(0, 10), derived(MIN_DURATION, 10));
    assert_eq!(derived(50, 10), (100, 10));
}

#[test]
fn durations_above_ceiling_behave_like_the_ceiling() {
    assert_eq!(derived(10_000, 10), derived(MAX_DURATION, 10));
    assert_eq!(derived(u32::MAX, 10), derived(MAX_DURATION, 10));
    assert_eq!(DecayConfig::configure(10_000, 10).effective_duration_ms(), MAX_DURATION);
}

#[test]
fn zero_divisible_is_treated_as_one() {
    let c = DecayConfig::configure(300, 0);
    assert_eq!(c.divisible, 1);
    assert_eq!((c.tick_interval_ms, c.steps_per_tick), (300, 1));
}

#[test]
fn slow_path_takes_one_step_per_whole_base_multiple() {
    for duration in [150, 250, 999, 2500, MAX_DURATION] {
        for divisible in [1u32, 2, 3] {
            let c = DecayConfig::configure(duration, divisible);
            let units = duration as f64 / MIN_DURATION as f64;
            if units / divisible as f64 > 1.0 {
                assert_eq!(c.steps_per_tick, 1);
                assert_eq!(c.tick_interval_ms, units.floor() as u32 * MIN_DURATION);
                assert_eq!(c.tick_interval_ms % MIN_DURATION, 0);
            }
        }
    }
}

#[test]
fn fast_path_reaches_zero_in_about_the_configured_duration() {
    let durations = [100, 150, 200, 250, 333, 500, 1000, 2500, 5000];
    let divisibles = [1u32, 2, 3, 5, 10, 25, 50, 100, 255];
    for &duration in &durations {
        for &divisible in &divisibles {
            let c = DecayConfig::configure(duration, divisible);
            let units = duration as f64 / MIN_DURATION as f64;
            if units / divisible as f64 > 1.0 {
                continue;
            }
            assert_eq!(c.tick_interval_ms, MIN_DURATION);

            // simulate the quantity draining
            let mut remaining = divisible as i64;
            let mut ticks = 0u32;
            while remaining > 0 {
                remaining -= c.steps_per_tick as i64;
                ticks += 1;
            }
            assert_eq!(ticks, c.ticks_to_zero());

            let elapsed = ticks as f64 * c.tick_interval_ms as f64;
            let clamped = c.effective_duration_ms() as f64;
            assert!(
                elapsed <= 1.5 * clamped + MIN_DURATION as f64,
                "duration={} divisible={} elapsed={}",
                duration,
                divisible,
                elapsed
            );
            assert!(
                elapsed >= 0.5 * clamped,
                "duration={} divisible={} elapsed={}",
                duration,
                divisible,
                elapsed
            );
        }
    }
}

#[test]
fn floor_duration_drains_everything_in_one_tick() {
    for divisible in [1u32, 7, 25, 255] {
        let c = DecayConfig::configure(MIN_DURATION, divisible);
        assert_eq!(c.steps_per_tick, divisible);
        assert_eq!(c.ticks_to_zero(), 1);
    }
}
