// Constants and the relationships the engine relies on.

use fingertrail::constants::*;
use fingertrail::{DecayConfig, HighlightConfig, TrailConfig};

#[test]
#[allow(clippy::assertions_on_constants)]
fn duration_bounds_are_ordered_multiples_of_the_tick() {
    assert!(MIN_DURATION > 0);
    assert!(MIN_DURATION < MAX_DURATION);
    assert_eq!(MAX_DURATION % MIN_DURATION, 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn slot_and_alpha_defaults() {
    assert_eq!(DEFAULT_SLOT_COUNT, 2);
    assert_eq!(GHOST_ALPHA, 4);
    assert!(DEFAULT_HIGHLIGHT_OPACITY <= u8::MAX as u32);
    assert!(DEFAULT_FRAME_INTERVAL_MS < MIN_DURATION as u64);
}

#[test]
fn config_defaults_match_constants() {
    let t = TrailConfig::default();
    assert_eq!(t.opacity, DEFAULT_TRAIL_OPACITY);
    assert_eq!(t.stroke_width, DEFAULT_TRAIL_STROKE_WIDTH);
    assert_eq!(t.fade_out_duration_ms, DEFAULT_TRAIL_FADE_OUT_MS);
    assert_eq!(t.max_visible_segments, DEFAULT_TRAIL_MAX_SEGMENTS);

    let h = HighlightConfig::default();
    assert_eq!(h.radius, DEFAULT_HIGHLIGHT_RADIUS);
    assert_eq!(h.stroke_width, DEFAULT_HIGHLIGHT_STROKE_WIDTH);
    assert_eq!(h.opacity, DEFAULT_HIGHLIGHT_OPACITY);
    assert_eq!(h.fade_out_duration_ms, DEFAULT_HIGHLIGHT_FADE_OUT_MS);
}

#[test]
fn default_fades_fit_inside_the_duration_range() {
    for (duration, divisible) in [
        (DEFAULT_TRAIL_FADE_OUT_MS, DEFAULT_TRAIL_MAX_SEGMENTS as u32),
        (DEFAULT_HIGHLIGHT_FADE_OUT_MS, DEFAULT_HIGHLIGHT_OPACITY),
    ] {
        let c = DecayConfig::configure(duration, divisible);
        assert!(c.tick_interval_ms >= MIN_DURATION);
        assert!(c.tick_interval_ms <= MAX_DURATION);
        assert!(c.ticks_to_zero() * c.tick_interval_ms <= 2 * duration);
    }
}
