// Highlight opacity fade and circle rendering.

use fingertrail::{Color, Decay, DrawCommand, Highlight, HighlightConfig};
use glam::Vec2;

fn lifted(config: HighlightConfig) -> Highlight {
    let mut h = Highlight::new(config);
    h.set_tracking(true);
    h.move_to(10.0, 20.0);
    h.set_tracking(false);
    h.set_fading(true);
    h
}

#[test]
fn default_fade_drains_in_two_ticks() {
    // 255 levels over 200ms -> round(255 / 2.0) = 128 per 100ms
    let mut h = lifted(HighlightConfig::default());
    assert_eq!(h.decay_state().config.steps_per_tick, 128);

    h.tick(100);
    assert_eq!(h.opacity(), 127);
    assert!(h.is_fading());
    h.tick(200);
    assert_eq!(h.opacity(), 0);
    assert!(!h.is_fading());
}

#[test]
fn reaching_exactly_zero_keeps_fading_until_next_tick() {
    let mut h = lifted(HighlightConfig::default().with_opacity(2));
    assert_eq!(h.decay_state().config.steps_per_tick, 1);

    h.tick(100);
    h.tick(200);
    assert_eq!(h.opacity(), 0);
    assert!(h.is_fading());
    h.tick(300);
    assert_eq!(h.opacity(), 0);
    assert!(!h.is_fading());
}

#[test]
fn move_always_restores_full_opacity() {
    let mut h = lifted(HighlightConfig::default());
    h.tick(100);
    assert!(h.opacity() < h.max_opacity());

    h.move_to(3.0, 4.0);
    assert_eq!(h.opacity(), 255);
    assert_eq!(h.center(), Vec2::new(3.0, 4.0));
}

#[test]
fn tracking_highlight_does_not_fade() {
    let mut h = Highlight::default();
    h.move_to(1.0, 1.0);
    h.set_tracking(true);
    h.set_fading(true);
    for i in 1..=10 {
        h.tick(i * 100);
    }
    assert_eq!(h.opacity(), 255);
}

#[test]
fn early_tick_changes_nothing() {
    let mut h = lifted(HighlightConfig::default().with_fade_out_duration(1000).with_opacity(10));
    h.tick(100);
    assert_eq!(h.opacity(), 9);
    h.tick(199);
    assert_eq!(h.opacity(), 9);
    h.tick(200);
    assert_eq!(h.opacity(), 8);
}

#[test]
fn render_fills_then_strokes_at_current_opacity() {
    let config = HighlightConfig::default()
        .with_fill_color(Color::rgb(1, 2, 3))
        .with_stroke_color(Color::rgb(4, 5, 6))
        .with_stroke_width(3)
        .with_radius(40);
    let mut h = lifted(config);
    h.tick(100);

    let commands = h.render();
    assert_eq!(commands.len(), 2);
    match &commands[0] {
        DrawCommand::FillCircle {
            center,
            radius,
            color,
            alpha,
        } => {
            assert_eq!(*center, Vec2::new(10.0, 20.0));
            assert_eq!(*radius, 40.0);
            assert_eq!(*color, Color::rgb(1, 2, 3));
            assert_eq!(*alpha, 127);
        }
        other => panic!("expected fill, got {:?}", other),
    }
    match &commands[1] {
        DrawCommand::StrokeCircle {
            color,
            alpha,
            stroke_width,
            ..
        } => {
            assert_eq!(*color, Color::rgb(4, 5, 6));
            assert_eq!(*alpha, 127);
            assert_eq!(*stroke_width, 3.0);
        }
        other => panic!("expected stroke, got {:?}", other),
    }
}

#[test]
fn untouched_or_transparent_highlight_renders_nothing() {
    assert!(Highlight::default().render().is_empty());

    let mut h = Highlight::new(HighlightConfig::default().with_opacity(0));
    h.move_to(1.0, 1.0);
    assert!(h.render().is_empty());
}

#[test]
fn set_opacity_resets_maximum_and_step() {
    let mut h = Highlight::default();
    h.set_opacity(10);
    assert_eq!(h.max_opacity(), 10);
    assert_eq!(h.decay_state().config.steps_per_tick, 5);

    h.set_fade_out_duration(5000);
    let c = h.decay_state().config;
    assert_eq!((c.tick_interval_ms, c.steps_per_tick), (5000, 1));
}
