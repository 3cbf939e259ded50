//! Per-contact stroke trail.
//!
//! A trail keeps every point the contact passed through and renders only the
//! most recent `max_visible_segments` of them. Rendering walks from the head
//! (the contact's current position) toward the tail and emits one stroke per
//! step, each covering a longer sub-path than the last. All but the final
//! stroke use [`GHOST_ALPHA`], so the short sub-paths near the head stack up
//! faintly and the full-length one carries the configured opacity.
//!
//! After the contact lifts, the fade appends copies of the last point. The
//! visible window slides onto those copies and the trail collapses toward
//! the lift position without truncating history.

use crate::constants::{
    DEFAULT_TRAIL_FADE_OUT_MS, DEFAULT_TRAIL_MAX_SEGMENTS, DEFAULT_TRAIL_OPACITY,
    DEFAULT_TRAIL_STROKE_WIDTH, GHOST_ALPHA,
};
use crate::core::decay::{Decay, DecayState};
use crate::core::Color;
use crate::render::{clamp_alpha, DrawCommand, Polyline, StrokeStyle};
use glam::Vec2;

/// How stroke width varies along the visible part of a trail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeStyle {
    /// Same width from head to tail.
    Uniform,
    /// Widest at the contact, thinning toward the tail.
    WiderAtHead,
    /// Thin at the contact, widening toward the tail.
    #[default]
    NarrowerAtHead,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    pub color: Color,
    pub edge_style: EdgeStyle,
    pub opacity: u32,
    pub stroke_width: u32,
    pub fade_out_duration_ms: u32,
    pub max_visible_segments: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            edge_style: EdgeStyle::NarrowerAtHead,
            opacity: DEFAULT_TRAIL_OPACITY,
            stroke_width: DEFAULT_TRAIL_STROKE_WIDTH,
            fade_out_duration_ms: DEFAULT_TRAIL_FADE_OUT_MS,
            max_visible_segments: DEFAULT_TRAIL_MAX_SEGMENTS,
        }
    }
}

impl TrailConfig {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = edge_style;
        self
    }

    pub fn with_opacity(mut self, opacity: u32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_fade_out_duration(mut self, duration_ms: u32) -> Self {
        self.fade_out_duration_ms = duration_ms;
        self
    }

    pub fn with_max_visible_segments(mut self, segments: usize) -> Self {
        self.max_visible_segments = segments;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Trail {
    points: Vec<Vec2>,
    opacity: u32,
    max_stroke_width: u32,
    edge_style: EdgeStyle,
    color: Color,
    max_visible_segments: usize,
    fade_out_duration_ms: u32,
    last_committed_len: usize,
    style: StrokeStyle,
    decay: DecayState,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

impl Trail {
    pub fn new(config: TrailConfig) -> Self {
        let max_visible_segments = config.max_visible_segments.max(1);
        Self {
            points: Vec::new(),
            opacity: config.opacity,
            max_stroke_width: config.stroke_width,
            edge_style: config.edge_style,
            color: config.color,
            max_visible_segments,
            fade_out_duration_ms: config.fade_out_duration_ms,
            last_committed_len: 0,
            style: StrokeStyle::default(),
            decay: DecayState::new(config.fade_out_duration_ms, divisible(max_visible_segments)),
        }
    }

    /// Start a fresh stroke at `(x, y)`, discarding the previous one.
    pub fn begin_track(&mut self, x: f32, y: f32) {
        self.points.clear();
        self.decay.tracking = true;
        self.decay.fading = false;
        self.points.push(Vec2::new(x, y));
    }

    /// Extend the stroke. Ignored unless the trail is tracking.
    pub fn append_point(&mut self, x: f32, y: f32) {
        if !self.decay.tracking {
            return;
        }
        self.points.push(Vec2::new(x, y));
    }

    /// Stop tracking and start fading from the current point count.
    pub fn end_track(&mut self) {
        self.decay.tracking = false;
        self.decay.fading = true;
        self.last_committed_len = self.points.len();
    }

    /// Emit the trail's strokes, head to tail.
    pub fn render_into(&self, out: &mut Vec<DrawCommand>) {
        let len = self.points.len();
        if len < 2 || self.opacity == 0 {
            return;
        }

        let num_segments = self.max_visible_segments.min(len);
        // the walk cannot step past the first point
        let walk_len = num_segments.min(len - 1);
        let head = len - 1;

        let mut polyline = Polyline::new();
        polyline.push(self.points[head]);

        for distance in 1..=walk_len {
            polyline.push(self.points[head - distance]);

            let alpha = if distance == walk_len {
                clamp_alpha(self.opacity)
            } else {
                GHOST_ALPHA
            };
            out.push(DrawCommand::StrokePolyline {
                points: polyline.clone(),
                width: self.segment_width(distance, num_segments) as f32,
                color: self.color,
                alpha,
                style: self.style,
            });
        }
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        self.render_into(&mut out);
        out
    }

    /// Width of the stroke ending `distance` points behind the head.
    pub fn segment_width(&self, distance: usize, num_segments: usize) -> u32 {
        if num_segments == 0 {
            return 0;
        }
        let step = self.max_stroke_width as f64 / num_segments as f64;
        match self.edge_style {
            EdgeStyle::Uniform => self.max_stroke_width,
            EdgeStyle::NarrowerAtHead => (distance as f64 * step) as u32,
            EdgeStyle::WiderAtHead => {
                (num_segments.saturating_sub(distance) as f64 * step) as u32
            }
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn last_committed_len(&self) -> usize {
        self.last_committed_len
    }

    /// Number of synthetic points appended since tracking stopped.
    pub fn faded_segments(&self) -> usize {
        self.points.len().saturating_sub(self.last_committed_len)
    }

    pub fn is_tracking(&self) -> bool {
        self.decay.tracking
    }

    pub fn is_fading(&self) -> bool {
        self.decay.fading
    }

    pub fn opacity(&self) -> u32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: u32) {
        self.opacity = opacity;
    }

    pub fn max_stroke_width(&self) -> u32 {
        self.max_stroke_width
    }

    pub fn set_stroke_width(&mut self, stroke_width: u32) {
        self.max_stroke_width = stroke_width;
        self.rederive();
    }

    pub fn edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn set_edge_style(&mut self, edge_style: EdgeStyle) {
        self.edge_style = edge_style;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn max_visible_segments(&self) -> usize {
        self.max_visible_segments
    }

    pub fn set_max_visible_segments(&mut self, segments: usize) {
        self.max_visible_segments = segments.max(1);
        self.rederive();
    }

    pub fn fade_out_duration_ms(&self) -> u32 {
        self.fade_out_duration_ms
    }

    pub fn set_fade_out_duration(&mut self, duration_ms: u32) {
        self.fade_out_duration_ms = duration_ms;
        self.rederive();
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    fn rederive(&mut self) {
        self.decay
            .reconfigure(self.fade_out_duration_ms, divisible(self.max_visible_segments));
    }
}

impl Decay for Trail {
    fn decay_state(&self) -> &DecayState {
        &self.decay
    }

    fn decay_state_mut(&mut self) -> &mut DecayState {
        &mut self.decay
    }

    fn apply_decay_step(&mut self, steps: u32) {
        let Some(&last) = self.points.last() else {
            self.decay.fading = false;
            return;
        };
        if self.faded_segments() < self.max_visible_segments {
            self.points
                .extend(std::iter::repeat(last).take(steps as usize));
        } else {
            self.decay.fading = false;
        }
    }
}

#[inline]
fn divisible(segments: usize) -> u32 {
    u32::try_from(segments).unwrap_or(u32::MAX)
}
