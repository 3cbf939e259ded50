use crate::constants::{
    DEFAULT_HIGHLIGHT_FADE_OUT_MS, DEFAULT_HIGHLIGHT_OPACITY, DEFAULT_HIGHLIGHT_RADIUS,
    DEFAULT_HIGHLIGHT_STROKE_WIDTH,
};
use crate::core::decay::{Decay, DecayState};
use crate::core::Color;
use crate::render::{clamp_alpha, DrawCommand, StrokeStyle};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightConfig {
    pub stroke_color: Color,
    pub fill_color: Color,
    pub stroke_width: u32,
    pub radius: u32,
    pub opacity: u32,
    pub fade_out_duration_ms: u32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            fill_color: Color::WHITE,
            stroke_width: DEFAULT_HIGHLIGHT_STROKE_WIDTH,
            radius: DEFAULT_HIGHLIGHT_RADIUS,
            opacity: DEFAULT_HIGHLIGHT_OPACITY,
            fade_out_duration_ms: DEFAULT_HIGHLIGHT_FADE_OUT_MS,
        }
    }
}

impl HighlightConfig {
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_opacity(mut self, opacity: u32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_fade_out_duration(mut self, duration_ms: u32) -> Self {
        self.fade_out_duration_ms = duration_ms;
        self
    }
}

/// Circle drawn under a contact's current position. Fades its opacity out
/// after the contact lifts. Starts invisible; the first [`Highlight::move_to`]
/// brings it to full opacity.
#[derive(Clone, Debug)]
pub struct Highlight {
    center: Vec2,
    stroke_color: Color,
    fill_color: Color,
    stroke_width: u32,
    radius: u32,
    opacity: u32,
    max_opacity: u32,
    fade_out_duration_ms: u32,
    style: StrokeStyle,
    decay: DecayState,
}

impl Default for Highlight {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl Highlight {
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            center: Vec2::ZERO,
            stroke_color: config.stroke_color,
            fill_color: config.fill_color,
            stroke_width: config.stroke_width,
            radius: config.radius,
            // invisible until the first contact lands on this slot
            opacity: 0,
            max_opacity: config.opacity,
            fade_out_duration_ms: config.fade_out_duration_ms,
            style: StrokeStyle::default(),
            decay: DecayState::new(config.fade_out_duration_ms, config.opacity),
        }
    }

    /// Move to `(x, y)` at full opacity, interrupting any fade in progress.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.center = Vec2::new(x, y);
        self.opacity = self.max_opacity;
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.decay.tracking = tracking;
    }

    pub fn set_fading(&mut self, fading: bool) {
        self.decay.fading = fading;
    }

    /// Filled disc, then its outline, both at the current opacity.
    pub fn render_into(&self, out: &mut Vec<DrawCommand>) {
        if self.opacity == 0 {
            return;
        }
        let alpha = clamp_alpha(self.opacity);
        let radius = self.radius as f32;
        out.push(DrawCommand::FillCircle {
            center: self.center,
            radius,
            color: self.fill_color,
            alpha,
        });
        out.push(DrawCommand::StrokeCircle {
            center: self.center,
            radius,
            color: self.stroke_color,
            alpha,
            stroke_width: self.stroke_width as f32,
            style: self.style,
        });
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        let mut out = Vec::with_capacity(2);
        self.render_into(&mut out);
        out
    }

    pub fn center(&self) -> Vec2 {
        self.center
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

    pub fn max_opacity(&self) -> u32 {
        self.max_opacity
    }

    /// Set the maximum opacity (and the current one, if visible); the fade
    /// re-derives its step.
    pub fn set_opacity(&mut self, opacity: u32) {
        if self.opacity > 0 {
            self.opacity = opacity;
        }
        self.max_opacity = opacity;
        self.rederive();
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius;
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, stroke_width: u32) {
        self.stroke_width = stroke_width;
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
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
            .reconfigure(self.fade_out_duration_ms, self.max_opacity);
    }
}

impl Decay for Highlight {
    fn decay_state(&self) -> &DecayState {
        &self.decay
    }

    fn decay_state_mut(&mut self) -> &mut DecayState {
        &mut self.decay
    }

    fn apply_decay_step(&mut self, steps: u32) {
        match self.opacity.checked_sub(steps) {
            Some(rest) => self.opacity = rest,
            None => {
                self.opacity = 0;
                self.decay.fading = false;
            }
        }
    }
}
