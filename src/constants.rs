//! Timing, slot and styling constants for the trail engine.
//!
//! Durations are in milliseconds. Widths and radii are in surface pixels.
//! Opacities use the 0..=255 alpha scale of the rasterizer.

// Decay timing
pub const MIN_DURATION: u32 = 100; // tick granularity floor, also the global tick period
pub const MAX_DURATION: u32 = 5000; // ceiling for any fade-out duration

// Slots
pub const DEFAULT_SLOT_COUNT: usize = 2;

// Alpha used for every trail sub-path except the final, full-length one.
// Not derived from the configured opacity.
pub const GHOST_ALPHA: u8 = 4;

// Trail defaults
pub const DEFAULT_TRAIL_OPACITY: u32 = 4;
pub const DEFAULT_TRAIL_STROKE_WIDTH: u32 = 70;
pub const DEFAULT_TRAIL_FADE_OUT_MS: u32 = 200;
pub const DEFAULT_TRAIL_MAX_SEGMENTS: usize = 25;

// Highlight defaults
pub const DEFAULT_HIGHLIGHT_STROKE_WIDTH: u32 = 1;
pub const DEFAULT_HIGHLIGHT_RADIUS: u32 = 25;
pub const DEFAULT_HIGHLIGHT_OPACITY: u32 = 255;
pub const DEFAULT_HIGHLIGHT_FADE_OUT_MS: u32 = 200;

// Stroke styling shared by every draw command
pub const STROKE_CORNER_RADIUS: f32 = 23.0;

// Redraw cadence used when a surface does not report its own
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
